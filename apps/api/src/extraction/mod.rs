//! Text extraction — turns an uploaded document into ordered page text.
//!
//! Extraction is synchronous; handlers run it on tokio's blocking pool so a
//! large document does not stall the async workers. A document that
//! cannot be decoded at all yields a single `ExtractionError`; pages without a
//! text layer come back as empty strings so the page count is preserved.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

/// Media types accepted by the PDF extractor. Browsers sometimes send the
/// generic binary type for PDFs, so it is allowed too.
const ACCEPTED_MEDIA_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("unsupported media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    Decode(String),
}

/// An uploaded document, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: Option<String>,
    pub file_name: Option<String>,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: None,
            file_name: None,
        }
    }
}

/// Page texts in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub pages: Vec<String>,
}

impl ExtractedText {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenates all pages in order, without separators.
    pub fn text(&self) -> String {
        self.pages.concat()
    }
}

/// Decodes a document into page text. Implementations must not fail on
/// individual pages without text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: RawDocument) -> Result<ExtractedText, ExtractionError>;
}

/// PDF extractor backed by the `pdf-extract` crate.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document: RawDocument) -> Result<ExtractedText, ExtractionError> {
        if let Some(media_type) = document.media_type.as_deref() {
            let essence = media_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            if !ACCEPTED_MEDIA_TYPES.contains(&essence.as_str()) {
                return Err(ExtractionError::UnsupportedMediaType(media_type.to_string()));
            }
        }

        if document.bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        // pdf-extract panics on some malformed inputs instead of returning an error.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(&document.bytes)
        }));

        let pages = match outcome {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(ExtractionError::Decode(e.to_string())),
            Err(payload) => {
                let detail = panic_detail(payload.as_ref());
                warn!("PDF decoder panicked: {detail}");
                return Err(ExtractionError::Decode(detail));
            }
        };

        // A page without a text layer may still decode to layout whitespace.
        let pages: Vec<String> = pages
            .into_iter()
            .map(|p| if p.trim().is_empty() { String::new() } else { p })
            .collect();

        debug!(
            "Extracted {} page(s) from {:?}",
            pages.len(),
            document.file_name.as_deref().unwrap_or("<unnamed>")
        );

        Ok(ExtractedText { pages })
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("PDF decoder failed: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("PDF decoder failed: {s}")
    } else {
        "PDF decoder failed".to_string()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Builds a PDF with one text page per entry in `pages`.
    pub fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        let pages: Vec<Option<&str>> = pages.iter().copied().map(Some).collect();
        make_pdf_with_pages(&pages)
    }

    /// Like `make_test_pdf`, but a `None` page has no `/Contents` at all,
    /// the way an image-only scan page looks to a text extractor.
    pub fn make_pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
            };
            if let Some(text) = text {
                let content = if text.is_empty() {
                    String::new()
                } else {
                    format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET")
                };
                let content_id =
                    doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
                page.set("Contents", content_id);
            }
            let page_id = doc.add_object(page);
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{make_pdf_with_pages, make_test_pdf};
    use super::*;

    #[test]
    fn test_extracts_text_from_single_page() {
        let bytes = make_test_pdf(&["Resume of Jane Doe"]);
        let extracted = PdfTextExtractor.extract(RawDocument::new(bytes)).unwrap();

        assert_eq!(extracted.page_count(), 1);
        assert!(
            extracted.text().contains("Resume"),
            "expected extracted text to contain 'Resume', got: {:?}",
            extracted.text()
        );
    }

    #[test]
    fn test_page_order_is_preserved() {
        let bytes = make_test_pdf(&["Alpha", "Bravo"]);
        let extracted = PdfTextExtractor.extract(RawDocument::new(bytes)).unwrap();

        assert_eq!(extracted.page_count(), 2);
        let text = extracted.text();
        let alpha = text.find("Alpha").expect("Alpha missing");
        let bravo = text.find("Bravo").expect("Bravo missing");
        assert!(alpha < bravo);
    }

    #[test]
    fn test_blank_page_keeps_its_slot() {
        let bytes = make_test_pdf(&["Alpha", "", "Bravo"]);
        let extracted = PdfTextExtractor.extract(RawDocument::new(bytes)).unwrap();

        assert_eq!(extracted.page_count(), 3);
        assert_eq!(extracted.pages[1], "");
        assert!(extracted.pages[0].contains("Alpha"));
        assert!(extracted.pages[2].contains("Bravo"));
    }

    #[test]
    fn test_page_without_contents_yields_empty_text() {
        let bytes = make_pdf_with_pages(&[Some("Alpha"), None, Some("Bravo")]);
        let extracted = PdfTextExtractor.extract(RawDocument::new(bytes)).unwrap();

        assert_eq!(extracted.page_count(), 3);
        assert_eq!(extracted.pages[1], "");
        let text = extracted.text();
        assert!(text.find("Alpha").unwrap() < text.find("Bravo").unwrap());
    }

    #[test]
    fn test_image_only_document_has_no_text() {
        let bytes = make_pdf_with_pages(&[None]);
        let extracted = PdfTextExtractor.extract(RawDocument::new(bytes)).unwrap();

        assert_eq!(extracted.page_count(), 1);
        assert!(extracted.text().trim().is_empty());
    }

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let result = PdfTextExtractor.extract(RawDocument::new(&b"not a pdf"[..]));
        assert!(matches!(result, Err(ExtractionError::Decode(_))));
    }

    #[test]
    fn test_empty_document_fails_extraction() {
        let result = PdfTextExtractor.extract(RawDocument::new(Bytes::new()));
        assert!(matches!(result, Err(ExtractionError::EmptyDocument)));
    }

    #[test]
    fn test_non_pdf_media_type_is_rejected() {
        let bytes = make_test_pdf(&["Resume"]);
        let document = RawDocument {
            media_type: Some("image/png".to_string()),
            ..RawDocument::new(bytes)
        };
        let result = PdfTextExtractor.extract(document);
        assert!(matches!(
            result,
            Err(ExtractionError::UnsupportedMediaType(ref m)) if m == "image/png"
        ));
    }

    #[test]
    fn test_pdf_media_type_with_parameters_is_accepted() {
        let bytes = make_test_pdf(&["Resume"]);
        let document = RawDocument {
            media_type: Some("application/PDF; charset=binary".to_string()),
            ..RawDocument::new(bytes)
        };
        assert!(PdfTextExtractor.extract(document).is_ok());
    }

    #[test]
    fn test_concatenation_keeps_empty_pages() {
        let extracted = ExtractedText {
            pages: vec!["a".to_string(), String::new(), "b".to_string()],
        };
        assert_eq!(extracted.page_count(), 3);
        assert_eq!(extracted.text(), "ab");
    }
}
