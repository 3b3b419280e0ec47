//! Resume classifier — a crude keyword heuristic used to reject obviously
//! wrong uploads (invoices, letters) before spending an LLM call.
//!
//! Each keyword counts at most once, however often or in whatever case it appears.

use serde::Serialize;

/// Section words expected somewhere in a resume.
pub const RESUME_KEYWORDS: &[&str] = &[
    "resume",
    "experience",
    "skills",
    "education",
    "projects",
    "summary",
];

/// Minimum number of distinct keywords for a document to count as a resume.
pub const MATCH_THRESHOLD: usize = 3;

pub const NOT_A_RESUME_MESSAGE: &str = "The uploaded PDF doesn't appear to be a resume.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationVerdict {
    pub is_resume: bool,
    pub matched_keyword_count: usize,
    pub message: Option<String>,
}

/// Classifies concatenated document text.
pub fn classify(text: &str) -> ClassificationVerdict {
    let lowered = text.to_lowercase();
    let matched_keyword_count = RESUME_KEYWORDS
        .iter()
        .filter(|k| lowered.contains(*k))
        .count();
    let is_resume = matched_keyword_count >= MATCH_THRESHOLD;

    ClassificationVerdict {
        is_resume,
        matched_keyword_count,
        message: (!is_resume).then(|| NOT_A_RESUME_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_keywords_is_resume() {
        let v = classify("resume experience skills");
        assert!(v.is_resume);
        assert_eq!(v.matched_keyword_count, 3);
        assert!(v.message.is_none());
    }

    #[test]
    fn test_two_keywords_is_not_resume() {
        let v = classify("Invoice 2024 — professional experience and skills billed hourly");
        assert!(!v.is_resume);
        assert_eq!(v.matched_keyword_count, 2);
        assert_eq!(v.message.as_deref(), Some(NOT_A_RESUME_MESSAGE));
    }

    #[test]
    fn test_all_keywords_counted() {
        let v = classify("Summary. Skills. Experience. Projects. Education. Resume.");
        assert!(v.is_resume);
        assert_eq!(v.matched_keyword_count, RESUME_KEYWORDS.len());
    }

    #[test]
    fn test_case_variants_count_once() {
        let v = classify("RESUME Resume resume");
        assert_eq!(v.matched_keyword_count, 1);
        assert!(!v.is_resume);
    }

    #[test]
    fn test_repetition_does_not_inflate_count() {
        let v = classify("skills skills skills skills experience experience");
        assert_eq!(v.matched_keyword_count, 2);
    }

    #[test]
    fn test_substring_matches_count() {
        // "resumes" and "summary" inside "summarysection" are substring hits.
        let v = classify("myresumes summarysection work-experience");
        assert_eq!(v.matched_keyword_count, 3);
        assert!(v.is_resume);
    }

    #[test]
    fn test_empty_text_is_not_resume() {
        let v = classify("");
        assert_eq!(v.matched_keyword_count, 0);
        assert!(!v.is_resume);
    }

    #[test]
    fn test_page_order_does_not_change_count() {
        let pages = ["Education\nBSc", "Experience\nAcme", "Skills\nRust"];
        let forward: String = pages.concat();
        let reversed: String = pages.iter().rev().copied().collect();
        assert_eq!(
            classify(&forward).matched_keyword_count,
            classify(&reversed).matched_keyword_count
        );
    }

    #[test]
    fn test_classification_is_idempotent() {
        let text = "Resume — Projects — Summary";
        assert_eq!(classify(text), classify(text));
    }
}
