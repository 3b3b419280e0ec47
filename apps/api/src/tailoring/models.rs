//! The structured resume returned by the tailoring pipeline, plus the shape
//! checks that run on the model's JSON before it is deserialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    pub name: String,
    pub contact: Contact,
    pub tailored_summary: String,
    pub tailored_skills: BTreeMap<String, Vec<String>>,
    pub tailored_experience: Vec<ExperienceItem>,
    pub tailored_certificates: Vec<String>,
    pub projects: Vec<ProjectItem>,
    pub education: Vec<EducationItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub company: String,
    pub title: String,
    pub location: String,
    pub start: String,
    pub end: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub title: String,
    pub tech: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub program: String,
    pub school: String,
    pub location: String,
    pub start: String,
    pub end: String,
}

/// Success envelope returned by the tailoring endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredResume {
    pub structured: StructuredResume,
}

// ────────────────────────────────────────────────────────────────────────────
// Shape validation
// ────────────────────────────────────────────────────────────────────────────

/// Expected JSON kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    OptionalString,
    StringArray,
    OptionalStringArray,
}

const CONTACT_FIELDS: &[(&str, Kind)] = &[
    ("location", Kind::OptionalString),
    ("email", Kind::OptionalString),
    ("phone", Kind::OptionalString),
    ("website", Kind::OptionalString),
    ("github", Kind::OptionalString),
    ("linkedin", Kind::OptionalString),
];

const EXPERIENCE_FIELDS: &[(&str, Kind)] = &[
    ("company", Kind::String),
    ("title", Kind::String),
    ("location", Kind::String),
    ("start", Kind::String),
    ("end", Kind::String),
    ("highlights", Kind::StringArray),
];

const PROJECT_FIELDS: &[(&str, Kind)] = &[
    ("title", Kind::String),
    ("tech", Kind::StringArray),
    ("description", Kind::String),
    ("highlights", Kind::OptionalStringArray),
];

const EDUCATION_FIELDS: &[(&str, Kind)] = &[
    ("program", Kind::String),
    ("school", Kind::String),
    ("location", Kind::String),
    ("start", Kind::String),
    ("end", Kind::String),
];

/// Walks a parsed reply and lists every missing or wrongly typed field as a
/// JSON path with the reason, e.g. `tailored_experience[1].highlights: expected array of strings`.
/// An empty result means the value deserializes into `StructuredResume`.
pub fn find_schema_issues(value: &Value) -> Vec<String> {
    let mut issues = Vec::new();

    let Some(root) = value.as_object() else {
        issues.push("$: expected object".to_string());
        return issues;
    };

    check_field(root, "name", Kind::String, "", &mut issues);
    check_field(root, "tailored_summary", Kind::String, "", &mut issues);
    check_field(root, "tailored_certificates", Kind::StringArray, "", &mut issues);

    match root.get("contact") {
        None => issues.push("contact: missing".to_string()),
        Some(Value::Object(contact)) => {
            check_fields(contact, CONTACT_FIELDS, "contact.", &mut issues)
        }
        Some(_) => issues.push("contact: expected object".to_string()),
    }

    match root.get("tailored_skills") {
        None => issues.push("tailored_skills: missing".to_string()),
        Some(Value::Object(categories)) => {
            for (category, items) in categories {
                if !is_string_array(items) {
                    issues.push(format!(
                        "tailored_skills.{category}: expected array of strings"
                    ));
                }
            }
        }
        Some(_) => issues.push("tailored_skills: expected object".to_string()),
    }

    check_object_array(root, "tailored_experience", EXPERIENCE_FIELDS, &mut issues);
    check_object_array(root, "projects", PROJECT_FIELDS, &mut issues);
    check_object_array(root, "education", EDUCATION_FIELDS, &mut issues);

    issues
}

fn check_object_array(
    root: &serde_json::Map<String, Value>,
    key: &str,
    fields: &[(&str, Kind)],
    issues: &mut Vec<String>,
) {
    match root.get(key) {
        None => issues.push(format!("{key}: missing")),
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                match item.as_object() {
                    Some(obj) => check_fields(obj, fields, &format!("{key}[{i}]."), issues),
                    None => issues.push(format!("{key}[{i}]: expected object")),
                }
            }
        }
        Some(_) => issues.push(format!("{key}: expected array")),
    }
}

fn check_fields(
    obj: &serde_json::Map<String, Value>,
    fields: &[(&str, Kind)],
    prefix: &str,
    issues: &mut Vec<String>,
) {
    for &(name, kind) in fields {
        check_field(obj, name, kind, prefix, issues);
    }
}

fn check_field(
    obj: &serde_json::Map<String, Value>,
    name: &str,
    kind: Kind,
    prefix: &str,
    issues: &mut Vec<String>,
) {
    let value = obj.get(name);
    let problem = match (kind, value) {
        (Kind::String, None) | (Kind::StringArray, None) => Some("missing"),
        (Kind::String, Some(v)) if !v.is_string() => Some("expected string"),
        (Kind::StringArray, Some(v)) if !is_string_array(v) => Some("expected array of strings"),
        (Kind::OptionalString, Some(v)) if !(v.is_null() || v.is_string()) => {
            Some("expected string or null")
        }
        (Kind::OptionalStringArray, Some(v)) if !(v.is_null() || is_string_array(v)) => {
            Some("expected array of strings or null")
        }
        _ => None,
    };

    if let Some(problem) = problem {
        issues.push(format!("{prefix}{name}: {problem}"));
    }
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}
