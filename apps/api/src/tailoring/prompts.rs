// Prompt templates for the tailoring pipeline.

pub use crate::llm_client::prompts::JSON_ONLY_SYSTEM as TAILORING_SYSTEM;

/// Tailoring prompt template. Replace `{resume_text}` before sending; the
/// placeholder must stay last so the candidate text is appended verbatim.
pub const TAILORING_PROMPT_TEMPLATE: &str = r#"You are an AI resume assistant. The user has provided a resume and a job description. Make the resume ATS-friendly and tailor it to the role by improving the summary, highlighting relevant skills, rewriting experience highlights to match the role, and refining certifications.

Only return a valid JSON object. Do not wrap it in markdown and do not add commentary.

Return a JSON object with this EXACT schema (no extra fields):
{
  "name": "Jane Doe",
  "contact": {
    "location": "City, Country",
    "email": "jane@example.com",
    "phone": "+1 555 0100",
    "website": "https://janedoe.dev",
    "github": "https://github.com/janedoe",
    "linkedin": "https://linkedin.com/in/janedoe"
  },
  "tailored_summary": "Two to four sentences aligned with the job description.",
  "tailored_skills": {
    "Category name": ["Skill", "Skill"]
  },
  "tailored_experience": [
    {
      "company": "Company",
      "title": "Job title",
      "location": "City, Country",
      "start": "MMM YYYY",
      "end": "MMM YYYY or Present",
      "highlights": ["Achievement rewritten for the target role"]
    }
  ],
  "tailored_certificates": ["Certificate name"],
  "projects": [
    {
      "title": "Project name",
      "tech": ["Technology"],
      "description": "One sentence description",
      "highlights": ["Optional highlight"]
    }
  ],
  "education": [
    {
      "program": "Degree or program",
      "school": "School",
      "location": "City, Country",
      "start": "YYYY",
      "end": "YYYY"
    }
  ]
}

RULES:
1. Contact fields the resume does not provide must be null.
2. Every other string field must be a string; use "" when the resume has no value.
3. tailored_skills maps a category name to an array of skill strings.
4. Keep experience, projects, and education in the order they appear in the resume.
5. "highlights" on projects may be omitted.

Here is the resume and job context:
{resume_text}"#;

/// Builds the tailoring prompt. Pure templating: identical input always
/// yields an identical prompt, and the input is never inspected or truncated.
pub fn build_tailoring_prompt(resume_text: &str) -> String {
    // Split on the trailing placeholder instead of `str::replace` so a literal
    // "{resume_text}" inside the candidate text is left alone.
    let (head, _) = TAILORING_PROMPT_TEMPLATE
        .rsplit_once("{resume_text}")
        .unwrap_or((TAILORING_PROMPT_TEMPLATE, ""));
    let mut prompt = String::with_capacity(head.len() + resume_text.len());
    prompt.push_str(head);
    prompt.push_str(resume_text);
    prompt
}
