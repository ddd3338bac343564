//! Job extraction — turns normalised careers page text into structured
//! `JobPosting` records via one model completion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};
use crate::llm_client::{strip_json_fences, CompletionModel};

/// One job posting as extracted by the model. Every field is optional: the
/// source pages are inconsistent and the model only reports what it finds.
/// Lives for one request/response cycle, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    // Some model outputs use "description" for this field.
    #[serde(default, alias = "description")]
    pub short_description: Option<String>,
}

impl JobPosting {
    /// Text used to query the portfolio matcher: the description when
    /// present, else the role. Both absent yields an empty query (which the
    /// matcher answers with no links).
    pub fn match_query(&self) -> &str {
        self.short_description
            .as_deref()
            .or(self.role.as_deref())
            .unwrap_or("")
    }
}

/// Extracts job postings from cleaned page text, in the order the model
/// reports them. Output that is not valid JSON fails with `AppError::Parse`,
/// a distinct kind callers can match on.
pub async fn extract_jobs(
    page_text: &str,
    model: &dyn CompletionModel,
) -> Result<Vec<JobPosting>, AppError> {
    let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{page_data}", page_text);

    let completion = model
        .complete(&prompt, EXTRACT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job extraction failed: {e}")))?;

    parse_jobs(&completion)
}

/// Parses a completion strictly as JSON. A single object is wrapped into a
/// one-element list; anything that is neither an array nor an object is a
/// parse error, never a silent empty list.
fn parse_jobs(completion: &str) -> Result<Vec<JobPosting>, AppError> {
    let text = strip_json_fences(completion);

    let value: Value = serde_json::from_str(text)
        .map_err(|e| AppError::Parse(format!("Unable to parse job listings: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        other => {
            return Err(AppError::Parse(format!(
                "Expected a JSON array or object of job postings, got: {other}"
            )))
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| AppError::Parse(format!("Malformed job posting: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    /// Mock model returning a canned completion.
    struct FixedModel(&'static str);

    #[async_trait]
    impl CompletionModel for FixedModel {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_array_round_trips_with_equal_length() {
        let completion = r#"[
            {"role": "Senior Rust Engineer", "company": "Acme", "location": "Berlin",
             "experience_level": "Senior", "short_description": "Build backend services."},
            {"role": "Data Scientist"}
        ]"#;

        let jobs = parse_jobs(completion).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].role.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(jobs[1].role.as_deref(), Some("Data Scientist"));
        assert!(jobs[1].company.is_none());
    }

    #[test]
    fn test_single_object_wraps_into_one_element_list() {
        let completion = r#"{"role": "Platform Engineer", "location": "Remote"}"#;

        let jobs = parse_jobs(completion).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].role.as_deref(), Some("Platform Engineer"));
    }

    #[test]
    fn test_description_alias_maps_to_short_description() {
        let completion = r#"{"role": "SRE", "description": "Keep the lights on."}"#;

        let jobs = parse_jobs(completion).unwrap();
        assert_eq!(
            jobs[0].short_description.as_deref(),
            Some("Keep the lights on.")
        );
    }

    #[test]
    fn test_malformed_output_is_parse_error() {
        let err = parse_jobs("Sure! Here are the jobs I found:").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_bare_scalar_is_parse_error() {
        let err = parse_jobs("42").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let completion = "```json\n[{\"role\": \"Engineer\"}]\n```";
        let jobs = parse_jobs(completion).unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_empty_array_is_empty_list_not_error() {
        let jobs = parse_jobs("[]").unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_match_query_prefers_description_then_role() {
        let job: JobPosting = serde_json::from_str(
            r#"{"role": "SRE", "short_description": "Kubernetes and Go"}"#,
        )
        .unwrap();
        assert_eq!(job.match_query(), "Kubernetes and Go");

        let job: JobPosting = serde_json::from_str(r#"{"role": "SRE"}"#).unwrap();
        assert_eq!(job.match_query(), "SRE");

        let job: JobPosting = serde_json::from_str("{}").unwrap();
        assert_eq!(job.match_query(), "");
    }

    #[tokio::test]
    async fn test_extract_jobs_via_model_seam() {
        let model = FixedModel(r#"[{"role": "Backend Engineer"}]"#);
        let jobs = extract_jobs("cleaned page text", &model).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].role.as_deref(), Some("Backend Engineer"));
    }
}
