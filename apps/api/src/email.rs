//! Email drafting — renders one job plus its candidate portfolio links into
//! the outreach template and requests a single completion.
//!
//! The model output is returned exactly as received: the template's
//! formatting constraints (no preamble, no subject line) are advisory, not
//! validated here.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::JobPosting;
use crate::llm_client::prompts::{EMAIL_PROMPT_TEMPLATE, EMAIL_SYSTEM};
use crate::llm_client::CompletionModel;

/// A candidate portfolio link in any of the shapes upstream sources emit:
/// a bare string, a record with a `links` field, or a sequence whose first
/// element is the link. Anything else is dropped at conversion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateLink {
    Text(String),
    Record { links: Option<String> },
    Sequence(Vec<String>),
}

impl CandidateLink {
    /// Converts one candidate into a usable link string.
    /// Empty records, empty sequences, and empty strings yield `None` and
    /// the candidate is dropped from the rendered list.
    fn link_text(&self) -> Option<&str> {
        let link = match self {
            CandidateLink::Text(s) => Some(s.as_str()),
            CandidateLink::Record { links } => links.as_deref(),
            CandidateLink::Sequence(items) => items.first().map(String::as_str),
        };
        link.filter(|l| !l.is_empty())
    }
}

/// Renders surviving candidates as a newline-separated bulleted list for
/// template embedding.
fn format_links(links: &[CandidateLink]) -> String {
    links
        .iter()
        .filter_map(CandidateLink::link_text)
        .map(|l| format!("- {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic description block built from the job fields. Missing fields
/// render as "N/A" except the description, which renders as empty.
fn describe_job(job: &JobPosting) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    format!(
        "Role: {}\nCompany: {}\nLocation: {}\nExperience Level: {}\nDescription: {}",
        field(&job.role),
        field(&job.company),
        field(&job.location),
        field(&job.experience_level),
        job.short_description.as_deref().unwrap_or(""),
    )
}

/// Drafts one cold email for `job`, offering the model the candidate
/// portfolio links. Returns the completion text verbatim.
pub async fn write_mail(
    job: &JobPosting,
    links: &[CandidateLink],
    model: &dyn CompletionModel,
) -> Result<String, AppError> {
    let prompt = EMAIL_PROMPT_TEMPLATE
        .replace("{job_description}", &describe_job(job))
        .replace("{link_list}", &format_links(links));

    model
        .complete(&prompt, EMAIL_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Email drafting failed: {e}")))
}
