//! Pipeline — orchestrates one user-triggered run.
//!
//! Flow: fetch → clean_text → extract_jobs → per job (match → write_mail).
//! Strictly sequential; the first failing step aborts the run with its typed
//! `AppError` and no partial output is kept.

use serde::Serialize;
use tracing::info;

use crate::email::write_mail;
use crate::errors::AppError;
use crate::extraction::extract_jobs;
use crate::fetch::PageFetcher;
use crate::llm_client::CompletionModel;
use crate::normalize::clean_text;
use crate::portfolio::Portfolio;

/// Number of portfolio links offered to the model per job.
const LINKS_PER_JOB: usize = 2;

/// One generated email, paired with the role it targets for display.
#[derive(Debug, Clone, Serialize)]
pub struct JobEmail {
    pub role: String,
    pub email: String,
}

/// Runs the full pipeline for one careers page URL and returns one email per
/// extracted job, in extraction order.
pub async fn run(
    url: &str,
    fetcher: &dyn PageFetcher,
    model: &dyn CompletionModel,
    portfolio: &Portfolio,
) -> Result<Vec<JobEmail>, AppError> {
    if url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    info!("Fetching careers page: {url}");
    let page = fetcher.fetch(url).await?;

    let cleaned = clean_text(&page);
    info!("Normalised page text: {} chars", cleaned.len());

    let jobs = extract_jobs(&cleaned, model).await?;
    info!("Extracted {} job postings", jobs.len());

    let mut emails = Vec::with_capacity(jobs.len());
    for (idx, job) in jobs.iter().enumerate() {
        let links = portfolio.query(job.match_query(), LINKS_PER_JOB)?;
        info!(
            "Job {}: matched {} portfolio links",
            idx + 1,
            links.len()
        );

        let email = write_mail(job, &links, model).await?;
        emails.push(JobEmail {
            role: job.role.clone().unwrap_or_else(|| "N/A".to_string()),
            email,
        });
    }

    info!("Pipeline complete: {} emails drafted", emails.len());
    Ok(emails)
}
