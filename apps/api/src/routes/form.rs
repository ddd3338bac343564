//! The interactive surface: one page, one text input, one trigger action.
//!
//! `GET /` serves the embedded form, `POST /generate` runs the pipeline and
//! renders the results as HTML. `POST /api/v1/generate` exposes the same
//! pipeline as JSON for programmatic callers.

use axum::{
    extract::State,
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::pipeline::{self, JobEmail};
use crate::state::AppState;

/// Pre-filled example URL, same default the form has always shipped with.
const DEFAULT_URL: &str = "https://www.google.com/about/careers/applications/jobs/results";

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub jobs: Vec<JobEmail>,
}

/// GET /
/// Serves the single-page form.
pub async fn index_handler() -> Html<String> {
    Html(render_page(&format!(
        r#"<form method="post" action="/generate">
      <label for="url">Enter a careers page or job URL:</label>
      <input type="text" id="url" name="url" value="{DEFAULT_URL}" />
      <button type="submit">Generate Emails</button>
    </form>"#
    )))
}

/// POST /generate
/// Form submission: runs the pipeline and renders one heading + email per
/// extracted job. Pipeline errors surface with their taxonomy code via
/// `AppError::into_response`.
pub async fn generate_form_handler(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Result<Html<String>, AppError> {
    let emails = pipeline::run(
        &form.url,
        state.fetcher.as_ref(),
        state.model.as_ref(),
        state.portfolio.as_ref(),
    )
    .await?;

    Ok(Html(render_page(&render_results(&emails))))
}

/// POST /api/v1/generate
/// JSON variant of the same pipeline.
pub async fn generate_api_handler(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let jobs = pipeline::run(
        &request.url,
        state.fetcher.as_ref(),
        state.model.as_ref(),
        state.portfolio.as_ref(),
    )
    .await?;

    Ok(Json(GenerateResponse { jobs }))
}

/// Renders the per-job result sections, or a notice when no jobs were found.
fn render_results(emails: &[JobEmail]) -> String {
    if emails.is_empty() {
        return r#"<p class="notice">No jobs found on this page.</p>
    <p><a href="/">Back</a></p>"#
            .to_string();
    }

    let mut body = String::new();
    for (idx, job_email) in emails.iter().enumerate() {
        body.push_str(&format!(
            "<h2>Job {}: {}</h2>\n<pre>{}</pre>\n",
            idx + 1,
            escape_html(&job_email.role),
            escape_html(&job_email.email),
        ));
    }
    body.push_str(r#"<p><a href="/">Back</a></p>"#);
    body
}

fn render_page(body: &str) -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>Cold Mail Generator</title>
    <style>
      body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }}
      input[type="text"] {{ width: 100%; padding: 0.5rem; margin: 0.5rem 0; }}
      pre {{ background: #f4f4f4; padding: 1rem; white-space: pre-wrap; }}
      .notice {{ color: #8a6d3b; }}
    </style>
  </head>
  <body>
    <h1>Cold Mail Generator</h1>
    {body}
  </body>
</html>
"#
    )
}

/// Minimal HTML escaping for text interpolated into the results page.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & y")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; y&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_results_one_section_per_job() {
        let emails = vec![
            JobEmail {
                role: "Rust Engineer".to_string(),
                email: "Hello".to_string(),
            },
            JobEmail {
                role: "Data Scientist".to_string(),
                email: "Hi".to_string(),
            },
        ];

        let html = render_results(&emails);
        assert!(html.contains("<h2>Job 1: Rust Engineer</h2>"));
        assert!(html.contains("<h2>Job 2: Data Scientist</h2>"));
        assert_eq!(html.matches("<pre>").count(), 2);
    }

    #[test]
    fn test_render_results_empty_shows_notice() {
        let html = render_results(&[]);
        assert!(html.contains("No jobs found on this page."));
    }

    #[test]
    fn test_index_page_contains_form_and_default_url() {
        let page = render_page(&format!(
            r#"<form method="post" action="/generate"><input value="{DEFAULT_URL}" /></form>"#
        ));
        assert!(page.contains(r#"action="/generate""#));
        assert!(page.contains(DEFAULT_URL));
    }
}
