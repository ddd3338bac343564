//! Text Normalizer — turns raw scraped page text into clean LLM input.
//!
//! Careers pages arrive as a soup of markup, navigation chrome, and tracking
//! URLs. The model extracts jobs far more reliably from plain prose, so the
//! page is scrubbed before prompting. Each step is a total function and the
//! whole pass is idempotent.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*?>").unwrap());

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[A-Za-z0-9$\-_.&+!*(),%/?=:;#@~]+").unwrap());

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(Skip navigation|Sign in|Send feedback|Privacy|Terms|Manage cookies)")
        .unwrap()
});

// Keep punctuation that carries meaning in job descriptions (C++, 24/7, salary ranges).
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9 .,/:;+()\-]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans raw scraped text: strips HTML tags, URLs, known navigation
/// boilerplate, and characters outside the allow-list, then collapses
/// whitespace. Order matters: tags first (so their contents survive),
/// character filtering last before the whitespace pass.
pub fn clean_text(text: &str) -> String {
    let text = TAG_RE.replace_all(text, " ");
    let text = URL_RE.replace_all(&text, " ");
    let text = BOILERPLATE_RE.replace_all(&text, " ");
    let text = DISALLOWED_RE.replace_all(&text, " ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_html_tags() {
        let out = clean_text("<div class=\"job\">Senior Engineer</div>");
        assert_eq!(out, "Senior Engineer");
        assert!(!out.contains('<'));
        assert!(!out.contains('>'));
    }

    #[test]
    fn test_strips_urls() {
        let out = clean_text("Apply at https://example.com/jobs?id=42 today");
        assert_eq!(out, "Apply at today");
        assert!(!out.contains("https://"));
        assert!(!out.contains("http://"));
    }

    #[test]
    fn test_strips_boilerplate_phrases() {
        let out = clean_text("Skip navigation Senior Engineer Sign in");
        assert_eq!(out, "Senior Engineer");
    }

    #[test]
    fn test_boilerplate_is_case_insensitive() {
        let out = clean_text("SIGN IN Data Scientist manage cookies");
        assert_eq!(out, "Data Scientist");
    }

    #[test]
    fn test_keeps_allowed_punctuation() {
        let out = clean_text("C++ developer; 3+ years (remote), on-call 24/7");
        assert_eq!(out, "C++ developer; 3+ years (remote), on-call 24/7");
    }

    #[test]
    fn test_drops_disallowed_characters() {
        let out = clean_text("Engineer* [urgent] — apply!");
        assert_eq!(out, "Engineer urgent apply");
    }

    #[test]
    fn test_collapses_whitespace() {
        let out = clean_text("  Senior \t\n  Engineer  ");
        assert_eq!(out, "Senior Engineer");
        assert!(!out.contains("  "));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_idempotent() {
        let raw = "<p>Skip navigation Rust Engineer at https://jobs.example.com/1 (Berlin)</p>";
        let once = clean_text(raw);
        let twice = clean_text(&once);
        assert_eq!(once, twice);
    }
}
