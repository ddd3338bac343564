//! Portfolio Matcher — ranks portfolio entries against a job's tech profile.
//!
//! A small CSV of (Techstack, Links) rows is loaded once at startup and
//! indexed into a TF-IDF vector space. Per-job queries return the top-k
//! links by cosine similarity; those links are what the email prompt offers
//! the model to cite.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::email::CandidateLink;
use crate::errors::AppError;

/// Words too common to carry signal in a techstack description.
const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "for", "from",
    "had", "has", "have", "in", "into", "is", "it", "its", "more", "most", "no", "not", "of", "on",
    "or", "our", "over", "such", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "to", "under", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "will", "with", "you", "your",
];

/// One row of the portfolio table. Immutable after load.
#[derive(Debug, Clone)]
pub struct PortfolioEntry {
    pub techstack: String,
    pub link: String,
}

/// CSV row shape: the source file uses capitalised column names.
#[derive(Debug, Deserialize)]
struct PortfolioRow {
    #[serde(rename = "Techstack")]
    techstack: String,
    #[serde(rename = "Links")]
    links: String,
}

/// TF-IDF index over the techstack column. Sparse vectors keyed by term,
/// L2-normalised so cosine similarity reduces to a dot product.
#[derive(Debug)]
struct TfidfIndex {
    idf: HashMap<String, f64>,
    vectors: Vec<HashMap<String, f64>>,
}

impl TfidfIndex {
    fn build(documents: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();
        let total_docs = documents.len();

        // Document frequency per term.
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Smoothed idf, as if one extra document contained every term.
        let idf: HashMap<String, f64> = doc_freq
            .into_iter()
            .map(|(term, df)| {
                let weight = ((1.0 + total_docs as f64) / (1.0 + df as f64)).ln() + 1.0;
                (term, weight)
            })
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| weigh_and_normalise(tokens, &idf))
            .collect();

        TfidfIndex { idf, vectors }
    }

    /// Cosine similarity of `text` against every indexed document.
    /// Terms outside the fitted vocabulary are ignored.
    fn similarities(&self, text: &str) -> Vec<f64> {
        let query = weigh_and_normalise(&tokenize(text), &self.idf);
        self.vectors
            .iter()
            .map(|doc| {
                query
                    .iter()
                    .filter_map(|(term, w)| doc.get(term).map(|d| w * d))
                    .sum()
            })
            .collect()
    }
}

/// Lowercases, splits on non-alphanumerics, drops stop words and
/// single-character fragments.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Term counts scaled by idf, then L2-normalised. Unknown terms get no
/// weight; an all-unknown input yields the zero vector.
fn weigh_and_normalise(tokens: &[String], idf: &HashMap<String, f64>) -> HashMap<String, f64> {
    let mut counts: HashMap<&String, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }

    let mut vector: HashMap<String, f64> = counts
        .into_iter()
        .filter_map(|(term, count)| idf.get(term).map(|w| (term.clone(), count * w)))
        .collect();

    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

/// The portfolio table plus its similarity index.
///
/// `load()` must run before `query()`; the index is read-only afterwards, so
/// one build at startup serves all requests.
#[derive(Debug)]
pub struct Portfolio {
    entries: Vec<PortfolioEntry>,
    index: Option<TfidfIndex>,
}

impl Portfolio {
    /// Reads the portfolio CSV (columns "Techstack", "Links"). The index is
    /// not built yet; call `load()` next.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open portfolio file '{}'", path.display()))?;

        let mut entries = Vec::new();
        for row in reader.deserialize() {
            let row: PortfolioRow =
                row.with_context(|| format!("Malformed row in '{}'", path.display()))?;
            entries.push(PortfolioEntry {
                techstack: row.techstack,
                link: row.links,
            });
        }

        info!("Loaded {} portfolio entries from {}", entries.len(), path.display());
        Ok(Portfolio {
            entries,
            index: None,
        })
    }

    /// Builds a portfolio from in-memory entries (tests, fixtures).
    pub fn from_entries(entries: Vec<PortfolioEntry>) -> Self {
        Portfolio {
            entries,
            index: None,
        }
    }

    /// Builds the TF-IDF index over the techstack column. Must be re-run if
    /// the underlying entries ever change.
    pub fn load(&mut self) {
        let documents: Vec<String> = self.entries.iter().map(|e| e.techstack.clone()).collect();
        self.index = Some(TfidfIndex::build(&documents));
        info!("Portfolio similarity index built ({} documents)", documents.len());
    }

    /// Returns up to `k` portfolio links ranked by descending cosine
    /// similarity to `text`. Ties keep original row order. An empty query
    /// returns an empty list without consulting the index; a query before
    /// `load()` is a `Match` error.
    pub fn query(&self, text: &str, k: usize) -> Result<Vec<CandidateLink>, AppError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let index = self
            .index
            .as_ref()
            .ok_or_else(|| AppError::Match("Portfolio queried before load()".to_string()))?;

        let similarities = index.similarities(text);

        let mut ranked: Vec<usize> = (0..self.entries.len()).collect();
        // Stable sort: equal scores keep row order.
        ranked.sort_by(|&a, &b| {
            similarities[b]
                .partial_cmp(&similarities[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ranked
            .into_iter()
            .take(k)
            .map(|i| CandidateLink::Record {
                links: Some(self.entries[i].link.clone()),
            })
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Portfolio {
        Portfolio::from_entries(vec![
            PortfolioEntry {
                techstack: "Rust, Tokio, Axum".to_string(),
                link: "https://example.com/rust-portfolio".to_string(),
            },
            PortfolioEntry {
                techstack: "Python, Django, Celery".to_string(),
                link: "https://example.com/python-portfolio".to_string(),
            },
            PortfolioEntry {
                techstack: "TypeScript, React, GraphQL".to_string(),
                link: "https://example.com/react-portfolio".to_string(),
            },
        ])
    }

    fn link_of(candidate: &CandidateLink) -> &str {
        match candidate {
            CandidateLink::Record { links: Some(l) } => l,
            other => panic!("unexpected candidate shape: {other:?}"),
        }
    }

    #[test]
    fn test_exact_techstack_ranks_first() {
        let mut portfolio = fixture();
        portfolio.load();

        let results = portfolio.query("Rust, Tokio, Axum", 2).unwrap();
        assert_eq!(link_of(&results[0]), "https://example.com/rust-portfolio");
    }

    #[test]
    fn test_stop_words_do_not_drive_ranking() {
        let mut portfolio = fixture();
        portfolio.load();

        let results = portfolio.query("experience with Python and Django", 1).unwrap();
        assert_eq!(link_of(&results[0]), "https://example.com/python-portfolio");
    }

    #[test]
    fn test_k_larger_than_table_returns_all_without_duplicates() {
        let mut portfolio = fixture();
        portfolio.load();

        let results = portfolio.query("React", 10).unwrap();
        assert_eq!(results.len(), 3);

        let links: std::collections::HashSet<String> =
            results.iter().map(|c| link_of(c).to_string()).collect();
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn test_empty_query_returns_empty_even_before_load() {
        let portfolio = fixture();
        assert!(portfolio.query("", 2).unwrap().is_empty());
        assert!(portfolio.query("   ", 2).unwrap().is_empty());
    }

    #[test]
    fn test_query_before_load_is_match_error() {
        let portfolio = fixture();
        let err = portfolio.query("Rust", 2).unwrap_err();
        assert!(matches!(err, AppError::Match(_)));
    }

    #[test]
    fn test_ties_keep_row_order() {
        let mut portfolio = Portfolio::from_entries(vec![
            PortfolioEntry {
                techstack: "Go, gRPC".to_string(),
                link: "https://example.com/first".to_string(),
            },
            PortfolioEntry {
                techstack: "Go, gRPC".to_string(),
                link: "https://example.com/second".to_string(),
            },
        ]);
        portfolio.load();

        let results = portfolio.query("Go gRPC", 2).unwrap();
        assert_eq!(link_of(&results[0]), "https://example.com/first");
        assert_eq!(link_of(&results[1]), "https://example.com/second");
    }
}
