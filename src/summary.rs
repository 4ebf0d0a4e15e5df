//! Summarizer adapter: turns a query and its search results into a
//! renderable analysis.
//!
//! This function is total. Empty result sets and generation failures fold
//! into dedicated variants instead of errors, so the interactive loop
//! always receives something it can print.

use crate::agent::GenerationProvider;
use crate::search::SearchResult;
use std::fmt::Write as _;
use tracing::error;

/// Shown when a query matched nothing worth analyzing
pub const NO_RESULTS_NOTICE: &str = "No relevant search results found.";

/// Shown when the generation call failed
pub const ANALYSIS_FAILED_NOTICE: &str = "Error analyzing search results with Gemini.";

/// Outcome of an analysis pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Text generated by the model
    Summary(String),
    /// The result set was empty; the model was never called
    NoResults,
    /// The generation call failed
    Failed,
}

impl Analysis {
    /// Renderable markdown text for this outcome
    pub fn text(&self) -> &str {
        match self {
            Analysis::Summary(text) => text,
            Analysis::NoResults => NO_RESULTS_NOTICE,
            Analysis::Failed => ANALYSIS_FAILED_NOTICE,
        }
    }
}

/// Build the generation prompt: the query, the enumerated results in rank
/// order, and a fixed instruction suffix.
pub fn build_prompt(query: &str, results: &[SearchResult]) -> String {
    let mut prompt = format!(
        "A user searched the web for: \"{}\"\n\nThe search returned these results:\n\n",
        query
    );

    for (rank, result) in results.iter().enumerate() {
        // writeln! to a String cannot fail
        let _ = writeln!(
            prompt,
            "{}. {}\n   Link: {}\n   Snippet: {}\n",
            rank + 1,
            result.title,
            result.link,
            result.snippet
        );
    }

    prompt.push_str(
        "Write a concise summary of the main themes across these results. \
         Format the answer in Markdown with headings and bullet points where \
         helpful, and finish with a short list of the most relevant links.",
    );
    prompt
}

/// Summarize the results for a query, calling the model at most once.
pub async fn analyze<G>(provider: &G, query: &str, results: &[SearchResult]) -> Analysis
where
    G: GenerationProvider + ?Sized,
{
    if results.is_empty() {
        return Analysis::NoResults;
    }

    let prompt = build_prompt(query, results);
    match provider.generate(&prompt).await {
        Ok(text) => Analysis::Summary(text),
        Err(e) => {
            error!(error = %e, "failed to analyze search results");
            Analysis::Failed
        }
    }
}
