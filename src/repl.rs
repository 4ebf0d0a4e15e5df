//! Interactive search loop.
//!
//! Owns the prompt → confirm → search → render cycle over injected
//! input/output streams and provider handles. Failures never cross an
//! iteration boundary: the loop logs to the diagnostic stream and
//! re-issues the query prompt.

use crate::agent::GenerationProvider;
use crate::search::SearchProvider;
use crate::summary;
use crate::ui;
use std::io::{self, BufRead, Write};
use tracing::error;

/// Query prompt, part of the observable contract
pub const QUERY_PROMPT: &str = "Enter your search query (or type \"exit\"): ";

/// Analysis confirmation prompt, part of the observable contract
pub const ANALYZE_PROMPT: &str =
    "Do you want to analyze the search results with Gemini? (yes/no): ";

/// Printed when the user submits an empty query
pub const EMPTY_QUERY_NOTICE: &str = "Search query cannot be empty.";

/// The interactive loop.
///
/// Holds the only long-lived handles of a session: the input reader, the
/// user-facing output writer, and the two provider clients built at
/// startup.
pub struct Repl<'a, R, W> {
    input: R,
    output: W,
    search: &'a dyn SearchProvider,
    gemini: &'a dyn GenerationProvider,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(
        input: R,
        output: W,
        search: &'a dyn SearchProvider,
        gemini: &'a dyn GenerationProvider,
    ) -> Self {
        Self {
            input,
            output,
            search,
            gemini,
        }
    }

    /// Drive the loop until the user types `exit` or the input stream ends.
    ///
    /// Only I/O errors on the session's own streams escape; provider
    /// failures are contained per iteration.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let query = match self.prompt(QUERY_PROMPT)? {
                Some(line) => line,
                None => break,
            };

            // Case-folded comparison only; surrounding whitespace makes it
            // a query, not a command.
            if query.eq_ignore_ascii_case("exit") {
                break;
            }

            if query.is_empty() {
                writeln!(self.output, "{}", EMPTY_QUERY_NOTICE)?;
                continue;
            }

            let analyze = match self.prompt(ANALYZE_PROMPT)? {
                Some(choice) => is_yes(&choice),
                None => break,
            };

            self.run_query(&query, analyze).await?;
        }

        Ok(())
    }

    /// Print a prompt and read one line. None means end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }

    /// One search iteration: search, then either analyze or list.
    async fn run_query(&mut self, query: &str, analyze: bool) -> io::Result<()> {
        match self.search.search(query).await {
            Err(e) => {
                error!(error = %e, query, "search failed");
            }
            Ok(results) => {
                if analyze {
                    let analysis = summary::analyze(self.gemini, query, &results).await;
                    writeln!(self.output, "{}", ui::format_summary(analysis.text()))?;
                } else {
                    writeln!(self.output, "{}", ui::format_results(&results))?;
                }
            }
        }

        Ok(())
    }
}

/// Drop the line terminator, nothing else
fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

fn is_yes(choice: &str) -> bool {
    choice.eq_ignore_ascii_case("yes") || choice.eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_newline_handles_unix_and_windows_endings() {
        assert_eq!(strip_newline("query\n".to_string()), "query");
        assert_eq!(strip_newline("query\r\n".to_string()), "query");
        assert_eq!(strip_newline("query".to_string()), "query");
    }

    #[test]
    fn strip_newline_keeps_interior_whitespace() {
        assert_eq!(strip_newline(" exit \n".to_string()), " exit ");
    }

    #[test]
    fn yes_and_y_confirm_case_insensitively() {
        assert!(is_yes("yes"));
        assert!(is_yes("YES"));
        assert!(is_yes("y"));
        assert!(is_yes("Y"));
    }

    #[test]
    fn anything_else_declines() {
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
        assert!(!is_yes("yeah"));
        assert!(!is_yes(" yes"));
    }
}
