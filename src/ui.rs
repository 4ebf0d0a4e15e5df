//! Terminal rendering for summaries and raw result lists.
//!
//! Both render paths go through the same small markdown-to-ANSI pass so the
//! output style is consistent whether or not the user asked for analysis.

use crate::search::SearchResult;
use colored::Colorize;

/// Shown when the raw-list path has nothing to display
pub const NO_RESULTS_LINE: &str = "No search results found.";

/// Human label used for result links
const LINK_LABEL: &str = "View source";

/// Render lightweight markdown for the terminal.
///
/// Handles `#`/`##`/`###` headings, `-`/`*` bullets, `>` blockquotes, and
/// the inline spans `**bold**`, `*italic*`, `` `code` `` and `[label](url)`.
/// Anything unrecognised passes through untouched.
pub fn render_markdown(text: &str) -> String {
    text.lines()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a summary for display
pub fn format_summary(text: &str) -> String {
    render_markdown(text)
}

/// Format a raw result list for display.
///
/// Each result becomes a markdown block (ranked heading, quoted snippet,
/// labelled link) rendered through the same formatter as summaries.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS_LINE.to_string();
    }

    let blocks: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(rank, result)| {
            let block = format!(
                "### {}. {}\n> {}\n[{}]({})",
                rank + 1,
                result.title,
                result.snippet,
                LINK_LABEL,
                result.link
            );
            render_markdown(&block)
        })
        .collect();

    blocks.join("\n\n")
}

fn render_line(line: &str) -> String {
    if let Some(heading) = line.strip_prefix("# ") {
        return heading.bold().underline().to_string();
    }
    if let Some(heading) = line.strip_prefix("## ") {
        return heading.bold().underline().to_string();
    }
    if let Some(heading) = line.strip_prefix("### ") {
        return heading.bold().to_string();
    }
    if let Some(quote) = line.strip_prefix("> ") {
        return format!("  {}", quote.italic());
    }
    if let Some(item) = line.strip_prefix("- ") {
        return format!("  • {}", render_inline(item));
    }
    if let Some(item) = line.strip_prefix("* ") {
        return format!("  • {}", render_inline(item));
    }
    render_inline(line)
}

fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(['*', '`', '[']) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];

        let taken = if rest.starts_with("**") {
            take_span(rest, "**").map(|(body, tail)| (body.bold().to_string(), tail))
        } else if rest.starts_with('*') {
            take_span(rest, "*").map(|(body, tail)| (body.italic().to_string(), tail))
        } else if rest.starts_with('`') {
            take_span(rest, "`").map(|(body, tail)| (body.yellow().to_string(), tail))
        } else {
            take_link(rest)
        };

        match taken {
            Some((rendered, tail)) => {
                out.push_str(&rendered);
                rest = tail;
            }
            None => {
                // Lone marker with no closing partner, emit it verbatim
                let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                out.push_str(&rest[..ch_len]);
                rest = &rest[ch_len..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Split `*body*`-style spans: returns the body and the remainder after
/// the closing delimiter, or None when the span never closes.
fn take_span<'a>(s: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let body = s.strip_prefix(delim)?;
    let end = body.find(delim)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + delim.len()..]))
}

/// Split `[label](url)` links into "label (url)" with the url highlighted.
fn take_link(s: &str) -> Option<(String, &str)> {
    let body = s.strip_prefix('[')?;
    let close = body.find(']')?;
    let label = &body[..close];
    let target = body[close + 1..].strip_prefix('(')?;
    let end = target.find(')')?;
    let url = &target[..end];

    let rendered = format!("{} ({})", label.bold(), url.blue().underline());
    Some((rendered, &target[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn sample_results() -> Vec<SearchResult> {
        vec![
            SearchResult {
                title: "A".to_string(),
                link: "http://a".to_string(),
                snippet: "sa".to_string(),
            },
            SearchResult {
                title: "B".to_string(),
                link: "http://b".to_string(),
                snippet: "sb".to_string(),
            },
        ]
    }

    #[test]
    fn empty_result_set_renders_the_fixed_line_only() {
        plain();
        assert_eq!(format_results(&[]), "No search results found.");
    }

    #[test]
    fn results_render_in_rank_order_with_links() {
        plain();
        let out = format_results(&sample_results());

        let first = out.find("1. A").expect("first result heading");
        let second = out.find("2. B").expect("second result heading");
        assert!(first < second);
        assert!(out.contains("View source (http://a)"));
        assert!(out.contains("View source (http://b)"));
        assert!(out.contains("sa"));
    }

    #[test]
    fn headings_lose_their_markers() {
        plain();
        assert_eq!(render_markdown("# Title"), "Title");
        assert_eq!(render_markdown("### Sub"), "Sub");
    }

    #[test]
    fn bullets_become_dots() {
        plain();
        assert_eq!(render_markdown("- one\n* two"), "  • one\n  • two");
    }

    #[test]
    fn inline_spans_lose_their_markers() {
        plain();
        assert_eq!(render_markdown("**bold** and *soft* and `code`"), "bold and soft and code");
    }

    #[test]
    fn links_show_label_and_url() {
        plain();
        assert_eq!(render_markdown("see [docs](http://d)"), "see docs (http://d)");
    }

    #[test]
    fn unmatched_markers_pass_through() {
        plain();
        assert_eq!(render_markdown("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(render_markdown("a [bracket"), "a [bracket");
    }

    #[test]
    fn summary_and_list_paths_share_the_formatter() {
        plain();
        let summary = format_summary("### 1. A");
        let list = format_results(&sample_results()[..1]);
        assert!(list.starts_with(&summary));
    }
}
