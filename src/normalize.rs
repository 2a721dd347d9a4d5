//! Whitespace and indentation normalization for rendered template text.
//!
//! Templates are written by humans, indented to match the surrounding
//! template logic. These functions turn that output back into clean text:
//! blank edges are dropped, whitespace-only lines are emptied and the common
//! left margin is removed (or moved to a chosen column) without touching the
//! relative indentation between lines, much like Ruby's `<<~` heredoc.
//!
//! Every function here is total: any `&str`, including `""`, produces a value.
//! Lines are split on `\n`; a trailing `\r` belongs to the line terminator.

use regex::Regex;
use std::sync::LazyLock;

/// Leading space/tab run of every line that has content after it.
static MARGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)[^ \t\r\n]").expect("margin pattern is valid")
});

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

fn leading_run(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Removes whitespace-only lines from the top and the bottom of `text`.
///
/// Interior blank lines are kept as they are. Input that is nothing but
/// whitespace becomes `""`.
///
/// ```
/// assert_eq!(envp::normalize::trim_edges("\n\n1\n2\n\n"), "1\n2");
/// ```
pub fn trim_edges(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return String::new();
    };
    let last = lines.iter().rposition(|line| !is_blank(line)).unwrap_or(first);

    let mut trimmed = lines[first..=last].join("\n");
    trimmed.truncate(trimmed.trim_end_matches('\r').len());
    trimmed
}

/// Empties every line made only of spaces and tabs, keeping the line itself.
///
/// ```
/// assert_eq!(envp::normalize::trim_empty("1\n        \n2"), "1\n\n2");
/// ```
pub fn trim_empty(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let body = line.trim_end_matches('\r');
            if is_blank(body) {
                &line[body.len()..]
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Empties whitespace-only lines, then trims blank lines off both edges.
pub fn strip(text: &str) -> String {
    trim_edges(&trim_empty(text))
}

/// The margin shared by every non-blank line of `text`.
///
/// Returns `None` when there is nothing to strip: the text has no content at
/// all, or at least one content line starts at column zero.
pub fn min_indent(text: &str) -> Option<usize> {
    MARGIN
        .captures_iter(text)
        .map(|caps| caps[1].len())
        .min()
        .filter(|&margin| margin > 0)
}

fn rebase(text: &str, width: Option<usize>) -> String {
    let text = trim_edges(text);
    let margin = match (min_indent(&text), width) {
        (None, None) => return text,
        (margin, _) => margin.unwrap_or(0),
    };

    let pad = " ".repeat(width.unwrap_or(0));
    text.split('\n')
        .map(|line| {
            if leading_run(line) < margin {
                return line.to_string();
            }
            let rest = &line[margin..];
            if is_blank(rest) {
                rest.to_string()
            } else {
                format!("{pad}{rest}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips the common margin so the text starts at column zero.
///
/// Blank edges are removed first. Relative indentation is preserved:
///
/// ```
/// use envp::normalize::reindent;
///
/// assert_eq!(reindent("\n\n\t1\n\t  2\n\t3"), "1\n  2\n3");
/// ```
pub fn reindent(text: &str) -> String {
    rebase(text, None)
}

/// Like [`reindent`], but moves the text to column `width` instead of zero.
///
/// Blank lines are never padded.
///
/// ```
/// use envp::normalize::indent;
///
/// assert_eq!(indent("\n\n\t1\n\t  2\n\t3", 2), "  1\n    2\n  3");
/// ```
pub fn indent(text: &str, width: usize) -> String {
    rebase(text, Some(width))
}

/// Trims `text` and prefixes it with exactly `n` spaces.
///
/// Lets `{%- -%}` whitespace control swallow the surroundings while still
/// keeping a separating space.
pub fn add_space(text: &str, n: usize) -> String {
    format!("{}{}", " ".repeat(n), text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t \r"));
        assert!(!is_blank("  a"));
    }

    #[test]
    fn test_leading_run() {
        assert_eq!(leading_run("\t  x"), 3);
        assert_eq!(leading_run("x  "), 0);
        assert_eq!(leading_run("   "), 3);
    }
}
