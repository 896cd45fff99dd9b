//! Output formatter
//!
//! Whitespace normalisation and the generated-file header. The formatter
//! never parses the code it is given.

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// First line of every generated header; used to recognise formatted text.
pub const HEADER_MARKER: &str = "/**\n * Auto-generated test file";

static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Clone)]
pub struct Formatter {
    generated_at: DateTime<Utc>,
}

impl Formatter {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn header(&self) -> String {
        format!(
            "{}\n *\n * Generated by ng-testgen. Review and complete the TODO markers\n * before relying on these tests.\n *\n * Generated at: {}\n */\n\n",
            HEADER_MARKER,
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }

    /// Normalise whitespace and prepend the header once.
    pub fn format(&self, code: &str) -> String {
        let stripped = TRAILING_WHITESPACE.replace_all(code, "");
        let collapsed = EXTRA_BLANK_LINES.replace_all(&stripped, "\n\n");

        if collapsed.starts_with(HEADER_MARKER) {
            return ensure_trailing_newline(collapsed.into_owned());
        }

        let body = collapsed.trim_start_matches('\n');
        ensure_trailing_newline(format!("{}{}", self.header(), body))
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::now()
    }
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn formatter() -> Formatter {
        Formatter::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
    }

    #[test]
    fn should_prepend_header_with_timestamp() {
        let out = formatter().format("describe('A', () => {});");
        assert!(out.starts_with(HEADER_MARKER));
        assert!(out.contains("Generated at: 2024-05-01T12:30:00Z"));
        assert!(out.ends_with("describe('A', () => {});\n"));
    }

    #[test]
    fn should_collapse_blank_lines_and_strip_trailing_whitespace() {
        let out = formatter().format("a  \n\n\n\nb\t\n \n\n\nc");
        let body = out.split_once(" */\n\n").map(|(_, body)| body).unwrap();
        assert_eq!(body, "a\n\nb\n\nc\n");
    }

    #[test]
    fn should_be_idempotent() {
        let f = formatter();
        let once = f.format("const a = 1;   \n\n\n\nconst b = 2;");
        let twice = f.format(&once);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("Auto-generated test file").count(), 1);
    }

    #[test]
    fn should_keep_timestamp_fixed_per_instance() {
        let f = formatter();
        assert_eq!(f.format("x"), f.format("x"));
    }
}
