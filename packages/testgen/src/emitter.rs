//! Spec Emitter
//!
//! Line-oriented writer used by every template. Lines carry their own
//! indentation level so nested `describe`/`it` blocks can be emitted without
//! tracking whitespace by hand.

use once_cell::sync::Lazy;
use regex::Regex;

const INDENT_WITH: &str = "  ";

static LEGAL_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").unwrap());

#[derive(Debug, Clone)]
struct EmittedLine {
    indent: usize,
    text: String,
}

#[derive(Debug, Default)]
pub struct SpecEmitter {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl SpecEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one line at the current indentation.
    pub fn println(&mut self, line: impl Into<String>) {
        self.lines.push(EmittedLine {
            indent: self.indent,
            text: line.into(),
        });
    }

    /// Emit every line of `text`, keeping its relative indentation.
    pub fn println_all(&mut self, text: &str) {
        for line in text.lines() {
            self.println(line);
        }
    }

    pub fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| !line.text.is_empty()) {
            self.println("");
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Emit `open`, the indented body, then `close`.
    pub fn block<F>(&mut self, open: impl Into<String>, close: &str, body: F)
    where
        F: FnOnce(&mut Self),
    {
        self.println(open);
        self.inc_indent();
        body(self);
        self.dec_indent();
        if self.lines.last().is_some_and(|line| line.text.is_empty()) {
            self.lines.pop();
        }
        self.println(close);
    }

    pub fn to_source(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                if line.text.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", INDENT_WITH.repeat(line.indent), line.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Single-quoted TypeScript string literal.
pub fn quote(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("'{}'", escaped)
}

pub fn is_legal_identifier(text: &str) -> bool {
    LEGAL_IDENTIFIER.is_match(text)
}

/// Property access expression: `obj.name`, or `obj['na-me']` when needed.
pub fn member_access(object: &str, property: &str) -> String {
    if is_legal_identifier(property) {
        format!("{}.{}", object, property)
    } else {
        format!("{}[{}]", object, quote(property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_indent_nested_blocks() {
        let mut emitter = SpecEmitter::new();
        emitter.block("describe('A', () => {", "});", |e| {
            e.block("it('works', () => {", "});", |e| {
                e.println("expect(true).toBe(true);");
            });
        });
        assert_eq!(
            emitter.to_source(),
            "describe('A', () => {\n  it('works', () => {\n    expect(true).toBe(true);\n  });\n});"
        );
    }

    #[test]
    fn should_not_emit_consecutive_blank_lines() {
        let mut emitter = SpecEmitter::new();
        emitter.blank_line();
        emitter.println("a");
        emitter.blank_line();
        emitter.blank_line();
        emitter.println("b");
        assert_eq!(emitter.to_source(), "a\n\nb");
    }

    #[test]
    fn should_drop_trailing_blank_line_inside_block() {
        let mut emitter = SpecEmitter::new();
        emitter.block("{", "}", |e| {
            e.println("x;");
            e.blank_line();
        });
        assert_eq!(emitter.to_source(), "{\n  x;\n}");
    }

    #[test]
    fn should_escape_quotes() {
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn should_use_bracket_access_for_illegal_names() {
        assert_eq!(member_access("component", "value"), "component.value");
        assert_eq!(member_access("component", "aria-label"), "component['aria-label']");
    }
}
