//! tsconfig.json discovery
//!
//! The nearest `tsconfig.json` above the analyzed file seeds the parser
//! settings. Only the handful of compiler options that influence parsing are
//! read; everything else in the file is ignored.

use std::fs;
use std::path::{Path, PathBuf};

use oxc_span::SourceType;
use serde::Deserialize;

use crate::logging::Logger;

pub const TSCONFIG_FILE: &str = "tsconfig.json";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub experimental_decorators: Option<bool>,
    pub use_define_for_class_fields: Option<bool>,
    pub target: Option<String>,
    pub jsx: Option<String>,
    pub strict: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: ProjectConfig = serde_json::from_str(&strip_json_comments(content))?;
        Ok(config)
    }

    /// Load the config nearest to `file`. Problems are logged, never returned.
    pub fn discover(file: &Path, logger: &dyn Logger) -> Option<(PathBuf, ProjectConfig)> {
        let path = find_tsconfig(file)?;
        match Self::load(&path) {
            Ok(config) => {
                logger.debug(&format!("Using {}", path.display()));
                Some((path, config))
            }
            Err(err) => {
                logger.warn(&format!("Ignoring {}: {}", path.display(), err));
                None
            }
        }
    }
}

/// Walk from the file's directory up to the root looking for `tsconfig.json`.
pub fn find_tsconfig(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_dir() {
        Some(start)
    } else {
        start.parent()
    };
    while let Some(current) = dir {
        let candidate = current.join(TSCONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

/// Parser configuration for one source file.
#[derive(Debug, Clone, Copy)]
pub struct ParserSettings {
    pub source_type: SourceType,
    /// `experimentalDecorators` as declared by the project, if any.
    pub experimental_decorators: Option<bool>,
}

impl ParserSettings {
    pub fn for_file(path: &Path, config: Option<&ProjectConfig>) -> Self {
        let source_type = SourceType::from_path(path)
            .unwrap_or_else(|_| SourceType::default().with_typescript(true).with_module(true));
        Self {
            source_type,
            experimental_decorators: config.and_then(|c| c.compiler_options.experimental_decorators),
        }
    }

    /// The project turned legacy decorators off explicitly.
    pub fn decorators_disabled(&self) -> bool {
        self.experimental_decorators == Some(false)
    }
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            source_type: SourceType::default().with_typescript(true).with_module(true),
            experimental_decorators: None,
        }
    }
}

/// Drop `//` and `/* */` comments and trailing commas, leaving strings intact.
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = input.chars().collect();

    for (index, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[index + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{CapturingLogger, LogLevel};

    #[test]
    fn should_strip_comments_outside_strings() {
        let input = r#"{
  // line comment
  "a": "http://example.com", /* block */
  "b": 1
}"#;
        let value: serde_json::Value = serde_json::from_str(&strip_json_comments(input)).unwrap();
        assert_eq!(value["a"], "http://example.com");
        assert_eq!(value["b"], 1);
    }

    #[test]
    fn should_remove_trailing_commas() {
        let input = "{ \"a\": [1, 2,], \"b\": \"x,}\", }";
        let value: serde_json::Value = serde_json::from_str(&strip_json_comments(input)).unwrap();
        assert_eq!(value["a"], serde_json::json!([1, 2]));
        assert_eq!(value["b"], "x,}");
    }

    #[test]
    fn should_read_compiler_options() {
        let config = ProjectConfig::parse(
            r#"{
  "extends": "./tsconfig.base.json",
  "compilerOptions": {
    "experimentalDecorators": true,
    "target": "ES2022",
    "paths": { "@app/*": ["src/app/*"] }
  }
}"#,
        )
        .unwrap();
        assert_eq!(config.extends.as_deref(), Some("./tsconfig.base.json"));
        assert_eq!(config.compiler_options.experimental_decorators, Some(true));
        assert_eq!(config.compiler_options.target.as_deref(), Some("ES2022"));
    }

    #[test]
    fn should_find_the_nearest_tsconfig() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src/app");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(TSCONFIG_FILE), "{}").unwrap();
        let file = nested.join("app.component.ts");
        fs::write(&file, "").unwrap();

        assert_eq!(find_tsconfig(&file), Some(dir.path().join(TSCONFIG_FILE)));
    }

    #[test]
    fn should_log_and_ignore_malformed_configs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TSCONFIG_FILE), "{ not json").unwrap();
        let file = dir.path().join("a.ts");

        let logger = CapturingLogger::default();
        assert!(ProjectConfig::discover(&file, &logger).is_none());
        assert!(logger.contains(LogLevel::Warn, "Ignoring"));
    }

    #[test]
    fn should_derive_settings_from_extension_and_config() {
        let mut config = ProjectConfig::default();
        config.compiler_options.experimental_decorators = Some(false);

        let settings = ParserSettings::for_file(Path::new("a.component.ts"), Some(&config));
        assert!(settings.source_type.is_typescript());
        assert!(settings.decorators_disabled());

        let tsx = ParserSettings::for_file(Path::new("widget.tsx"), None);
        assert!(tsx.source_type.is_jsx());
        assert!(!tsx.decorators_disabled());
    }
}
