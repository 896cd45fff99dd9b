//! Spec templates
//!
//! One template per supported class kind. Each renders raw spec text from a
//! [`ClassDescription`]; [`TestGenerator`] picks the template and runs the
//! result through the [`Formatter`].

mod common;
mod component;
mod directive;
mod pipe;
mod service;

use chrono::{DateTime, Utc};

use crate::class_description::ClassDescription;
use crate::error::GenerateError;
use crate::formatter::Formatter;
use crate::kind::ClassKind;

pub use component::render_component_spec;
pub use directive::render_directive_spec;
pub use pipe::render_pipe_spec;
pub use service::render_service_spec;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Timestamp written into the generated header.
    pub generated_at: DateTime<Utc>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TestGenerator {
    formatter: Formatter,
}

impl TestGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            formatter: Formatter::new(options.generated_at),
        }
    }

    /// Raw spec text for the class, before formatting.
    pub fn render(&self, desc: &ClassDescription) -> Result<String, GenerateError> {
        match desc.kind {
            ClassKind::Component => Ok(render_component_spec(desc)),
            ClassKind::Service => Ok(render_service_spec(desc)),
            ClassKind::Pipe => Ok(render_pipe_spec(desc)),
            ClassKind::Directive => Ok(render_directive_spec(desc)),
            ClassKind::Unknown => Err(GenerateError::UnsupportedKind {
                class_name: desc.class_name.clone(),
                kind: desc.kind,
            }),
        }
    }

    /// Formatted spec file contents, header included.
    pub fn generate(&self, desc: &ClassDescription) -> Result<String, GenerateError> {
        let raw = self.render(desc)?;
        Ok(self.formatter.format(&raw))
    }
}

impl Default for TestGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_unknown_kind() {
        let desc = ClassDescription::new("Plain", "plain.ts", ClassKind::Unknown);
        let err = TestGenerator::default().generate(&desc).unwrap_err();
        assert_eq!(
            err,
            GenerateError::UnsupportedKind {
                class_name: "Plain".into(),
                kind: ClassKind::Unknown
            }
        );
        assert!(err.to_string().contains("Plain"));
    }

    #[test]
    fn should_dispatch_on_kind() {
        let generator = TestGenerator::default();
        for (kind, marker) in [
            (ClassKind::Component, "ComponentFixture"),
            (ClassKind::Service, "TestBed.inject(Thing)"),
            (ClassKind::Pipe, "let pipe: Thing;"),
            (ClassKind::Directive, "By.directive(Thing)"),
        ] {
            let desc = ClassDescription::new("Thing", "thing.ts", kind);
            let out = generator.generate(&desc).unwrap();
            assert!(out.contains(marker), "{kind}: missing {marker}\n{out}");
        }
    }
}
