//! Import collection for generated specs
//!
//! Templates register symbols while they render; the set is turned into
//! import statements once the body is complete.

use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Default, Clone)]
pub struct ImportSet {
    modules: IndexMap<String, IndexSet<String>>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, symbol: impl Into<String>, from: impl Into<String>) {
        self.modules
            .entry(from.into())
            .or_default()
            .insert(symbol.into());
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.modules.values().any(|symbols| symbols.contains(symbol))
    }

    /// One statement per module: `@angular/*` first, then alphabetical.
    pub fn render(&self) -> Vec<String> {
        let mut modules: Vec<(&String, &IndexSet<String>)> = self.modules.iter().collect();
        modules.sort_by(|(a, _), (b, _)| {
            let a_angular = a.starts_with("@angular");
            let b_angular = b.starts_with("@angular");
            b_angular.cmp(&a_angular).then_with(|| a.cmp(b))
        });

        modules
            .into_iter()
            .map(|(from, symbols)| {
                let names: Vec<&str> = symbols.iter().map(String::as_str).collect();
                format!("import {{ {} }} from '{}';", names.join(", "), from)
            })
            .collect()
    }
}
