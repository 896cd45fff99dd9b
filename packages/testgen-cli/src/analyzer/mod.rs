pub mod src;

pub use src::class_analyzer::{analyze_file, analyze_source};
pub use src::error::AnalyzeError;

#[cfg(test)]
mod test;
