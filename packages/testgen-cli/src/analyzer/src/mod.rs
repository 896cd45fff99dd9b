pub mod body;
pub mod class_analyzer;
pub mod error;
pub mod host;
pub mod types;
