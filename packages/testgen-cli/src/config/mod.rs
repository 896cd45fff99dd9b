pub mod tsconfig;

pub use tsconfig::{find_tsconfig, strip_json_comments, CompilerOptions, ParserSettings, ProjectConfig};
