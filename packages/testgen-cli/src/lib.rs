#![deny(clippy::all)]

/**
 * ng-testgen-cli - Angular source analysis and spec file driver
 *
 * Reads Angular TypeScript sources with oxc, describes their main class and
 * writes the generated Jest spec next to each source file
 */
// Re-export the generator library for convenience
pub use ng_testgen as generator;

// CLI-specific modules
pub mod analyzer;
pub mod config;
pub mod driver;
pub mod logging;
pub mod main_entry;
