pub mod src;

pub use src::capturing_logger::CapturingLogger;
pub use src::console_logger::ConsoleLogger;
pub use src::logger::{LogLevel, Logger, NullLogger};
