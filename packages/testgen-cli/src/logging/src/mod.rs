pub mod capturing_logger;
pub mod console_logger;
pub mod logger;
