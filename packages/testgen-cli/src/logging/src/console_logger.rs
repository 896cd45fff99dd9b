// Console Logger
//
// Info goes to stdout, everything else to stderr. Tags are coloured only
// when the target stream is a terminal.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

use super::logger::{LogLevel, Logger};

pub struct ConsoleLogger {
    level: LogLevel,
    colored: bool,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        let colored = std::io::stdout().is_terminal() && std::io::stderr().is_terminal();
        Self::with_color(level, colored)
    }

    pub fn with_color(level: LogLevel, colored: bool) -> Self {
        Self { level, colored }
    }

    fn tag(&self, level: LogLevel) -> String {
        let tag = format!("[{}]", level.tag());
        if !self.colored {
            return tag;
        }
        match level {
            LogLevel::Debug => tag.dimmed().to_string(),
            LogLevel::Info => tag.green().to_string(),
            LogLevel::Warn => tag.yellow().to_string(),
            LogLevel::Error => tag.red().bold().to_string(),
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        if self.is_enabled(LogLevel::Debug) {
            eprintln!("{} {}", self.tag(LogLevel::Debug), msg);
        }
    }

    fn info(&self, msg: &str) {
        if self.is_enabled(LogLevel::Info) {
            println!("{} {}", self.tag(LogLevel::Info), msg);
        }
    }

    fn warn(&self, msg: &str) {
        if self.is_enabled(LogLevel::Warn) {
            eprintln!("{} {}", self.tag(LogLevel::Warn), msg);
        }
    }

    fn error(&self, msg: &str) {
        if self.is_enabled(LogLevel::Error) {
            eprintln!("{} {}", self.tag(LogLevel::Error), msg);
        }
    }

    fn output(&self, text: &str) {
        println!("{}", text);
    }
}
