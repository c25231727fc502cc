use std::{
    fmt::Display,
    io::{stderr, Write},
    panic::Location,
};

use chrono::Local;

/// Message severities, ordered lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl LogLevel {
    fn colour(self) -> &'static str {
        match self {
            Self::Debug => "38;5;39",
            Self::Info => "38;5;231",
            Self::Warn => "38;5;226",
            Self::Error => "38;5;196",
            Self::Critical => "31;1",
        }
    }
}

pub fn ansi<T: Display, U: Display>(x: T, y: U) -> String {
    format!("\x1b[{y}m{x}\x1b[0m")
}

/// Console logger writing colour-coded, `|`-separated records to
/// stderr. Every record carries the call site's file name and line;
/// the logger name and a timestamp are opt-in prefixes. Windows
/// consoles get the records uncoloured.
pub struct Logger {
    name: String,
    level: LogLevel,
    show_name: bool,
    show_time: bool,
}

impl Logger {
    pub fn new(name: &str, level: LogLevel) -> Self {
        Self { name: name.to_string(), level, show_name: false, show_time: false }
    }

    /// Prefixes each record with the logger's name.
    pub fn show_name(mut self, show: bool) -> Self {
        self.show_name = show;
        self
    }

    /// Prefixes each record with a timestamp.
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg, Location::caller());
    }

    #[track_caller]
    pub fn critical(&self, msg: &str) {
        self.log(LogLevel::Critical, msg, Location::caller());
    }

    fn log(&self, level: LogLevel, msg: &str, caller: &Location) {
        if let Some(record) = self.render(level, msg, caller) {
            let _ = writeln!(stderr(), "{record}");
        }
    }

    fn render(&self, level: LogLevel, msg: &str, caller: &Location) -> Option<String> {
        if level < self.level {
            return None;
        }

        let mut record = String::new();

        if self.show_name {
            record.push_str(&self.name);
            record.push_str(" | ");
        }

        if self.show_time {
            record.push_str(&format!("{} | ", Local::now().format("%Y-%m-%d %H:%M:%S")));
        }

        let file = caller.file().rsplit(['/', '\\']).next().unwrap_or(caller.file());
        record.push_str(&format!("{file} | {} | {msg}", caller.line()));

        if cfg!(windows) {
            Some(record)
        } else {
            Some(ansi(record, level.colour()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }

    #[test]
    fn records_carry_the_call_site() {
        let logger = Logger::new("tester", LogLevel::Debug);
        let caller = Location::caller();

        let record = logger.render(LogLevel::Info, "hello", caller).unwrap();
        assert!(record.contains("logger.rs"), "{record}");
        assert!(record.contains(&format!(" | {} | hello", caller.line())), "{record}");
    }

    #[test]
    fn records_below_the_threshold_are_dropped() {
        let logger = Logger::new("tester", LogLevel::Warn);
        let caller = Location::caller();

        assert!(logger.render(LogLevel::Debug, "quiet", caller).is_none());
        assert!(logger.render(LogLevel::Info, "quiet", caller).is_none());
        assert!(logger.render(LogLevel::Warn, "loud", caller).is_some());
        assert!(logger.render(LogLevel::Critical, "loud", caller).is_some());
    }

    #[test]
    fn name_and_time_are_opt_in() {
        let caller = Location::caller();

        let bare = Logger::new("tester", LogLevel::Debug);
        let record = bare.render(LogLevel::Info, "msg", caller).unwrap();
        assert!(!record.contains("tester"));
        assert_eq!(record.matches(" | ").count(), 2);

        let named = Logger::new("tester", LogLevel::Debug).show_name(true);
        let record = named.render(LogLevel::Info, "msg", caller).unwrap();
        assert!(record.contains("tester | "));
        assert_eq!(record.matches(" | ").count(), 3);

        let full = Logger::new("tester", LogLevel::Debug).show_name(true).show_time(true);
        let record = full.render(LogLevel::Info, "msg", caller).unwrap();
        assert_eq!(record.matches(" | ").count(), 4);
    }

    #[cfg(not(windows))]
    #[test]
    fn records_are_colour_coded_per_level() {
        let logger = Logger::new("tester", LogLevel::Debug);
        let caller = Location::caller();

        for (level, colour) in [
            (LogLevel::Debug, "38;5;39"),
            (LogLevel::Info, "38;5;231"),
            (LogLevel::Warn, "38;5;226"),
            (LogLevel::Error, "38;5;196"),
            (LogLevel::Critical, "31;1"),
        ] {
            let record = logger.render(level, "msg", caller).unwrap();
            assert!(record.starts_with(&format!("\x1b[{colour}m")), "{record:?}");
            assert!(record.ends_with("\x1b[0m"), "{record:?}");
        }
    }

    #[test]
    fn every_level_logs_without_panicking() {
        let logger = Logger::new("tester", LogLevel::Debug).show_name(true).show_time(true);
        logger.debug("debug record");
        logger.info("info record");
        logger.warn("warn record");
        logger.error("error record");
        logger.critical("critical record");
    }
}
