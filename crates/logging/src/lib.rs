use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Mutex;

// Every message of the process, kept so callers can replay or attach them
static ENTRIES: Lazy<Mutex<Vec<LogEntry>>> = Lazy::new(|| Mutex::new(Vec::new()));

// Minimum level echoed to the console
static CONSOLE_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Warning));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}",
            self.timestamp.format("%H:%M:%S"),
            self.level.prefix(),
            self.message
        )
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current) = CONSOLE_LEVEL.lock() {
        *current = level;
    }
}

pub fn get_log_level() -> LogLevel {
    CONSOLE_LEVEL
        .lock()
        .map(|level| *level)
        .unwrap_or(LogLevel::Warning)
}

/// Record a message and echo it when it reaches the console level.
pub fn log(level: LogLevel, message: &str) {
    let entry = LogEntry {
        timestamp: Local::now(),
        level,
        message: message.to_string(),
    };

    if level >= get_log_level() {
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
            _ => println!("{}", entry),
        }
    }

    if let Ok(mut entries) = ENTRIES.lock() {
        entries.push(entry);
    }
}

pub fn entries() -> Vec<LogEntry> {
    ENTRIES
        .lock()
        .map(|entries| entries.clone())
        .unwrap_or_default()
}

pub fn clear() {
    if let Ok(mut entries) = ENTRIES.lock() {
        entries.clear();
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests share the global log, serialize the ones that read it back
    static LOG_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_messages_are_recorded_below_console_level() {
        let _guard = LOG_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        info("recorded-but-quiet 7f3a");

        let found = entries()
            .into_iter()
            .find(|entry| entry.message == "recorded-but-quiet 7f3a")
            .expect("entry should be recorded");
        assert_eq!(found.level, LogLevel::Info);
    }

    #[test]
    fn test_formatted_entry_has_timestamp_and_prefix() {
        let _guard = LOG_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        error("formatted-check 91bc");

        let line = entries()
            .iter()
            .map(ToString::to_string)
            .find(|line| line.ends_with("formatted-check 91bc"))
            .expect("formatted line should exist");
        assert!(line.starts_with('['));
        assert!(line.contains("❌"));
    }

    #[test]
    fn test_clear_empties_the_log() {
        let _guard = LOG_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        warning("about to be cleared 4d2e");
        assert!(!entries().is_empty());

        clear();
        assert!(entries().is_empty());
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }
}
