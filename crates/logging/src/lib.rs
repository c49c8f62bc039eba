use chrono::Local;
use colored::*;
use once_cell::sync::Lazy;
use std::fmt;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Oldest entries are dropped once the buffer holds this many.
pub const MAX_ENTRIES: usize = 1000;

// Only entries that pass the threshold are kept
static ENTRIES: Lazy<Arc<Mutex<VecDeque<LogEntry>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

static THRESHOLD: Lazy<Arc<Mutex<LogLevel>>> =
    Lazy::new(|| Arc::new(Mutex::new(LogLevel::Warning)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Console threshold for the global `--verbose` / `--debug` flags.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warning
        }
    }

    fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DEBUG".dimmed(),
            LogLevel::Info => "INFO ".blue(),
            LogLevel::Warning => "WARN ".yellow(),
            LogLevel::Error => "ERROR".red().bold(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.timestamp, self.level.tag(), self.message)
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut threshold) = THRESHOLD.lock() {
        *threshold = level;
    }
}

pub fn get_log_level() -> LogLevel {
    THRESHOLD
        .lock()
        .map(|threshold| *threshold)
        .unwrap_or(LogLevel::Warning)
}

pub fn log(level: LogLevel, message: &str) {
    if level < get_log_level() {
        return;
    }

    let entry = LogEntry {
        timestamp: Local::now().format("%H:%M:%S").to_string(),
        level,
        message: message.to_string(),
    };

    // Diagnostics go to stderr so stdout stays clean for reports
    eprintln!("{}", entry);

    if let Ok(mut entries) = ENTRIES.lock() {
        if entries.len() == MAX_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}

/// Entries recorded so far at `level` or above, oldest first.
pub fn entries_at_or_above(level: LogLevel) -> Vec<LogEntry> {
    match ENTRIES.lock() {
        Ok(entries) => entries
            .iter()
            .filter(|entry| entry.level >= level)
            .cloned()
            .collect(),
        Err(_) => Vec::new(),
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

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Warning);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
    }

    // Tests touching the global threshold only ever set it to Error
    #[test]
    fn test_entries_below_threshold_are_not_kept() {
        set_log_level(LogLevel::Error);
        debug("registry debug message");
        error("registry error message");

        let recorded = entries_at_or_above(LogLevel::Debug);
        assert!(!recorded
            .iter()
            .any(|entry| entry.message == "registry debug message"));
        assert!(recorded
            .iter()
            .any(|entry| entry.message == "registry error message"));
    }

    #[test]
    fn test_buffer_is_capped() {
        set_log_level(LogLevel::Error);
        for i in 0..MAX_ENTRIES + 50 {
            error(&format!("overflow {}", i));
        }

        let recorded = entries_at_or_above(LogLevel::Debug);
        assert!(recorded.len() <= MAX_ENTRIES);
        assert!(recorded
            .iter()
            .any(|entry| entry.message == format!("overflow {}", MAX_ENTRIES + 49)));
        assert!(!recorded.iter().any(|entry| entry.message == "overflow 0"));
    }
}
