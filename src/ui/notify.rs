//! Transient success / error / info notifications on stderr.

use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Info,
}

impl Level {
    fn title(&self) -> &'static str {
        match self {
            Level::Success => "Success",
            Level::Error => "Error",
            Level::Info => "Info",
        }
    }
}

/// `Title: message`, with the title colored by level.
pub fn format_notification(level: Level, message: &str) -> String {
    let title = match level {
        Level::Success => level.title().green().bold(),
        Level::Error => level.title().red().bold(),
        Level::Info => level.title().blue().bold(),
    };
    format!("{}: {}", title, message)
}

fn emit(level: Level, message: &str) {
    let mut stderr = std::io::stderr().lock();
    // a closed stderr has nowhere left to report to
    let _ = writeln!(stderr, "{}", format_notification(level, message));
}

pub fn success(message: &str) {
    tracing::debug!(target: "notify", "success: {}", message);
    emit(Level::Success, message);
}

pub fn error(message: &str) {
    tracing::debug!(target: "notify", "error: {}", message);
    emit(Level::Error, message);
}

pub fn info(message: &str) {
    tracing::debug!(target: "notify", "info: {}", message);
    emit(Level::Info, message);
}
