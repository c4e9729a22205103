//! Colored status labels used across the views.

use crate::core::models::RiskLevel;
use crate::results::BatchHealth;
use crate::service::ApiStatus;
use crate::ui::table::Cell;

use colored::{Color, Colorize};

/// Generic status states a badge can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStatus {
    Valid,
    Invalid,
    Warning,
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub text: String,
    pub color: Color,
}

impl Badge {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    /// `[text]` in the badge color.
    pub fn render(&self) -> String {
        format!("[{}]", self.text).color(self.color).to_string()
    }

    pub fn into_cell(self) -> Cell {
        Cell::colored(self.text, self.color)
    }
}

/// Status badge with an optional custom label.
pub fn status_badge(status: BadgeStatus, text: Option<&str>) -> Badge {
    let (default_text, color) = match status {
        BadgeStatus::Valid => ("Valid", Color::Green),
        BadgeStatus::Invalid => ("Invalid", Color::Red),
        BadgeStatus::Warning => ("Warning", Color::Yellow),
        BadgeStatus::Pending => ("Pending", Color::Blue),
    };
    Badge::new(text.unwrap_or(default_text), color)
}

pub fn validity_badge(is_valid: bool) -> Badge {
    status_badge(
        if is_valid {
            BadgeStatus::Valid
        } else {
            BadgeStatus::Invalid
        },
        None,
    )
}

/// SMTP check badge; a skipped check shows as pending "Skipped".
pub fn smtp_badge(smtp_valid: Option<bool>) -> Badge {
    match smtp_valid {
        None => status_badge(BadgeStatus::Pending, Some("Skipped")),
        Some(valid) => validity_badge(valid),
    }
}

pub fn breach_badge(breached: bool) -> Badge {
    if breached {
        status_badge(BadgeStatus::Warning, Some("Breached"))
    } else {
        status_badge(BadgeStatus::Valid, Some("Clean"))
    }
}

pub fn risk_badge(level: RiskLevel) -> Badge {
    match level {
        RiskLevel::Low => Badge::new("Low Risk", Color::Green),
        RiskLevel::Medium => Badge::new("Medium Risk", Color::Yellow),
        RiskLevel::High => Badge::new("High Risk", Color::Red),
        RiskLevel::Unknown => Badge::new("Unknown Risk", Color::BrightBlack),
    }
}

pub fn api_status_badge(status: ApiStatus) -> Badge {
    let color = match status {
        ApiStatus::Online => Color::Green,
        ApiStatus::Offline => Color::Red,
        ApiStatus::Checking => Color::Yellow,
    };
    Badge::new(status.label(), color)
}

pub fn batch_health_badge(health: BatchHealth) -> Badge {
    let color = match health {
        BatchHealth::Processing => Color::Blue,
        BatchHealth::Excellent => Color::Green,
        BatchHealth::Good => Color::Yellow,
        BatchHealth::Poor => Color::Red,
    };
    Badge::new(health.label(), color)
}

/// Disposable / Role-based / Breached flags, in that order, only those set.
pub fn flag_labels(disposable: bool, role_based: bool, breached: bool) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if disposable {
        flags.push("Disposable");
    }
    if role_based {
        flags.push("Role-based");
    }
    if breached {
        flags.push("Breached");
    }
    flags
}
