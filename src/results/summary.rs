//! Derived figures for a batch: stat cards, history status, and export.

use crate::core::error::Result;
use crate::core::models::BulkValidationResult;
use crate::utils::format::percentage_of;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Numbers shown in the stat cards above a batch's result table.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_emails: u64,
    pub processed: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    pub valid_percentage: f64,
    pub invalid_percentage: f64,
    pub disposable_count: usize,
    pub role_based_count: usize,
}

impl BatchSummary {
    pub fn from_batch(batch: &BulkValidationResult) -> Self {
        Self {
            total_emails: batch.total_emails,
            processed: batch.processed,
            valid_count: batch.valid_count,
            invalid_count: batch.invalid_count,
            valid_percentage: percentage_of(batch.valid_count, batch.total_emails),
            invalid_percentage: percentage_of(batch.invalid_count, batch.total_emails),
            disposable_count: batch.results.iter().filter(|r| r.is_disposable).count(),
            role_based_count: batch.results.iter().filter(|r| r.is_role_based).count(),
        }
    }

    /// Disposable plus role-based; an address flagged both ways counts twice.
    pub fn risk_detected(&self) -> usize {
        self.disposable_count + self.role_based_count
    }
}

/// Quality label for a batch in the history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchHealth {
    Processing,
    Excellent,
    Good,
    Poor,
}

impl BatchHealth {
    pub fn of(batch: &BulkValidationResult) -> Self {
        if !batch.is_complete() {
            return BatchHealth::Processing;
        }
        let valid = percentage_of(batch.valid_count, batch.total_emails);
        if valid >= 80.0 {
            BatchHealth::Excellent
        } else if valid >= 60.0 {
            BatchHealth::Good
        } else {
            BatchHealth::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatchHealth::Processing => "Processing",
            BatchHealth::Excellent => "Excellent",
            BatchHealth::Good => "Good",
            BatchHealth::Poor => "Poor",
        }
    }
}

impl fmt::Display for BatchHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Valid addresses of a batch, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEmailExport {
    pub file_name: String,
    pub emails: Vec<String>,
}

impl ValidEmailExport {
    pub fn from_batch(batch: &BulkValidationResult) -> Self {
        Self {
            file_name: format!("validated-emails-{}.txt", batch.short_id()),
            emails: batch
                .results
                .iter()
                .filter(|r| r.is_valid)
                .map(|r| r.email.clone())
                .collect(),
        }
    }

    /// Newline-joined addresses, no trailing newline.
    pub fn contents(&self) -> String {
        self.emails.join("\n")
    }

    /// Writes the export. A directory target receives the suggested file name.
    pub fn write_to(&self, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(&self.file_name)
        } else {
            target.to_path_buf()
        };
        fs::write(&path, self.contents())?;
        tracing::info!(
            target: "results",
            "Exported {} valid emails to {}",
            self.emails.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{RiskLevel, ValidationResult};
    use chrono::Utc;

    fn row(email: &str, valid: bool, disposable: bool, role: bool) -> ValidationResult {
        ValidationResult {
            email: email.into(),
            is_valid: valid,
            syntax_valid: true,
            domain_valid: true,
            smtp_valid: Some(valid),
            risk_level: RiskLevel::Low,
            is_disposable: disposable,
            is_role_based: role,
            breach_status: false,
            domain: "example.com".into(),
            provider: "example".into(),
        }
    }

    fn batch(total: u64, processed: u64, valid: u64) -> BulkValidationResult {
        BulkValidationResult {
            batch_id: "f47ac10b-58cc-4372-a567-0e02b2c3d479".into(),
            total_emails: total,
            processed,
            valid_count: valid,
            invalid_count: processed.saturating_sub(valid),
            results: vec![
                row("a@example.com", true, false, false),
                row("info@example.com", true, false, true),
                row("x@example.com", false, true, true),
            ],
            created_at: Utc::now(),
            filename: "leads.csv".into(),
        }
    }

    #[test]
    fn summary_percentages_and_flags() {
        let summary = BatchSummary::from_batch(&batch(4, 4, 3));
        assert_eq!(summary.valid_percentage, 75.0);
        assert_eq!(summary.invalid_percentage, 25.0);
        assert_eq!(summary.disposable_count, 1);
        assert_eq!(summary.role_based_count, 2);
        assert_eq!(summary.risk_detected(), 3);
    }

    #[test]
    fn summary_of_empty_batch_is_zero() {
        let mut b = batch(0, 0, 0);
        b.results.clear();
        let summary = BatchSummary::from_batch(&b);
        assert_eq!(summary.valid_percentage, 0.0);
        assert_eq!(summary.invalid_percentage, 0.0);
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(BatchHealth::of(&batch(10, 4, 4)), BatchHealth::Processing);
        assert_eq!(BatchHealth::of(&batch(10, 10, 8)), BatchHealth::Excellent);
        assert_eq!(BatchHealth::of(&batch(10, 10, 6)), BatchHealth::Good);
        assert_eq!(BatchHealth::of(&batch(10, 10, 5)), BatchHealth::Poor);
        assert_eq!(BatchHealth::of(&batch(0, 0, 0)), BatchHealth::Poor);
    }

    #[test]
    fn export_contains_only_valid_addresses() {
        let export = ValidEmailExport::from_batch(&batch(3, 3, 2));
        assert_eq!(export.file_name, "validated-emails-f47ac10b.txt");
        assert_eq!(export.contents(), "a@example.com\ninfo@example.com");
    }

    #[test]
    fn export_into_directory_uses_suggested_name() {
        let dir = tempfile::tempdir().unwrap();
        let export = ValidEmailExport::from_batch(&batch(3, 3, 2));
        let path = export.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("validated-emails-f47ac10b.txt"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "a@example.com\ninfo@example.com"
        );
    }
}
