//! Client-side filtering of already-fetched batch results.

use crate::core::error::AppError;
use crate::core::models::{RiskLevel, ValidationResult};
use std::str::FromStr;

/// Status dropdown on the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Valid,
    Invalid,
    Disposable,
    RoleBased,
    Breached,
}

impl StatusFilter {
    pub fn matches(&self, result: &ValidationResult) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Valid => result.is_valid,
            StatusFilter::Invalid => !result.is_valid,
            StatusFilter::Disposable => result.is_disposable,
            StatusFilter::RoleBased => result.is_role_based,
            StatusFilter::Breached => result.breach_status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "valid" => Ok(StatusFilter::Valid),
            "invalid" => Ok(StatusFilter::Invalid),
            "disposable" => Ok(StatusFilter::Disposable),
            "role-based" | "role_based" | "rolebased" => Ok(StatusFilter::RoleBased),
            "breached" => Ok(StatusFilter::Breached),
            other => Err(AppError::InvalidInput(format!(
                "Unknown status filter '{}'. Use all, valid, invalid, disposable, role-based or breached",
                other
            ))),
        }
    }
}

/// Risk dropdown on the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Only(RiskLevel),
}

impl RiskFilter {
    pub fn matches(&self, result: &ValidationResult) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Only(level) => result.risk_level == *level,
        }
    }
}

impl FromStr for RiskFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RiskFilter::All),
            "low" => Ok(RiskFilter::Only(RiskLevel::Low)),
            "medium" => Ok(RiskFilter::Only(RiskLevel::Medium)),
            "high" => Ok(RiskFilter::Only(RiskLevel::High)),
            other => Err(AppError::InvalidInput(format!(
                "Unknown risk filter '{}'. Use all, low, medium or high",
                other
            ))),
        }
    }
}

/// Search box plus both dropdowns. All three must match for a row to be kept.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub search: String,
    pub status: StatusFilter,
    pub risk: RiskFilter,
}

impl ResultFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter, risk: RiskFilter) -> Self {
        Self {
            search: search.into(),
            status,
            risk,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.status != StatusFilter::All || self.risk != RiskFilter::All
    }

    /// Case-insensitive match against the email or the domain.
    fn matches_search(&self, needle: &str, result: &ValidationResult) -> bool {
        needle.is_empty()
            || result.email.to_lowercase().contains(needle)
            || result.domain.to_lowercase().contains(needle)
    }

    /// Rows passing every active filter, in input order.
    pub fn apply<'a>(&self, results: &'a [ValidationResult]) -> Vec<&'a ValidationResult> {
        let needle = self.search.to_lowercase();
        results
            .iter()
            .filter(|r| self.matches_search(&needle, r))
            .filter(|r| self.status.matches(r))
            .filter(|r| self.risk.matches(r))
            .collect()
    }
}
