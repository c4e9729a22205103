//! Chart-ready views of an [`AnalyticsSummary`].

use crate::core::models::AnalyticsSummary;
use crate::utils::format::short_month_day;

/// One labelled slice of a percentage breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: &'static str,
    pub value: f64,
}

/// Valid vs invalid split.
pub fn validation_split(summary: &AnalyticsSummary) -> Vec<Share> {
    vec![
        Share {
            label: "Valid",
            value: summary.valid_percentage,
        },
        Share {
            label: "Invalid",
            value: summary.invalid_percentage,
        },
    ]
}

/// Clean / disposable / role-based split. Clean is whatever the two flags leave.
pub fn risk_split(summary: &AnalyticsSummary) -> Vec<Share> {
    vec![
        Share {
            label: "Clean",
            value: 100.0 - summary.disposable_percentage - summary.role_based_percentage,
        },
        Share {
            label: "Disposable",
            value: summary.disposable_percentage,
        },
        Share {
            label: "Role-based",
            value: summary.role_based_percentage,
        },
    ]
}

/// Domains by count descending, ties broken alphabetically, first `limit`.
pub fn top_domains(summary: &AnalyticsSummary, limit: usize) -> Vec<(String, u64)> {
    let mut domains: Vec<(String, u64)> = summary
        .domain_distribution
        .iter()
        .map(|(d, c)| (d.clone(), *c))
        .collect();
    domains.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    domains.truncate(limit);
    domains
}

/// Daily volume with `Mon D` labels.
pub fn volume_series(summary: &AnalyticsSummary) -> Vec<(String, u64)> {
    summary
        .daily_volume
        .iter()
        .map(|point| (short_month_day(&point.date), point.count))
        .collect()
}
