//! Text renderings of each dashboard page.
//!
//! Every function returns the full page as a `String` so the CLI only has to
//! print it.

use crate::analytics;
use crate::core::models::{
    AnalyticsSummary, BulkValidationResult, LegacyValidationResponse, ValidationResult,
};
use crate::results::{BatchHealth, BatchSummary, ResultFilter};
use crate::service::HealthSnapshot;
use crate::ui::badges::{
    api_status_badge, batch_health_badge, breach_badge, flag_labels, risk_badge, smtp_badge,
    validity_badge,
};
use crate::ui::table::{Cell, Table};
use crate::upload::{email_domain, UploadedList};
use crate::utils::format::{format_percentage, format_thousands};

use colored::{Color, Colorize};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

fn heading(out: &mut String, title: &str, subtitle: &str) {
    let _ = writeln!(out, "{}", title.bold());
    if !subtitle.is_empty() {
        let _ = writeln!(out, "{}", subtitle.dimmed());
    }
    out.push('\n');
}

fn stat_card(out: &mut String, title: &str, value: &str, description: &str) {
    let _ = writeln!(
        out,
        "  {:<18} {}  {}",
        title,
        format!("{:>10}", value).bold(),
        description.dimmed()
    );
}

/// Horizontal bar for a 0-100 percentage.
pub fn percent_bar(value: f64) -> String {
    let clamped = value.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn truncation_notice(out: &mut String, shown: usize, total: usize, noun: &str) {
    if total > shown {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "Showing first {} results. {} more {} available.",
                shown,
                total - shown,
                noun
            )
            .yellow()
        );
    }
}

/// Single-address result with per-check badges.
pub fn render_validation_result(result: &ValidationResult) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &result.email,
        &format!("Provider: {} • Domain: {}", result.provider, result.domain),
    );

    let _ = writeln!(
        out,
        "  {} {}",
        validity_badge(result.is_valid).render(),
        risk_badge(result.risk_level).render()
    );
    out.push('\n');

    let checks = [
        ("Syntax", validity_badge(result.syntax_valid)),
        ("Domain", validity_badge(result.domain_valid)),
        ("SMTP", smtp_badge(result.smtp_valid)),
        ("Breach", breach_badge(result.breach_status)),
    ];
    for (name, badge) in checks {
        let _ = writeln!(out, "  {:<8} {}", name, badge.render());
    }

    if result.is_disposable || result.is_role_based {
        let mut warning = String::new();
        if result.is_disposable {
            warning.push_str("Disposable email detected. ");
        }
        if result.is_role_based {
            warning.push_str("Role-based email detected.");
        }
        out.push('\n');
        let _ = writeln!(out, "  {}", warning.trim_end().yellow());
    }
    out
}

pub fn render_legacy_result(result: &LegacyValidationResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", "Email:".bold(), result.email);
    let _ = writeln!(out, "{} {}", "Status:".bold(), result.status_label());
    out
}

/// Upload preview: matching rows, top domains, and truncation notice.
pub fn render_preview(list: &UploadedList, search: &str, max_rows: usize, top: usize) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Email Preview",
        "Review your uploaded emails before starting validation",
    );
    let _ = writeln!(
        out,
        "  {} emails loaded  •  From: {} ({:.1} KB)",
        list.len(),
        list.filename,
        list.size_bytes as f64 / 1024.0
    );
    out.push('\n');

    let hits = list.search(search);
    let mut table = Table::new(["#", "Email Address", "Domain"]);
    for (position, email) in hits.iter().take(max_rows) {
        table.push_row(vec![
            Cell::colored(position.to_string(), Color::BrightBlack),
            Cell::plain(*email),
            Cell::colored(email_domain(email), Color::BrightBlack),
        ]);
    }
    out.push_str(&table.render());
    truncation_notice(&mut out, max_rows.min(hits.len()), hits.len(), "emails");

    out.push('\n');
    let _ = writeln!(out, "{}", "Top Domains".bold());
    for (domain, count) in list.top_domains(top) {
        let _ = writeln!(out, "  {:<30} {}", domain, count);
    }
    out
}

/// Batch results page: stat cards and the filtered result table.
pub fn render_batch(batch: &BulkValidationResult, filter: &ResultFilter, max_rows: usize) -> String {
    let mut out = String::new();
    let created = batch.created_at.format("%b %-d, %Y at %-I:%M %p");
    heading(
        &mut out,
        "Validation Results",
        &format!("Batch: {} • {}", batch.filename, created),
    );

    let summary = BatchSummary::from_batch(batch);
    stat_card(
        &mut out,
        "Total Processed",
        &summary.total_emails.to_string(),
        &format!("{} of {} completed", summary.processed, summary.total_emails),
    );
    stat_card(
        &mut out,
        "Valid Emails",
        &format_percentage(summary.valid_percentage),
        &format!("{} valid addresses", summary.valid_count),
    );
    stat_card(
        &mut out,
        "Invalid Emails",
        &format_percentage(summary.invalid_percentage),
        &format!("{} invalid addresses", summary.invalid_count),
    );
    stat_card(
        &mut out,
        "Risk Detected",
        &summary.risk_detected().to_string(),
        "Disposable & role-based emails",
    );
    out.push('\n');

    let rows = filter.apply(&batch.results);
    if filter.is_active() {
        let _ = writeln!(
            out,
            "{}",
            format!("{} of {} results match the current filters", rows.len(), batch.results.len())
                .dimmed()
        );
    }

    let mut table = Table::new(["Email", "Domain", "Status", "Risk Level", "Flags"]);
    for result in rows.iter().take(max_rows) {
        table.push_row(vec![
            Cell::plain(result.email.as_str()),
            Cell::colored(result.domain.as_str(), Color::BrightBlack),
            validity_badge(result.is_valid).into_cell(),
            risk_badge(result.risk_level).into_cell(),
            Cell::plain(
                flag_labels(result.is_disposable, result.is_role_based, result.breach_status)
                    .join(", "),
            ),
        ]);
    }
    out.push_str(&table.render());
    truncation_notice(&mut out, max_rows.min(rows.len()), rows.len(), "results");
    out
}

pub fn render_history(batches: &[BulkValidationResult]) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Validation History",
        "Previous email validation batches and results.",
    );

    if batches.is_empty() {
        let _ = writeln!(out, "No validation history");
        let _ = writeln!(
            out,
            "{}",
            "You haven't run any bulk validations yet. Upload your first email list to get started."
                .dimmed()
        );
        return out;
    }

    let _ = writeln!(out, "{} validation batches found\n", batches.len());
    let mut table = Table::new([
        "Batch ID", "Filename", "Date", "Total", "Valid", "Invalid", "Status",
    ]);
    for batch in batches {
        table.push_row(vec![
            Cell::plain(format!("{}...", batch.short_id())),
            Cell::plain(batch.filename.as_str()),
            Cell::colored(batch.created_at.format("%b %-d, %Y").to_string(), Color::BrightBlack),
            Cell::plain(batch.total_emails.to_string()),
            Cell::colored(batch.valid_count.to_string(), Color::Green),
            Cell::colored(batch.invalid_count.to_string(), Color::Red),
            batch_health_badge(BatchHealth::of(batch)).into_cell(),
        ]);
    }
    out.push_str(&table.render());
    out
}

/// Analytics dashboard: stat cards, breakdown bars, top domains, daily volume.
pub fn render_analytics(summary: &AnalyticsSummary, top: usize) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        "Analytics Dashboard",
        "Insights and analytics for your email validation activities.",
    );

    stat_card(
        &mut out,
        "Total Processed",
        &format_thousands(summary.total_processed),
        "Emails validated to date",
    );
    stat_card(
        &mut out,
        "Valid Rate",
        &format_percentage(summary.valid_percentage),
        "Successfully validated emails",
    );
    stat_card(
        &mut out,
        "Disposable Rate",
        &format_percentage(summary.disposable_percentage),
        "Temporary email addresses",
    );
    stat_card(
        &mut out,
        "Role-based Rate",
        &format_percentage(summary.role_based_percentage),
        "Generic business emails",
    );

    let _ = writeln!(out, "\n{}", "Validation Results".bold());
    for share in analytics::validation_split(summary) {
        let _ = writeln!(
            out,
            "  {:<11} {} {}",
            share.label,
            percent_bar(share.value),
            format_percentage(share.value)
        );
    }

    let _ = writeln!(out, "\n{}", "Risk Analysis".bold());
    for share in analytics::risk_split(summary) {
        let _ = writeln!(
            out,
            "  {:<11} {} {}",
            share.label,
            percent_bar(share.value),
            format_percentage(share.value)
        );
    }

    let _ = writeln!(out, "\n{}", "Top Domains".bold());
    let domains = analytics::top_domains(summary, top);
    if domains.is_empty() {
        let _ = writeln!(out, "  {}", "No domain data yet".dimmed());
    }
    for (domain, count) in domains {
        let _ = writeln!(out, "  {:<30} {:>8}", domain, format_thousands(count));
    }

    let _ = writeln!(out, "\n{}", "Validation Volume".bold());
    let series = analytics::volume_series(summary);
    let peak = series.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if series.is_empty() {
        let _ = writeln!(out, "  {}", "No volume data yet".dimmed());
    }
    for (label, count) in series {
        let share = if peak == 0 {
            0.0
        } else {
            count as f64 / peak as f64 * 100.0
        };
        let _ = writeln!(
            out,
            "  {:<7} {} {}",
            label,
            percent_bar(share),
            format_thousands(count)
        );
    }
    out
}

pub fn render_health(snapshot: &HealthSnapshot) -> String {
    let mut line = api_status_badge(snapshot.status).render();
    if let Some(version) = &snapshot.version {
        let _ = write!(line, " v{}", version);
    }
    if let Some(checked) = snapshot.last_checked {
        let _ = write!(
            line,
            " {}",
            format!("(checked {})", checked.format("%H:%M:%S UTC")).dimmed()
        );
    }
    if let Some(err) = &snapshot.last_error {
        let _ = write!(line, " {}", err.red());
    }
    line
}
