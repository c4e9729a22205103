//! Reading and preprocessing of uploaded email list files.
//!
//! Parsing here is for preview only. The backend performs the authoritative
//! validation, so the only filtering applied is "contains an `@`" plus
//! exact-duplicate removal.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n,;]").expect("Separator regex failed to compile. This is a bug."));

/// File extensions accepted for upload, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["csv", "txt"];

/// Splits raw file text into candidate addresses.
///
/// Splits on newline, comma, and semicolon, trims each entry, keeps entries
/// containing `@`, and drops exact duplicates while preserving first-seen order.
pub fn parse_email_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && entry.contains('@'))
        .filter(|entry| seen.insert(*entry))
        .map(str::to_string)
        .collect()
}

/// The part after the first `@`, or an empty string.
pub fn email_domain(email: &str) -> &str {
    email.split_once('@').map(|(_, d)| d).unwrap_or("")
}

/// A parsed list file held in memory for preview before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedList {
    pub filename: String,
    pub size_bytes: u64,
    pub emails: Vec<String>,
}

impl UploadedList {
    /// Builds a list from already-loaded text.
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self {
            filename: filename.into(),
            size_bytes: text.len() as u64,
            emails: parse_email_list(text),
        }
    }

    /// Reads and parses a `.csv` or `.txt` file, enforcing the configured size limit.
    pub fn from_path(path: &Path, config: &Config) -> Result<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| AppError::Upload(format!("'{}' is not a file", path.display())))?;

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::Upload(format!(
                "Unsupported file type for '{}'. Supported formats: .csv, .txt",
                filename
            )));
        }

        let size_bytes = fs::metadata(path)?.len();
        if size_bytes > config.max_upload_bytes {
            return Err(AppError::Upload(format!(
                "'{}' is {:.1} KB, larger than the {:.1} KB limit",
                filename,
                size_bytes as f64 / 1024.0,
                config.max_upload_bytes as f64 / 1024.0
            )));
        }

        let bytes = fs::read(path).map_err(|e| {
            tracing::error!(target: "upload", "Error processing file {}: {}", path.display(), e);
            AppError::Upload(format!("Could not read '{}': {}", filename, e))
        })?;
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            tracing::warn!(
                target: "upload",
                "{} is not valid UTF-8; undecodable bytes were replaced",
                filename
            );
        }

        let emails = parse_email_list(&text);
        tracing::info!(
            target: "upload",
            "Parsed {} candidate emails from {} ({} bytes)",
            emails.len(),
            filename,
            size_bytes
        );

        Ok(Self {
            filename,
            size_bytes,
            emails,
        })
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Most frequent domains, count descending; ties keep first-seen order.
    pub fn top_domains(&self, limit: usize) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for email in &self.emails {
            let domain = email_domain(email);
            let count = counts.entry(domain).or_insert(0);
            if *count == 0 {
                order.push(domain);
            }
            *count += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|d| (d.to_string(), counts[d]))
            .collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Case-insensitive substring search. Returns 1-based positions in the full list.
    pub fn search(&self, term: &str) -> Vec<(usize, &str)> {
        let needle = term.to_lowercase();
        self.emails
            .iter()
            .enumerate()
            .filter(|(_, email)| needle.is_empty() || email.to_lowercase().contains(&needle))
            .map(|(idx, email)| (idx + 1, email.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn splits_on_all_separators_and_trims() {
        let emails = parse_email_list("a@x.com, b@y.com;c@z.com\n  d@w.com  \r\n");
        assert_eq!(emails, vec!["a@x.com", "b@y.com", "c@z.com", "d@w.com"]);
    }

    #[test]
    fn drops_entries_without_at_sign() {
        let emails = parse_email_list("email\nname,a@x.com,,;;\nnot-an-email\n@");
        assert_eq!(emails, vec!["a@x.com", "@"]);
        assert!(emails.iter().all(|e| e.contains('@')));
    }

    #[test]
    fn deduplicates_keeping_first_occurrence() {
        let emails = parse_email_list("b@x.com\na@x.com\nb@x.com\nc@x.com\na@x.com");
        assert_eq!(emails, vec!["b@x.com", "a@x.com", "c@x.com"]);
    }

    #[test]
    fn duplicates_are_exact_matches_only() {
        let emails = parse_email_list("A@x.com\na@x.com\n a@x.com ");
        assert_eq!(emails, vec!["A@x.com", "a@x.com"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_email_list("").is_empty());
        assert!(parse_email_list("\n\n,,;").is_empty());
    }

    #[test]
    fn top_domains_ranked_by_count() {
        let list = UploadedList::from_text(
            "list.txt",
            "a@one.com\nb@two.com\nc@two.com\nd@three.com\ne@two.com\nf@one.com",
        );
        assert_eq!(
            list.top_domains(2),
            vec![("two.com".to_string(), 3), ("one.com".to_string(), 2)]
        );
        assert_eq!(list.top_domains(10).len(), 3);
    }

    #[test]
    fn search_reports_original_positions() {
        let list = UploadedList::from_text("list.csv", "alice@corp.com,bob@home.net,ALICIA@corp.com");
        let hits = list.search("ali");
        assert_eq!(hits, vec![(1, "alice@corp.com"), (3, "ALICIA@corp.com")]);
        assert_eq!(list.search("").len(), 3);
    }

    #[test]
    fn from_path_reads_supported_file() {
        let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
        write!(file, "email\njane@example.com\njohn@example.com\njane@example.com").unwrap();

        let list = UploadedList::from_path(file.path(), &Config::default()).unwrap();
        assert_eq!(list.emails, vec!["jane@example.com", "john@example.com"]);
        assert!(list.filename.ends_with(".CSV"));
        assert!(list.size_bytes > 0);
    }

    #[test]
    fn from_path_tolerates_non_utf8_bytes() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"name,email\nJos\xe9,jose@example.com\nAnn,ann@example.com\n")
            .unwrap();

        let list = UploadedList::from_path(file.path(), &Config::default()).unwrap();
        assert_eq!(list.emails, vec!["jose@example.com", "ann@example.com"]);
    }

    #[test]
    fn list_serializes_with_parsed_emails() {
        let list = UploadedList::from_text("list.txt", "a@x.com;b@y.com");
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["filename"], "list.txt");
        assert_eq!(value["emails"], serde_json::json!(["a@x.com", "b@y.com"]));
    }

    #[test]
    fn from_path_rejects_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = UploadedList::from_path(file.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
    }

    #[test]
    fn from_path_enforces_size_limit() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{}", "x@y.z\n".repeat(100)).unwrap();

        let mut config = Config::default();
        config.max_upload_bytes = 64;
        let err = UploadedList::from_path(file.path(), &config).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = UploadedList::from_path(Path::new("/no/such/list.txt"), &Config::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
