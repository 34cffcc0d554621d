//! Star-rating feedback kept in local storage.
//!
//! Entries are stored newest first as a JSON array and capped at
//! [`FEEDBACK_CAPACITY`]. A store that fails to parse is treated as empty.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{FEEDBACK_CAPACITY, FEEDBACK_STORAGE_KEY};
use crate::error::{Result, SiteError};
use crate::storage::KeyValueStore;

pub const RATING_PROMPT: &str = "Select a rating";
pub const RECENT_REVIEWS: usize = 5;

pub fn rating_label(rating: u8) -> Option<&'static str> {
    match rating {
        1 => Some("Terrible 😞"),
        2 => Some("Poor 😕"),
        3 => Some("Average 😐"),
        4 => Some("Good 😊"),
        5 => Some("Excellent! 🎉"),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub rating: u8,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comment: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub user_agent: String,
}

impl FeedbackEntry {
    /// Blank names become "Anonymous"; everything else is trimmed.
    pub fn new(rating: u8, name: &str, email: &str, comment: &str, timestamp: DateTime<Utc>) -> Result<Self> {
        if rating_label(rating).is_none() {
            return Err(SiteError::Feedback(format!("rating {} out of range", rating)));
        }
        let name = name.trim();
        Ok(Self {
            rating,
            name: if name.is_empty() { "Anonymous".to_string() } else { name.to_string() },
            email: email.trim().to_string(),
            comment: comment.trim().to_string(),
            timestamp,
            page: String::new(),
            user_agent: String::new(),
        })
    }

    pub fn with_context(mut self, page: impl Into<String>, user_agent: impl Into<String>) -> Self {
        self.page = page.into();
        self.user_agent = user_agent.into();
        self
    }

    /// "★★★★☆" style rendering of the rating.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }

    pub fn date_label(&self) -> String {
        self.timestamp.format("%b %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackStats {
    pub total: usize,
    /// Mean rating rounded to one decimal.
    pub average: f64,
}

impl FeedbackStats {
    pub fn star_fill_percent(&self) -> f64 {
        self.average / 5.0 * 100.0
    }

    pub fn average_label(&self) -> String {
        format!("{:.1}", self.average)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn file_name(self, millis: i64) -> String {
        format!("ratings-export-{}.{}", millis, self.extension())
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(entries: &[&FeedbackEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: u32 = entries.iter().map(|e| u32::from(e.rating)).sum();
    Some(round_one_decimal(f64::from(sum) / entries.len() as f64))
}

pub struct FeedbackStore<S> {
    store: S,
}

impl<S: KeyValueStore> FeedbackStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Vec<FeedbackEntry> {
        let raw = match self.store.get(FEEDBACK_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("feedback: could not read ratings: {}", e);
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("feedback: discarding unreadable ratings: {}", e);
            Vec::new()
        })
    }

    /// Prepends `entry` and drops everything past the capacity.
    pub fn add(&self, entry: FeedbackEntry) -> Result<()> {
        let mut entries = self.load();
        entries.insert(0, entry);
        entries.truncate(FEEDBACK_CAPACITY);
        let raw = serde_json::to_string(&entries)?;
        self.store.set(FEEDBACK_STORAGE_KEY, &raw)
    }

    pub fn stats(&self) -> Option<FeedbackStats> {
        let entries = self.load();
        let refs: Vec<&FeedbackEntry> = entries.iter().collect();
        mean(&refs).map(|average| FeedbackStats {
            total: entries.len(),
            average,
        })
    }

    pub fn recent(&self, limit: usize) -> Vec<FeedbackEntry> {
        let mut entries = self.load();
        entries.truncate(limit);
        entries
    }

    /// Count of ratings per star, index 0 holding the one-star count.
    pub fn distribution(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for entry in self.load() {
            if (1..=5).contains(&entry.rating) {
                counts[usize::from(entry.rating) - 1] += 1;
            }
        }
        counts
    }

    /// Average over an inclusive time range, 0 when nothing falls inside.
    pub fn average_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        let entries = self.load();
        let in_range: Vec<&FeedbackEntry> = entries
            .iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect();
        mean(&in_range).unwrap_or(0.0)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        let entries = self.load();
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
            ExportFormat::Csv => Ok(to_csv(&entries)),
        }
    }
}

const CSV_HEADERS: [&str; 7] = ["rating", "name", "email", "comment", "timestamp", "page", "userAgent"];

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub fn to_csv(entries: &[FeedbackEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut rows = vec![CSV_HEADERS.join(",")];
    for entry in entries {
        let values = [
            entry.rating.to_string(),
            entry.name.clone(),
            entry.email.clone(),
            entry.comment.clone(),
            entry.timestamp.to_rfc3339(),
            entry.page.clone(),
            entry.user_agent.clone(),
        ];
        let row: Vec<String> = values.iter().map(|v| csv_field(v)).collect();
        rows.push(row.join(","));
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    fn entry(rating: u8, day: u32) -> FeedbackEntry {
        FeedbackEntry::new(rating, "Asha", "asha@example.com", "Great edit", at(day)).unwrap()
    }

    #[test]
    fn blank_name_becomes_anonymous() {
        let e = FeedbackEntry::new(4, "   ", "", " nice ", at(1)).unwrap();
        assert_eq!(e.name, "Anonymous");
        assert_eq!(e.comment, "nice");
        assert!(FeedbackEntry::new(0, "x", "", "", at(1)).is_err());
        assert!(FeedbackEntry::new(6, "x", "", "", at(1)).is_err());
    }

    #[test]
    fn newest_entries_come_first_and_capacity_is_enforced() {
        let store = FeedbackStore::new(MemoryStore::default());
        for day in 1..=28 {
            store.add(entry(5, day)).unwrap();
        }
        for day in 1..=28 {
            store.add(entry(1, day)).unwrap();
        }
        let entries = store.load();
        assert_eq!(entries.len(), FEEDBACK_CAPACITY);
        assert_eq!(entries[0].rating, 1);
        assert_eq!(entries[0].timestamp, at(28));
        assert_eq!(entries.last().unwrap().rating, 5);
        assert_eq!(store.recent(RECENT_REVIEWS).len(), 5);
    }

    #[test]
    fn stats_round_to_one_decimal() {
        let store = FeedbackStore::new(MemoryStore::default());
        assert!(store.stats().is_none());
        store.add(entry(5, 1)).unwrap();
        store.add(entry(4, 2)).unwrap();
        store.add(entry(4, 3)).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average, 4.3);
        assert_eq!(stats.average_label(), "4.3");
        assert!((stats.star_fill_percent() - 86.0).abs() < 1e-9);
        assert_eq!(store.distribution(), [0, 0, 0, 2, 1]);
    }

    #[test]
    fn average_between_is_inclusive_and_zero_when_empty() {
        let store = FeedbackStore::new(MemoryStore::default());
        store.add(entry(2, 1)).unwrap();
        store.add(entry(4, 5)).unwrap();
        store.add(entry(5, 10)).unwrap();
        assert_eq!(store.average_between(at(1), at(5)), 3.0);
        assert_eq!(store.average_between(at(20), at(25)), 0.0);
    }

    #[test]
    fn corrupt_store_reads_as_empty() {
        let memory = MemoryStore::default();
        memory.set(FEEDBACK_STORAGE_KEY, "{not json").unwrap();
        let store = FeedbackStore::new(memory);
        assert!(store.load().is_empty());
        store.add(entry(3, 1)).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn reads_entries_written_by_the_browser() {
        let memory = MemoryStore::default();
        memory
            .set(
                FEEDBACK_STORAGE_KEY,
                r#"[{"rating":4,"name":"Ravi","email":"","comment":"","timestamp":"2024-03-02T08:15:00.000Z","page":"/","userAgent":"Mozilla"}]"#,
            )
            .unwrap();
        let entries = FeedbackStore::new(memory).load();
        assert_eq!(entries[0].name, "Ravi");
        assert_eq!(entries[0].user_agent, "Mozilla");
        assert_eq!(entries[0].date_label(), "Mar 2, 2024");
        assert_eq!(entries[0].stars(), "★★★★☆");
    }

    #[test]
    fn csv_quotes_every_field() {
        let mut e = entry(5, 1);
        e.comment = "said \"wow\", twice".to_string();
        let csv = to_csv(&[e]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("rating,name,email,comment,timestamp,page,userAgent"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("\"5\",\"Asha\""));
        assert!(row.contains("\"said \"\"wow\"\", twice\""));
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn export_file_names() {
        assert_eq!(ExportFormat::Json.file_name(1700), "ratings-export-1700.json");
        assert_eq!(ExportFormat::Csv.mime(), "text/csv");
    }
}
