//! Evaluation history - session store plus .promptcheck-history.json
//!
//! The scorer never owns history; callers inject a store and append
//! snapshots after each evaluation. The file-backed form gives the CLI
//! score deltas across runs.

use crate::FeedbackReport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const HISTORY_FILENAME: &str = ".promptcheck-history.json";
const MAX_ENTRIES: usize = 50;

/// One evaluated prompt, recorded in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: String,
    pub prompt: String,
    pub score: u8,
    pub improvements: usize,
    #[serde(default)]
    pub degraded: bool,
}

/// Append-only history collaborator. Implementations must preserve
/// insertion order; the scorer itself never touches a store.
pub trait HistoryStore {
    fn append(&mut self, entry: HistoryEntry);
    fn entries(&self) -> &[HistoryEntry];
}

/// In-memory session history (the default collaborator)
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// File-backed history, capped at [`MAX_ENTRIES`]
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct HistoryFile {
    pub entries: Vec<HistoryEntry>,
}

impl HistoryStore for HistoryFile {
    fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(0..excess);
        }
    }

    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// Build a history entry from an evaluation
pub fn make_entry(prompt: &str, report: &FeedbackReport) -> HistoryEntry {
    HistoryEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        prompt: prompt.to_string(),
        score: report.score.value,
        improvements: report.improvements.len(),
        degraded: report.degraded,
    }
}

/// Load history from a directory (or create empty). Corrupt or missing
/// files yield an empty history rather than an error.
pub fn load_history(dir: &Path) -> HistoryFile {
    let path = dir.join(HISTORY_FILENAME);
    if let Ok(content) = fs::read_to_string(&path) {
        if let Ok(history) = serde_json::from_str::<HistoryFile>(&content) {
            return history;
        }
    }
    HistoryFile::default()
}

/// Save history to a directory
pub fn save_history(dir: &Path, history: &HistoryFile) -> std::io::Result<()> {
    let path = dir.join(HISTORY_FILENAME);
    let content = serde_json::to_string_pretty(history).unwrap_or_else(|_| "{}".to_string());
    fs::write(path, content)
}

/// Most recent recorded score for an identical prompt
pub fn previous_score(history: &HistoryFile, prompt: &str) -> Option<u8> {
    history
        .entries
        .iter()
        .rev()
        .find(|e| e.prompt == prompt)
        .map(|e| e.score)
}

/// Format delta for console: "[was 62, up 9]" or "[was 80, down 4]" or ""
pub fn format_delta(previous: Option<u8>, current: u8) -> String {
    let Some(prev) = previous else {
        return String::new();
    };
    if prev == current {
        return format!(" [unchanged at {}]", current);
    }
    let diff = current as i16 - prev as i16;
    if diff > 0 {
        format!(" [was {}, up {}]", prev, diff)
    } else {
        format!(" [was {}, down {}]", prev, -diff)
    }
}
