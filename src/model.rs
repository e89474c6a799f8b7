use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One line of the bug CSV: a file touched by a bug-fixing commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub path: String,
    pub date: DateTime<Utc>,
}

impl Record {
    pub fn new(path: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            path: path.into(),
            date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub count: u32,
    pub is_directory: bool,
}

/// Immediate children of one base path, keyed by child name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    base_path: String,
    entries: HashMap<String, ChildEntry>,
}

impl Breakdown {
    pub fn new(base_path: impl Into<String>, entries: HashMap<String, ChildEntry>) -> Self {
        Self {
            base_path: base_path.into(),
            entries,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn entries(&self) -> &HashMap<String, ChildEntry> {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ChildEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.entries.values().map(|e| e.count).sum()
    }

    pub fn max_count(&self) -> u32 {
        self.entries.values().map(|e| e.count).max().unwrap_or(0)
    }

    /// Entries ordered by count (descending), ties broken by name.
    pub fn sorted(&self) -> Vec<(&str, &ChildEntry)> {
        let mut sorted: Vec<_> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect();
        sorted.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.0.cmp(b.0)));
        sorted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub name: String,
    pub count: u32,
    pub is_directory: bool,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub base_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub total: u32,
    pub skipped_lines: usize,
    pub entries: Vec<BreakdownRow>,
}

/// A commit selected as a bug fix, with the paths it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugFix {
    pub commit_id: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub paths: Vec<String>,
}

impl BugFix {
    /// First eight hex digits of the commit id.
    pub fn short_id(&self) -> &str {
        let end = self.commit_id.len().min(8);
        &self.commit_id[..end]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}
