//! Log of completed computations
//!
//! Every computation the calculator finishes, whether through `=` or an
//! operator chain, leaves one immutable record here. The log only grows;
//! `clear` is the one thing that empties it.

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// A single completed computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// First operand, numerically normalized
    pub x: String,
    /// Operator applied
    pub operand: Operation,
    /// Second operand, numerically normalized
    pub y: String,
    /// Computed value or error text
    pub result: String,
}

impl HistoryEntry {
    /// Creates a new history entry
    #[must_use]
    pub fn new(
        x: impl Into<String>,
        operand: Operation,
        y: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            x: x.into(),
            operand,
            y: y.into(),
            result: result.into(),
        }
    }

    /// Returns the log line, `"{x} {operand} {y} = {result}"`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {} {} = {}", self.x, self.operand, self.y, self.result)
    }
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Ordered, append-only computation log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Returns the entry at the given index (0 = oldest)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Returns the formatted log lines, oldest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(HistoryEntry::display).collect()
    }

    /// Serializes the history to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes history from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<HistoryEntry> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Exports history as newline-separated log lines
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.lines().join("\n")
    }
}
