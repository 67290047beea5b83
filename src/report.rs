use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::issues::PivotTable;

pub const QUARTER_COLUMN: &str = "Quarter";
pub const BLOCKER_COLUMN: &str = "Blocker";
pub const CATEGORY_COLUMN: &str = "Bug Resolution Category";

/// Final deliverable of a run, handed to the output sink.
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub total_issues: usize,
    pub exported_issues: usize,
    pub dataset: Dataset,
    pub pivots: Vec<PivotTable>,
}

impl IssueReport {
    /// Looks a pivot up by its stable name (`Severity`, `Blockers`,
    /// `Bug Resolution`).
    pub fn pivot(&self, name: &str) -> Option<&PivotTable> {
        self.pivots.iter().find(|pivot| pivot.name == name)
    }
}

/// The issues sheet: selected columns followed by the derived ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<IndexMap<String, Cell>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Flag(bool),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Flag(true) => f.write_str("True"),
            Cell::Flag(false) => f.write_str("False"),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Flag(value)
    }
}
