use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::pipeline::ClassifiedRecord;
use super::quarters::Quarter;

/// Dimensions a count pivot can be built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotDimension {
    Severity,
    Blockers,
    BugResolution,
}

impl PivotDimension {
    pub const ALL: [PivotDimension; 3] = [
        PivotDimension::Severity,
        PivotDimension::Blockers,
        PivotDimension::BugResolution,
    ];

    /// Stable name the sink addresses the pivot by.
    pub fn name(self) -> &'static str {
        match self {
            PivotDimension::Severity => "Severity",
            PivotDimension::Blockers => "Blockers",
            PivotDimension::BugResolution => "Bug Resolution",
        }
    }

    /// Header of the row-label column.
    pub fn row_header(self) -> &'static str {
        match self {
            PivotDimension::Severity => "Severity",
            PivotDimension::Blockers => "Blocker",
            PivotDimension::BugResolution => "Bug Resolution Category",
        }
    }

    /// Row label for a record, or `None` when the record is outside this
    /// pivot's subset.
    fn row_label(self, record: &ClassifiedRecord) -> Option<String> {
        match self {
            PivotDimension::Severity => Some(record.record.severity_label()),
            PivotDimension::Blockers => record.blocker.then(|| "True".to_string()),
            PivotDimension::BugResolution => Some(record.category.label().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    pub label: String,
    /// One count per entry of [`PivotTable::quarters`].
    pub counts: Vec<usize>,
}

/// Dense (dimension value × quarter) issue counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    pub name: String,
    pub row_header: String,
    pub quarters: Vec<Quarter>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Count for a cell; `None` only when the row or quarter is not part of
    /// the table at all.
    pub fn count(&self, label: &str, quarter: Quarter) -> Option<usize> {
        let column = self.quarters.iter().position(|q| *q == quarter)?;
        self.rows
            .iter()
            .find(|row| row.label == label)
            .and_then(|row| row.counts.get(column).copied())
    }

    pub fn total(&self) -> usize {
        self.rows.iter().flat_map(|row| &row.counts).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts records per (dimension value, quarter).
///
/// Columns are the quarters observed in this pivot's own subset; every row
/// carries a count for every column, zero when nothing matched. Rows and
/// columns are sorted.
pub fn build_pivot(dimension: PivotDimension, records: &[ClassifiedRecord]) -> PivotTable {
    let mut cells: BTreeMap<String, BTreeMap<Quarter, usize>> = BTreeMap::new();
    let mut quarters: BTreeSet<Quarter> = BTreeSet::new();

    for record in records {
        let Some(label) = dimension.row_label(record) else {
            continue;
        };
        quarters.insert(record.quarter);
        *cells
            .entry(label)
            .or_default()
            .entry(record.quarter)
            .or_insert(0) += 1;
    }

    let quarters: Vec<Quarter> = quarters.into_iter().collect();
    let rows = cells
        .into_iter()
        .map(|(label, by_quarter)| PivotRow {
            label,
            counts: quarters
                .iter()
                .map(|q| by_quarter.get(q).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    PivotTable {
        name: dimension.name().to_string(),
        row_header: dimension.row_header().to_string(),
        quarters,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::extract::{extract_record, tests::raw_issue, CustomFieldIds};
    use crate::issues::resolution::ResolutionTaxonomy;
    use serde_json::json;

    fn classified(key: &str, status: &str, created: &str, extra: serde_json::Value) -> ClassifiedRecord {
        let issue = raw_issue(key, status, created, extra);
        let record = extract_record(&issue, &CustomFieldIds::default(), false)
            .unwrap()
            .unwrap();
        ClassifiedRecord::classify(record, &ResolutionTaxonomy::default())
    }

    fn sample() -> Vec<ClassifiedRecord> {
        vec![
            classified(
                "A-1",
                "New",
                "2024-11-10T00:00:00.000+0000",
                json!({"customfield_10605": {"value": "High"}}),
            ),
            classified(
                "A-2",
                "New",
                "2024-06-10T00:00:00.000+0000",
                json!({"customfield_10605": {"value": "Critical"}, "summary": "[BLOCK] boot"}),
            ),
            classified(
                "A-3",
                "Closed",
                "2024-06-11T00:00:00.000+0000",
                json!({"customfield_10605": {"value": "High"}}),
            ),
        ]
    }

    #[test]
    fn severity_pivot_is_dense_and_remapped() {
        let pivot = build_pivot(PivotDimension::Severity, &sample());

        assert_eq!(pivot.name, "Severity");
        assert_eq!(pivot.quarters, vec![Quarter::Q1, Quarter::Q3]);
        let labels: Vec<_> = pivot.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1 Critical", "2 High"]);
        assert_eq!(pivot.count("1 Critical", Quarter::Q1), Some(0));
        assert_eq!(pivot.count("1 Critical", Quarter::Q3), Some(1));
        assert_eq!(pivot.count("2 High", Quarter::Q1), Some(1));
        assert_eq!(pivot.count("2 High", Quarter::Q3), Some(1));
        assert_eq!(pivot.total(), 3);
    }

    #[test]
    fn blocker_pivot_only_counts_blockers_with_own_columns() {
        let pivot = build_pivot(PivotDimension::Blockers, &sample());

        assert_eq!(pivot.row_header, "Blocker");
        assert_eq!(pivot.quarters, vec![Quarter::Q3]);
        assert_eq!(pivot.rows.len(), 1);
        assert_eq!(pivot.count("True", Quarter::Q3), Some(1));
        assert_eq!(pivot.count("True", Quarter::Q1), None);
    }

    #[test]
    fn bug_resolution_pivot_groups_by_category() {
        let pivot = build_pivot(PivotDimension::BugResolution, &sample());

        assert_eq!(pivot.count("Open Defects", Quarter::Q1), Some(1));
        assert_eq!(pivot.count("Open Defects", Quarter::Q3), Some(1));
        assert_eq!(pivot.count("Fixed: Code Change", Quarter::Q1), Some(0));
        assert_eq!(pivot.count("Fixed: Code Change", Quarter::Q3), Some(1));
    }

    #[test]
    fn every_row_has_a_count_per_quarter() {
        for dimension in PivotDimension::ALL {
            let pivot = build_pivot(dimension, &sample());
            for row in &pivot.rows {
                assert_eq!(row.counts.len(), pivot.quarters.len());
            }
        }
    }

    #[test]
    fn empty_dataset_yields_empty_pivot() {
        let pivot = build_pivot(PivotDimension::Severity, &[]);
        assert!(pivot.is_empty());
        assert!(pivot.quarters.is_empty());
        assert_eq!(pivot.total(), 0);
    }
}
