use chrono::Utc;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::blockers::is_blocker;
use super::extract::{extract_record, CustomFieldIds, NormalizedRecord};
use super::fields::FieldSelection;
use super::pivot::{build_pivot, PivotDimension};
use super::quarters::Quarter;
use super::resolution::{ResolutionCategory, ResolutionTaxonomy};
use super::types::RawIssue;
use crate::error::Result;
use crate::report::{Cell, Dataset, IssueReport, BLOCKER_COLUMN, CATEGORY_COLUMN, QUARTER_COLUMN};

/// Progress value reported before any issue is processed; the issue loop
/// covers the remaining range up to 100.
pub const PROCESSING_START: f64 = 50.0;

/// Which pivots a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PivotSelection {
    #[serde(default = "enabled")]
    pub severity: bool,
    #[serde(default = "enabled")]
    pub blockers: bool,
    #[serde(default = "enabled")]
    pub bug_resolution: bool,
}

fn enabled() -> bool {
    true
}

impl Default for PivotSelection {
    fn default() -> Self {
        Self {
            severity: true,
            blockers: true,
            bug_resolution: true,
        }
    }
}

impl PivotSelection {
    pub fn dimensions(&self) -> Vec<PivotDimension> {
        PivotDimension::ALL
            .into_iter()
            .filter(|dimension| match dimension {
                PivotDimension::Severity => self.severity,
                PivotDimension::Blockers => self.blockers,
                PivotDimension::BugResolution => self.bug_resolution,
            })
            .collect()
    }
}

/// Everything that shapes a run. Built once by the caller and never
/// mutated by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExportOptions {
    #[serde(default)]
    pub fields: FieldSelection,
    #[serde(default)]
    pub open_only: bool,
    #[serde(default)]
    pub pivots: PivotSelection,
    #[serde(default)]
    pub custom_fields: CustomFieldIds,
    #[serde(default)]
    pub taxonomy: ResolutionTaxonomy,
}

/// A normalized record with its derived columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub record: NormalizedRecord,
    pub quarter: Quarter,
    pub blocker: bool,
    pub category: ResolutionCategory,
}

impl ClassifiedRecord {
    pub fn classify(record: NormalizedRecord, taxonomy: &ResolutionTaxonomy) -> Self {
        let quarter = Quarter::of(record.created);
        let blocker = is_blocker(&record.summary);
        let category = taxonomy.classify(&record.bug_resolution, &record.status);
        Self {
            record,
            quarter,
            blocker,
            category,
        }
    }

    fn to_row(&self, selection: &FieldSelection) -> IndexMap<String, Cell> {
        let mut row: IndexMap<String, Cell> = self
            .record
            .project(selection)
            .into_iter()
            .map(|(column, value)| (column, Cell::from(value)))
            .collect();
        row.insert(QUARTER_COLUMN.to_string(), Cell::from(self.quarter.label().to_string()));
        row.insert(BLOCKER_COLUMN.to_string(), Cell::from(self.blocker));
        row.insert(CATEGORY_COLUMN.to_string(), Cell::from(self.category.label().to_string()));
        row
    }
}

fn dataset_columns(selection: &FieldSelection) -> Vec<String> {
    selection
        .iter()
        .map(|field| field.label().to_string())
        .chain([QUARTER_COLUMN, BLOCKER_COLUMN, CATEGORY_COLUMN].map(String::from))
        .collect()
}

/// Normalizes, classifies and aggregates one batch of issues.
///
/// `progress` is called once per raw issue with a value rising linearly from
/// just above 50 to 100 (and once with 100 for an empty batch). Any
/// malformed issue aborts the whole run; nothing partial is returned.
pub fn run_pipeline<F>(
    issues: &[RawIssue],
    options: &ExportOptions,
    source: &str,
    mut progress: F,
) -> Result<IssueReport>
where
    F: FnMut(f64),
{
    info!("Processing {} issues from {source}", issues.len());

    let total = issues.len();
    let mut records = Vec::with_capacity(total);

    for (idx, issue) in issues.iter().enumerate() {
        match extract_record(issue, &options.custom_fields, options.open_only)? {
            Some(record) => records.push(record),
            None => debug!(
                "Skipping closed issue {}",
                issue.key.as_deref().unwrap_or_default()
            ),
        }

        #[allow(clippy::cast_precision_loss)]
        let done = (idx + 1) as f64 / total as f64;
        progress(PROCESSING_START + done * (100.0 - PROCESSING_START));
    }

    if total == 0 {
        progress(100.0);
    }

    let classified: Vec<ClassifiedRecord> = records
        .into_iter()
        .map(|record| ClassifiedRecord::classify(record, &options.taxonomy))
        .collect();

    let pivots = options
        .pivots
        .dimensions()
        .into_iter()
        .map(|dimension| build_pivot(dimension, &classified))
        .collect();

    let dataset = Dataset {
        columns: dataset_columns(&options.fields),
        rows: classified
            .iter()
            .map(|record| record.to_row(&options.fields))
            .collect(),
    };

    info!(
        "Exported {} of {} issues ({} blockers)",
        dataset.len(),
        total,
        classified.iter().filter(|r| r.blocker).count()
    );

    Ok(IssueReport {
        source: source.to_string(),
        generated_at: Utc::now(),
        total_issues: total,
        exported_issues: dataset.len(),
        dataset,
        pivots,
    })
}
