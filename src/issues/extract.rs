use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{Field, FieldSelection};
use super::links::resolve_link_titles;
use super::resolution::is_closed;
use super::types::{NamedValue, RawIssue};
use crate::error::{IssueLensError, Result};

pub const UNASSIGNED: &str = "Unassigned";
const OUTPUT_DATE_FORMAT: &str = "%m-%d-%Y";

/// Where the secondary attributes live in the Jira instance's schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomFieldIds {
    pub severity: String,
    pub applicable_products: String,
    pub bug_resolution: String,
    pub fixed_in_build: String,
    pub encountered_by: String,
    pub team_watch_list: String,
    pub deferred_products: String,
    pub how_found: String,
    pub found_in_fw_version: String,
    pub reproducibility: String,
}

impl Default for CustomFieldIds {
    fn default() -> Self {
        Self {
            severity: "customfield_10605".to_string(),
            applicable_products: "customfield_13550".to_string(),
            bug_resolution: "customfield_13555".to_string(),
            fixed_in_build: "customfield_11412".to_string(),
            encountered_by: "customfield_13073".to_string(),
            team_watch_list: "customfield_31502".to_string(),
            deferred_products: "customfield_16203".to_string(),
            how_found: "customfield_12900".to_string(),
            found_in_fw_version: "customfield_11405".to_string(),
            reproducibility: "customfield_11408".to_string(),
        }
    }
}

/// One issue flattened into report columns.
///
/// Holds every column regardless of the field selection; selection only
/// applies when a row is emitted via [`NormalizedRecord::project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: String,
    pub reporter: String,
    pub created: NaiveDate,
    pub updated: NaiveDate,
    pub priority: String,
    pub issue_type: String,
    pub labels: String,
    pub project: String,
    pub severity: String,
    pub applicable_products: String,
    pub bug_resolution: String,
    pub fixed_in_build: String,
    pub encountered_by: String,
    pub team_watch_list: String,
    pub deferred_products: String,
    pub how_found: String,
    pub found_in_fw_version: String,
    pub reproducibility: String,
    pub issue_links: String,
    pub resolved: Option<NaiveDate>,
}

impl NormalizedRecord {
    /// Severity as shown in reports: the four standard levels get a rank
    /// prefix so they sort in order of importance.
    pub fn severity_label(&self) -> String {
        match self.severity.as_str() {
            "Critical" => "1 Critical".to_string(),
            "High" => "2 High".to_string(),
            "Medium" => "3 Medium".to_string(),
            "Low" => "4 Low".to_string(),
            other => other.to_string(),
        }
    }

    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Key => self.key.clone(),
            Field::Summary => self.summary.clone(),
            Field::Status => self.status.clone(),
            Field::Assignee => self.assignee.clone(),
            Field::Reporter => self.reporter.clone(),
            Field::Created => format_date(self.created),
            Field::Updated => format_date(self.updated),
            Field::Priority => self.priority.clone(),
            Field::IssueType => self.issue_type.clone(),
            Field::Labels => self.labels.clone(),
            Field::Project => self.project.clone(),
            Field::Severity => self.severity_label(),
            Field::ApplicableProducts => self.applicable_products.clone(),
            Field::BugResolution => self.bug_resolution.clone(),
            Field::FixedInBuild => self.fixed_in_build.clone(),
            Field::EncounteredBy => self.encountered_by.clone(),
            Field::TeamWatchList => self.team_watch_list.clone(),
            Field::DeferredProducts => self.deferred_products.clone(),
            Field::HowFound => self.how_found.clone(),
            Field::FoundInFwVersion => self.found_in_fw_version.clone(),
            Field::Reproducibility => self.reproducibility.clone(),
            Field::IssueLinks => self.issue_links.clone(),
            Field::Resolved => self.resolved.map(format_date).unwrap_or_default(),
        }
    }

    /// Emits the selected columns only, in canonical column order.
    pub fn project(&self, selection: &FieldSelection) -> IndexMap<String, String> {
        selection
            .iter()
            .map(|field| (field.label().to_string(), self.value(field)))
            .collect()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(OUTPUT_DATE_FORMAT).to_string()
}

/// Parses the `YYYY-MM-DD` prefix of a Jira timestamp
/// (e.g. `2024-11-03T10:00:00.000+0000`).
pub fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let prefix = raw.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Renders a custom field value: option objects by their `value`
/// (or `name`/`displayName`), arrays joined with `", "`, scalars as-is.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => ["value", "name", "displayName"]
            .iter()
            .find_map(|attr| map.get(*attr).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string(),
    }
}

fn named(value: Option<&NamedValue>) -> Option<&str> {
    value.and_then(|v| v.name.as_deref())
}

fn required<'a>(key: &str, value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value.ok_or_else(|| IssueLensError::malformed(key, format!("missing required field '{field}'")))
}

fn required_date(key: &str, value: Option<&str>, field: &str) -> Result<NaiveDate> {
    let raw = required(key, value, field)?;
    parse_date_prefix(raw)
        .ok_or_else(|| IssueLensError::malformed(key, format!("unparsable {field} date '{raw}'")))
}

/// Flattens one raw issue.
///
/// Returns `Ok(None)` when `open_only` is set and the issue is closed.
/// Missing optional fields fall back to their defaults; a missing required
/// field or an unparsable date is a [`IssueLensError::MalformedRecord`].
pub fn extract_record(
    issue: &RawIssue,
    custom_fields: &CustomFieldIds,
    open_only: bool,
) -> Result<Option<NormalizedRecord>> {
    let key = issue
        .key
        .as_deref()
        .ok_or_else(|| IssueLensError::malformed("<unknown>", "missing issue key"))?;
    let fields = &issue.fields;

    let status = required(key, named(fields.status.as_ref()), "status")?;
    if open_only && is_closed(status) {
        return Ok(None);
    }

    let summary = required(key, fields.summary.as_deref(), "summary")?;
    let reporter = required(
        key,
        fields.reporter.as_ref().and_then(|u| u.display_name.as_deref()),
        "reporter",
    )?;
    let issue_type = required(key, named(fields.issuetype.as_ref()), "issuetype")?;
    let project = required(key, named(fields.project.as_ref()), "project")?;
    let created = required_date(key, fields.created.as_deref(), "created")?;
    let updated = required_date(key, fields.updated.as_deref(), "updated")?;

    let resolved = fields
        .resolutiondate
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            parse_date_prefix(raw).ok_or_else(|| {
                IssueLensError::malformed(key, format!("unparsable resolutiondate date '{raw}'"))
            })
        })
        .transpose()?;

    let custom = |id: &str| fields.custom_field(id).map(display_value).unwrap_or_default();

    Ok(Some(NormalizedRecord {
        key: key.to_string(),
        summary: summary.to_string(),
        status: status.to_string(),
        assignee: fields
            .assignee
            .as_ref()
            .and_then(|u| u.display_name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        reporter: reporter.to_string(),
        created,
        updated,
        priority: named(fields.priority.as_ref()).unwrap_or_default().to_string(),
        issue_type: issue_type.to_string(),
        labels: fields.labels.as_deref().unwrap_or_default().join(", "),
        project: project.to_string(),
        severity: custom(&custom_fields.severity),
        applicable_products: custom(&custom_fields.applicable_products),
        bug_resolution: custom(&custom_fields.bug_resolution),
        fixed_in_build: custom(&custom_fields.fixed_in_build),
        encountered_by: custom(&custom_fields.encountered_by),
        team_watch_list: custom(&custom_fields.team_watch_list),
        deferred_products: custom(&custom_fields.deferred_products),
        how_found: custom(&custom_fields.how_found),
        found_in_fw_version: custom(&custom_fields.found_in_fw_version),
        reproducibility: custom(&custom_fields.reproducibility),
        issue_links: resolve_link_titles(fields.issuelinks.as_deref().unwrap_or_default()),
        resolved,
    }))
}
