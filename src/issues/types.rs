use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Jira issue as returned by the REST search endpoint.
///
/// Every field is optional here; presence of the required ones is checked
/// during extraction so a missing value surfaces as a malformed record
/// instead of a deserialization failure for the whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawIssue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub fields: RawFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<NamedValue>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default)]
    pub reporter: Option<User>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub priority: Option<NamedValue>,
    #[serde(default)]
    pub issuetype: Option<NamedValue>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub project: Option<NamedValue>,
    #[serde(default)]
    pub resolutiondate: Option<String>,
    #[serde(default)]
    pub issuelinks: Option<Vec<RawIssueLink>>,
    /// `customfield_*` entries and anything else the instance returns.
    #[serde(flatten)]
    pub custom: HashMap<String, Value>,
}

impl RawFields {
    /// Looks up a custom field, treating JSON `null` as absent.
    pub fn custom_field(&self, id: &str) -> Option<&Value> {
        self.custom.get(id).filter(|value| !value.is_null())
    }
}

/// Objects Jira exposes through their `name` (status, priority, type, project).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One entry of `fields.issuelinks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIssueLink {
    #[serde(default)]
    pub outward_issue: Option<LinkedIssue>,
    #[serde(default)]
    pub inward_issue: Option<LinkedIssue>,
    /// Explicit title some link representations carry.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedIssue {
    pub key: String,
}

/// Reads a raw issue list from either a bare JSON array or a search
/// response object (`{"issues": [...]}`).
pub fn parse_issue_list(content: &str) -> serde_json::Result<Vec<RawIssue>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IssueList {
        Bare(Vec<RawIssue>),
        Search { issues: Vec<RawIssue> },
    }

    let list: IssueList = serde_json::from_str(content)?;
    Ok(match list {
        IssueList::Bare(issues) | IssueList::Search { issues } => issues,
    })
}
