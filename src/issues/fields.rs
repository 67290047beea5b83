use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IssueLensError;

/// Columns an export can emit, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Key,
    Summary,
    Status,
    Assignee,
    Reporter,
    Created,
    Updated,
    Priority,
    IssueType,
    Labels,
    Project,
    Severity,
    ApplicableProducts,
    BugResolution,
    FixedInBuild,
    EncounteredBy,
    TeamWatchList,
    DeferredProducts,
    HowFound,
    FoundInFwVersion,
    Reproducibility,
    IssueLinks,
    Resolved,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::Key,
        Field::Summary,
        Field::Status,
        Field::Assignee,
        Field::Reporter,
        Field::Created,
        Field::Updated,
        Field::Priority,
        Field::IssueType,
        Field::Labels,
        Field::Project,
        Field::Severity,
        Field::ApplicableProducts,
        Field::BugResolution,
        Field::FixedInBuild,
        Field::EncounteredBy,
        Field::TeamWatchList,
        Field::DeferredProducts,
        Field::HowFound,
        Field::FoundInFwVersion,
        Field::Reproducibility,
        Field::IssueLinks,
        Field::Resolved,
    ];

    /// Column header used in every output format.
    pub fn label(self) -> &'static str {
        match self {
            Field::Key => "Key",
            Field::Summary => "Summary",
            Field::Status => "Status",
            Field::Assignee => "Assignee",
            Field::Reporter => "Reporter",
            Field::Created => "Created",
            Field::Updated => "Updated",
            Field::Priority => "Priority",
            Field::IssueType => "Issue Type",
            Field::Labels => "Labels",
            Field::Project => "Project",
            Field::Severity => "Severity",
            Field::ApplicableProducts => "Applicable Products",
            Field::BugResolution => "Bug Resolution",
            Field::FixedInBuild => "Fixed in Build",
            Field::EncounteredBy => "Encountered By",
            Field::TeamWatchList => "Team Watch List",
            Field::DeferredProducts => "Deferred Products",
            Field::HowFound => "How Found",
            Field::FoundInFwVersion => "Found in FW Version",
            Field::Reproducibility => "Reproducibility",
            Field::IssueLinks => "Issue Links",
            Field::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = IssueLensError;

    /// Accepts the column label in any case, with spaces, dashes or
    /// underscores between words ("Issue Type", "issue-type", "issue_type").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Field::ALL
            .into_iter()
            .find(|field| normalize_label(field.label()) == wanted)
            .ok_or_else(|| IssueLensError::Config(format!("Unknown field: '{}'", s.trim())))
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The set of columns a run emits.
///
/// Iteration always follows [`Field::ALL`] order, whatever order the
/// selection was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldSelection(BTreeSet<Field>);

impl FieldSelection {
    pub fn all() -> Self {
        Self(Field::ALL.into_iter().collect())
    }

    pub fn only(fields: impl IntoIterator<Item = Field>) -> Self {
        Self(fields.into_iter().collect())
    }

    /// Parses labels; an empty list means every field.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> crate::error::Result<Self> {
        if labels.is_empty() {
            return Ok(Self::all());
        }
        labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<crate::error::Result<BTreeSet<_>>>()
            .map(Self)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl TryFrom<Vec<String>> for FieldSelection {
    type Error = IssueLensError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_labels(&labels)
    }
}

impl From<FieldSelection> for Vec<String> {
    fn from(selection: FieldSelection) -> Self {
        selection.iter().map(|f| f.label().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod from_str {
        use super::*;

        #[test]
        fn parses_labels_case_and_separator_insensitively() {
            assert_eq!("Issue Type".parse::<Field>().unwrap(), Field::IssueType);
            assert_eq!("issue-type".parse::<Field>().unwrap(), Field::IssueType);
            assert_eq!(
                "found_in_fw_version".parse::<Field>().unwrap(),
                Field::FoundInFwVersion
            );
            assert_eq!(" key ".parse::<Field>().unwrap(), Field::Key);
        }

        #[test]
        fn rejects_unknown_labels() {
            let err = "Sprint".parse::<Field>().unwrap_err();
            assert!(err.to_string().contains("Sprint"));
        }

        #[test]
        fn every_label_parses_back_to_its_field() {
            for field in Field::ALL {
                assert_eq!(field.label().parse::<Field>().unwrap(), field);
            }
        }
    }

    #[cfg(test)]
    mod selection {
        use super::*;

        #[test]
        fn empty_label_list_selects_everything() {
            let selection = FieldSelection::from_labels::<&str>(&[]).unwrap();
            assert_eq!(selection.len(), Field::ALL.len());
        }

        #[test]
        fn iterates_in_canonical_order() {
            let selection = FieldSelection::from_labels(&["Resolved", "Key", "Status"]).unwrap();
            let fields: Vec<_> = selection.iter().collect();
            assert_eq!(fields, vec![Field::Key, Field::Status, Field::Resolved]);
        }

        #[test]
        fn deserializes_from_label_list() {
            let selection: FieldSelection =
                serde_json::from_str(r#"["Key", "Bug Resolution"]"#).unwrap();
            assert!(selection.contains(Field::BugResolution));
            assert!(!selection.contains(Field::Summary));
        }
    }
}
