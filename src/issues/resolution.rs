use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// Statuses that count as done, both for the open-only filter and for
/// classifying issues closed without a bug resolution.
pub const CLOSED_STATUSES: [&str; 2] = ["Closed", "Accepted"];

pub fn is_closed(status: &str) -> bool {
    CLOSED_STATUSES.contains(&status)
}

const FIXED_CODE_CHANGE: &[&str] = &[
    "Fixed: by Earlier Fix",
    "Fixed: Code/Build Change",
    "Fixed: Code/Build Change due to Design/Spec Change",
    "Fixed: Code Change",
    "Fixed: Code Change - Partner API Impact",
    "Fixed: Configuration Change",
    "Fixed: Database Change",
    "Fixed: Design Change",
    "Fixed: Design Changed",
    "Fixed: Documentation Change",
    "Fixed: Engine Change",
    "Fixed: Firmware Change",
    "Fixed: Hardware Change",
    "Fixed: Infrastructure Change",
    "Unknown",
    "Code Change Out of Scope",
    "Deployed",
    "New Requirement",
    "Other: See Comment",
    "Tool Change",
    "Transfer: HP Internal",
    "Service unavailability",
];

const NOT_A_DEFECT: &[&str] = &[
    "Not a Defect: Other",
    "Not a Defect: As Designed",
    "Not a Defect: App/OS Error",
    "Not a Defect: Feature Not Ready",
    "Not a Defect: Design Limitation",
];

const CANNOT_REPRODUCE: &[&str] = &["Cannot Reproduce", "Root Cause Unknown: Cannot Reproduce"];

const DUPLICATE: &[&str] = &["Duplicate", "Duplicate: of Bug"];

const FALSE_DEFECT: &[&str] = &[
    "Test: Test/Build Mismatch",
    "Test: Test Case Error",
    "Test: Test Change",
    "Test: Test Env Error",
    "Test Setup Error",
    "Partner Education",
    "Partner setup issue",
    "External Error: Incorrect Testing",
    "Invalid",
    "Submission Error",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResolutionCategory {
    FixedCodeChange,
    NotADefect,
    CannotReproduce,
    Duplicate,
    FalseDefect,
    OpenDefects,
    Other,
}

impl ResolutionCategory {
    pub fn label(self) -> &'static str {
        match self {
            ResolutionCategory::FixedCodeChange => "Fixed: Code Change",
            ResolutionCategory::NotADefect => "NAD",
            ResolutionCategory::CannotReproduce => "Cannot Reproduce",
            ResolutionCategory::Duplicate => "Duplicate",
            ResolutionCategory::FalseDefect => "False Defect",
            ResolutionCategory::OpenDefects => "Open Defects",
            ResolutionCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ResolutionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vocabulary tables mapping free-text bug resolutions onto categories.
///
/// Each table can be replaced from the config file; missing tables fall
/// back to the built-in vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolutionTaxonomy {
    #[serde(default = "default_fixed")]
    pub fixed: Vec<String>,
    #[serde(default = "default_not_a_defect")]
    pub not_a_defect: Vec<String>,
    #[serde(default = "default_cannot_reproduce")]
    pub cannot_reproduce: Vec<String>,
    #[serde(default = "default_duplicate")]
    pub duplicate: Vec<String>,
    #[serde(default = "default_false_defect")]
    pub false_defect: Vec<String>,
}

impl Default for ResolutionTaxonomy {
    fn default() -> Self {
        Self {
            fixed: default_fixed(),
            not_a_defect: default_not_a_defect(),
            cannot_reproduce: default_cannot_reproduce(),
            duplicate: default_duplicate(),
            false_defect: default_false_defect(),
        }
    }
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(ToString::to_string).collect()
}

fn default_fixed() -> Vec<String> {
    owned(FIXED_CODE_CHANGE)
}

fn default_not_a_defect() -> Vec<String> {
    owned(NOT_A_DEFECT)
}

fn default_cannot_reproduce() -> Vec<String> {
    owned(CANNOT_REPRODUCE)
}

fn default_duplicate() -> Vec<String> {
    owned(DUPLICATE)
}

fn default_false_defect() -> Vec<String> {
    owned(FALSE_DEFECT)
}

impl ResolutionTaxonomy {
    /// Classifies a bug resolution value. First matching rule wins:
    /// fixed (or empty and closed), NAD, cannot reproduce, duplicate,
    /// false defect, open (empty and not closed), other.
    pub fn classify(&self, value: &str, status: &str) -> ResolutionCategory {
        let member = |table: &[String]| table.iter().any(|entry| entry == value);
        let closed = is_closed(status);

        if member(&self.fixed) || (value.is_empty() && closed) {
            ResolutionCategory::FixedCodeChange
        } else if member(&self.not_a_defect) {
            ResolutionCategory::NotADefect
        } else if member(&self.cannot_reproduce) {
            ResolutionCategory::CannotReproduce
        } else if member(&self.duplicate) {
            ResolutionCategory::Duplicate
        } else if member(&self.false_defect) {
            ResolutionCategory::FalseDefect
        } else if value.is_empty() {
            ResolutionCategory::OpenDefects
        } else {
            debug!("Bug resolution '{value}' matched no category, using Other");
            ResolutionCategory::Other
        }
    }
}
