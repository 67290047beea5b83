use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::issues::{parse_issue_list, RawIssue};

/// Issue source backed by a JSON dump of a Jira search (either the raw
/// response or just its `issues` array).
pub struct FileProvider {
    pub path: PathBuf,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn describe(&self) -> String {
        self.path.display().to_string()
    }

    pub fn fetch_issues(&self) -> Result<Vec<RawIssue>> {
        let issues = load_issues(&self.path)?;
        info!("Loaded {} issues from {}", issues.len(), self.path.display());
        Ok(issues)
    }
}

fn load_issues(path: &Path) -> Result<Vec<RawIssue>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_issue_list(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueLensError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_search_response_dump() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"total": 2, "issues": [{{"key": "A-1"}}, {{"key": "A-2"}}]}}"#
        )
        .unwrap();

        let issues = FileProvider::new(file.path()).fetch_issues().unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileProvider::new("does/not/exist.json")
            .fetch_issues()
            .unwrap_err();
        assert!(matches!(err, IssueLensError::Io(_)));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = FileProvider::new(file.path()).fetch_issues().unwrap_err();
        assert!(matches!(err, IssueLensError::Json(_)));
    }
}
