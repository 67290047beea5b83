mod file;
mod jira;

pub use file::FileProvider;
pub use jira::{JiraProvider, DEFAULT_PAGE_SIZE};
