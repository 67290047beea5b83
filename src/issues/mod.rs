mod blockers;
mod extract;
mod fields;
mod links;
mod pipeline;
mod pivot;
mod quarters;
mod resolution;
mod types;

pub use fields::{Field, FieldSelection};
pub use pipeline::{run_pipeline, ExportOptions, PROCESSING_START};
pub use pivot::{PivotRow, PivotTable};
pub use quarters::Quarter;
pub use types::{parse_issue_list, RawIssue};
