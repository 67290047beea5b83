mod exports;
mod progress;
mod styling;
mod summary;
mod tables;
mod workbook;

pub use exports::export_report;
pub use progress::ExportProgress;
pub use summary::print_summary;

/// Prints the issuelens banner to stderr.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        styling::brand("🔎 issuelens"),
        styling::muted(env!("CARGO_PKG_VERSION")),
        styling::muted("Jira issue report exporter")
    );
}
