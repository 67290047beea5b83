use std::fmt::Write;

use comfy_table::Cell;

use crate::issues::PivotTable;
use crate::report::{Cell as ReportCell, IssueReport, BLOCKER_COLUMN};

use super::styling::{blockers, figure, heading, icon, muted, source};
use super::tables::{blocker_cell, count_cell, create_table, cyan_header};

/// Rows of the issues table shown in the terminal.
const PREVIEW_ROWS: usize = 20;
/// Columns of the issues preview, when selected.
const PREVIEW_COLUMNS: [&str; 6] = [
    "Key",
    "Summary",
    "Status",
    "Quarter",
    "Blocker",
    "Bug Resolution Category",
];

/// Prints a human-readable summary of the report to stdout.
///
/// Shows an overview, a preview of the issues sheet and one table per
/// pivot with zero cells dimmed.
pub fn print_summary(report: &IssueReport) {
    println!("{}", render_summary(report));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", icon(emoji), heading(title));
}

fn render_pivot(pivot: &PivotTable) -> String {
    let mut table = create_table();
    let header: Vec<String> = std::iter::once(pivot.row_header.clone())
        .chain(pivot.quarters.iter().map(ToString::to_string))
        .chain(std::iter::once("Total".to_string()))
        .collect();
    table.set_header(cyan_header(&header));

    let max = pivot
        .rows
        .iter()
        .flat_map(|row| row.counts.iter().copied())
        .max()
        .unwrap_or(0);

    for row in &pivot.rows {
        let mut cells = vec![Cell::new(&row.label)];
        cells.extend(row.counts.iter().map(|&count| count_cell(count, max)));
        cells.push(Cell::new(row.counts.iter().sum::<usize>()));
        table.add_row(cells);
    }

    table.to_string()
}

fn render_preview(report: &IssueReport) -> String {
    let columns: Vec<&str> = PREVIEW_COLUMNS
        .iter()
        .copied()
        .filter(|column| report.dataset.columns.iter().any(|c| c == column))
        .collect();

    let mut table = create_table();
    table.set_header(cyan_header(&columns));

    for row in report.dataset.rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| match row.get(*column) {
                Some(ReportCell::Flag(flag)) if *column == BLOCKER_COLUMN => blocker_cell(*flag),
                Some(value) => Cell::new(value),
                None => Cell::new(""),
            })
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

#[allow(clippy::format_push_string)]
fn render_summary(report: &IssueReport) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");

    let blocker_count = report
        .dataset
        .rows
        .iter()
        .filter(|row| matches!(row.get(BLOCKER_COLUMN), Some(ReportCell::Flag(true))))
        .count();

    output.push_str(&format!(
        "  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n\n",
        muted("Source:"),
        source(&report.source),
        muted("Issues fetched:"),
        figure(report.total_issues),
        muted("Issues exported:"),
        figure(report.exported_issues),
        muted("Blockers:"),
        blockers(blocker_count),
        muted("Generated:"),
        muted(report.generated_at.format("%Y-%m-%d %H:%M UTC"))
    ));

    if report.dataset.is_empty() {
        output.push_str(&format!("{}\n", figure("No issues to report.")));
        return output;
    }

    add_section_header(&mut output, "📋", "Issues");
    output.push_str(&render_preview(report));
    output.push('\n');
    if report.dataset.len() > PREVIEW_ROWS {
        output.push_str(&format!(
            "  {}\n",
            muted(format!(
                "… {} more rows (use --format csv/json/html for the full sheet)",
                report.dataset.len() - PREVIEW_ROWS
            ))
        ));
    }
    output.push('\n');

    for pivot in &report.pivots {
        let title = format!("{} ({} issues)", pivot.name, pivot.total());
        add_section_header(&mut output, "🧮", &title);
        if pivot.is_empty() {
            output.push_str(&format!("  {}\n\n", muted("No matching issues.")));
            continue;
        }
        output.push_str(&render_pivot(pivot));
        output.push_str("\n\n");
    }

    output
}
