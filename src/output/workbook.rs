use anyhow::Result;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::io::Write;

use crate::issues::PivotTable;
use crate::report::{Cell, IssueReport};

const ISSUES_SHEET: &str = "Issues";

fn write_header(sheet: &mut Worksheet, labels: &[String], bold: &Format) -> Result<()> {
    for (col, label) in labels.iter().enumerate() {
        sheet.write_string_with_format(0, u16::try_from(col)?, label.as_str(), bold)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_issues(sheet: &mut Worksheet, report: &IssueReport, bold: &Format) -> Result<()> {
    write_header(sheet, &report.dataset.columns, bold)?;

    for (idx, row) in report.dataset.rows.iter().enumerate() {
        let row_num = u32::try_from(idx + 1)?;
        for (col, column) in report.dataset.columns.iter().enumerate() {
            let col = u16::try_from(col)?;
            match row.get(column) {
                Some(Cell::Flag(flag)) => sheet.write_boolean(row_num, col, *flag)?,
                Some(Cell::Text(text)) => sheet.write_string(row_num, col, text.as_str())?,
                None => continue,
            };
        }
    }

    sheet.autofit();
    Ok(())
}

fn write_pivot(sheet: &mut Worksheet, pivot: &PivotTable, bold: &Format) -> Result<()> {
    let header: Vec<String> = std::iter::once(pivot.row_header.clone())
        .chain(pivot.quarters.iter().map(ToString::to_string))
        .collect();
    write_header(sheet, &header, bold)?;

    for (idx, row) in pivot.rows.iter().enumerate() {
        let row_num = u32::try_from(idx + 1)?;
        sheet.write_string(row_num, 0, row.label.as_str())?;
        for (col, count) in row.counts.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let value = *count as f64;
            sheet.write_number(row_num, u16::try_from(col + 1)?, value)?;
        }
    }

    sheet.autofit();
    Ok(())
}

/// Builds the workbook: an `Issues` sheet followed by one sheet per pivot.
pub fn build_workbook(report: &IssueReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(ISSUES_SHEET)?;
    write_issues(sheet, report, &bold)?;

    for pivot in &report.pivots {
        let sheet = workbook.add_worksheet();
        sheet.set_name(pivot.name.as_str())?;
        write_pivot(sheet, pivot, &bold)?;
    }

    Ok(workbook)
}

pub fn export_xlsx(report: &IssueReport, output: &mut dyn Write) -> Result<()> {
    let mut workbook = build_workbook(report)?;
    let buffer = workbook.save_to_buffer()?;
    output.write_all(&buffer)?;
    Ok(())
}
