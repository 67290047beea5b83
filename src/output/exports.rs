use anyhow::{bail, Result};
use std::io::Write;

use crate::config::OutputFormat;
use crate::issues::PivotTable;
use crate::report::IssueReport;

use super::workbook::export_xlsx;

/// Exports a report to a file-oriented format.
///
/// - CSV: an `Issues` section followed by one section per pivot
/// - HTML: self-contained report with one table per section
/// - JSON: the full report for programmatic access
/// - XLSX: an `Issues` worksheet plus one worksheet per pivot
///
/// The terminal summary is rendered separately by `print_summary`.
pub fn export_report(
    report: &IssueReport,
    format: OutputFormat,
    pretty: bool,
    output: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Summary => bail!("Summary format is printed to the terminal, not exported"),
        OutputFormat::Json => export_json(report, pretty, output),
        OutputFormat::Csv => export_csv(report, output),
        OutputFormat::Html => export_html(report, output),
        OutputFormat::Xlsx => export_xlsx(report, output),
    }
}

fn export_json(report: &IssueReport, pretty: bool, output: &mut dyn Write) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    writeln!(output, "{json}")?;
    Ok(())
}

/// Quotes a CSV field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_csv_line<S: AsRef<str>>(output: &mut dyn Write, values: &[S]) -> Result<()> {
    let line = values
        .iter()
        .map(|value| csv_field(value.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(output, "{line}")?;
    Ok(())
}

fn pivot_lines(pivot: &PivotTable) -> (Vec<String>, Vec<Vec<String>>) {
    let header = std::iter::once(pivot.row_header.clone())
        .chain(pivot.quarters.iter().map(ToString::to_string))
        .collect();
    let rows = pivot
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.label.clone())
                .chain(row.counts.iter().map(ToString::to_string))
                .collect()
        })
        .collect();
    (header, rows)
}

fn export_csv(report: &IssueReport, output: &mut dyn Write) -> Result<()> {
    writeln!(output, "# Issues")?;
    write_csv_line(output, &report.dataset.columns)?;
    for row in &report.dataset.rows {
        let values: Vec<String> = report
            .dataset
            .columns
            .iter()
            .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
            .collect();
        write_csv_line(output, &values)?;
    }

    for pivot in &report.pivots {
        writeln!(output)?;
        writeln!(output, "# {}", pivot.name)?;
        let (header, rows) = pivot_lines(pivot);
        write_csv_line(output, &header)?;
        for row in rows {
            write_csv_line(output, &row)?;
        }
    }

    Ok(())
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_html_table(
    output: &mut dyn Write,
    header: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    writeln!(output, "        <table>")?;
    writeln!(output, "            <thead>")?;
    writeln!(output, "                <tr>")?;
    for column in header {
        writeln!(output, "                    <th>{}</th>", escape_html(column))?;
    }
    writeln!(output, "                </tr>")?;
    writeln!(output, "            </thead>")?;
    writeln!(output, "            <tbody>")?;
    for row in rows {
        writeln!(output, "                <tr>")?;
        for value in row {
            writeln!(output, "                    <td>{}</td>", escape_html(value))?;
        }
        writeln!(output, "                </tr>")?;
    }
    writeln!(output, "            </tbody>")?;
    writeln!(output, "        </table>")?;
    Ok(())
}

fn export_html(report: &IssueReport, output: &mut dyn Write) -> Result<()> {
    let generated = report.generated_at.format("%Y-%m-%d %H:%M UTC");

    writeln!(output, "<!DOCTYPE html>")?;
    writeln!(output, "<html lang=\"en\">")?;
    writeln!(output, "<head>")?;
    writeln!(output, "    <meta charset=\"UTF-8\">")?;
    writeln!(output, "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(output, "    <title>Issue Report - {}</title>", escape_html(&report.source))?;
    writeln!(output, "    <style>")?;
    writeln!(output, "        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; background: #f5f5f5; }}")?;
    writeln!(output, "        .container {{ max-width: 1400px; margin: 0 auto; background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}")?;
    writeln!(output, "        h1 {{ color: #2c3e50; border-bottom: 3px solid #3498db; padding-bottom: 10px; }}")?;
    writeln!(output, "        h2 {{ color: #34495e; margin-top: 30px; }}")?;
    writeln!(output, "        .summary {{ background: #ecf0f1; padding: 20px; border-radius: 5px; margin: 20px 0; }}")?;
    writeln!(output, "        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}")?;
    writeln!(output, "        th, td {{ padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }}")?;
    writeln!(output, "        th {{ background: #3498db; color: white; }}")?;
    writeln!(output, "        tr:nth-child(even) {{ background: #f8f9fa; }}")?;
    writeln!(output, "    </style>")?;
    writeln!(output, "</head>")?;
    writeln!(output, "<body>")?;
    writeln!(output, "    <div class=\"container\">")?;
    writeln!(output, "        <h1>Issue Report</h1>")?;
    writeln!(output, "        <div class=\"summary\">")?;
    writeln!(output, "            <p><strong>Source:</strong> {}</p>", escape_html(&report.source))?;
    writeln!(output, "            <p><strong>Generated:</strong> {generated}</p>")?;
    writeln!(output, "            <p><strong>Issues fetched:</strong> {}</p>", report.total_issues)?;
    writeln!(output, "            <p><strong>Issues exported:</strong> {}</p>", report.exported_issues)?;
    writeln!(output, "        </div>")?;

    writeln!(output, "        <h2>Issues</h2>")?;
    let rows: Vec<Vec<String>> = report
        .dataset
        .rows
        .iter()
        .map(|row| {
            report
                .dataset
                .columns
                .iter()
                .map(|column| row.get(column).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    write_html_table(output, &report.dataset.columns, &rows)?;

    for pivot in &report.pivots {
        writeln!(output, "        <h2>{}</h2>", escape_html(&pivot.name))?;
        let (header, rows) = pivot_lines(pivot);
        write_html_table(output, &header, &rows)?;
    }

    writeln!(output, "        <footer style=\"margin-top: 40px; padding-top: 20px; border-top: 1px solid #ddd; color: #666; text-align: center;\">")?;
    writeln!(output, "            <p>Report generated by issuelens v{} on {generated}</p>", env!("CARGO_PKG_VERSION"))?;
    writeln!(output, "        </footer>")?;
    writeln!(output, "    </div>")?;
    writeln!(output, "</body>")?;
    writeln!(output, "</html>")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::{PivotRow, Quarter};
    use crate::report::{Cell, Dataset};
    use chrono::Utc;
    use indexmap::IndexMap;

    fn create_test_report() -> IssueReport {
        let mut row = IndexMap::new();
        row.insert("Key".to_string(), Cell::Text("PRJ-1".into()));
        row.insert("Summary".to_string(), Cell::Text("Jam, \"tray 2\"".into()));
        row.insert("Blocker".to_string(), Cell::Flag(false));

        IssueReport {
            source: "https://jira.example.com (project = PRJ)".to_string(),
            generated_at: Utc::now(),
            total_issues: 1,
            exported_issues: 1,
            dataset: Dataset {
                columns: vec!["Key".into(), "Summary".into(), "Blocker".into()],
                rows: vec![row],
            },
            pivots: vec![PivotTable {
                name: "Bug Resolution".to_string(),
                row_header: "Bug Resolution Category".to_string(),
                quarters: vec![Quarter::Q1, Quarter::Q3],
                rows: vec![PivotRow {
                    label: "Fixed: Code Change".to_string(),
                    counts: vec![1, 0],
                }],
            }],
        }
    }

    #[test]
    fn test_export_json() {
        let report = create_test_report();
        let mut output = Vec::new();
        export_report(&report, OutputFormat::Json, false, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json_str).unwrap();
        assert_eq!(value["dataset"]["rows"][0]["Key"], "PRJ-1");
        assert_eq!(value["dataset"]["rows"][0]["Blocker"], false);
        assert_eq!(value["pivots"][0]["quarters"][1], "Q3");
    }

    #[test]
    fn test_export_json_pretty() {
        let report = create_test_report();
        let mut output = Vec::new();
        export_json(&report, true, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();
        assert!(json_str.contains('\n'));
        assert!(json_str.contains("  "));
    }

    #[test]
    fn test_export_csv_sections() {
        let report = create_test_report();
        let mut output = Vec::new();
        export_csv(&report, &mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "# Issues");
        assert_eq!(lines[1], "Key,Summary,Blocker");
        assert_eq!(lines[2], "PRJ-1,\"Jam, \"\"tray 2\"\"\",False");
        assert!(csv.contains("# Bug Resolution"));
        assert!(csv.contains("Bug Resolution Category,Q1,Q3"));
        assert!(csv.contains("Fixed: Code Change,1,0"));
    }

    #[test]
    fn test_export_html_structure() {
        let report = create_test_report();
        let mut output = Vec::new();
        export_html(&report, &mut output).unwrap();
        let html = String::from_utf8(output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("<h2>Bug Resolution</h2>"));
        assert!(html.contains("Jam, &quot;tray 2&quot;"));
    }

    #[test]
    fn test_summary_is_not_exportable() {
        let report = create_test_report();
        let mut output = Vec::new();
        assert!(export_report(&report, OutputFormat::Summary, false, &mut output).is_err());
    }
}
