//! Markdown report rendering for size diffs
//!
//! The output is a pull-request-comment-ready Markdown document: one
//! emoji-labeled section per non-empty partition (grew, shrank, unchanged),
//! each holding a pipe table of per-file size changes.

use crate::diff::{DiffMapping, DiffRecord};
use crate::fmt::{format_bytes, format_bytes_signed};

const HEADING_BIGGER: &str = "Files that got Bigger 🚨:";
const HEADING_SMALLER: &str = "Files that got Smaller 🎉:";
const HEADING_SAME: &str = "Files that stayed the same size 🤷‍:";

/// One metric cell: signed delta, plus the unsigned absolute in parentheses
/// when the file existed in the base build
fn metric_cell(delta: i64, absolute: Option<u64>) -> String {
    match absolute {
        Some(bytes) => format!("{} ({})", format_bytes_signed(delta), format_bytes(bytes)),
        None => format_bytes_signed(delta),
    }
}

fn report_table(entries: &[(&String, &DiffRecord)]) -> String {
    let mut table = String::from("File | raw | gzip | brotli\n--- | --- | --- | ---\n");

    for (file, record) in entries {
        let row = [
            metric_cell(record.raw, record.absolute.map(|a| a.raw)),
            metric_cell(record.gzip, record.absolute.map(|a| a.gzip)),
            metric_cell(record.brotli, record.absolute.map(|a| a.brotli)),
        ];
        table.push_str(&format!("{}|{}\n", file, row.join("|")));
    }

    table
}

/// Render a diff mapping as a Markdown report
///
/// Entries are partitioned by the sign of their `raw` field; new files use
/// the same sign test, so a non-empty new file lands in the "Bigger"
/// section. Sections appear in the fixed order grew → shrank → unchanged,
/// empty sections are skipped, and trailing whitespace is trimmed.
///
/// # Examples
///
/// ```
/// use asset_delta::diff::{DiffMapping, DiffRecord};
/// use asset_delta::report::render_report;
///
/// let mut diff = DiffMapping::new();
/// diff.insert(
///     "app.css".to_string(),
///     DiffRecord { raw: 2048, gzip: 512, brotli: 400, absolute: None },
/// );
///
/// let report = render_report(&diff);
/// assert!(report.starts_with("Files that got Bigger 🚨:"));
/// assert!(report.contains("app.css|+2.00 KB|+512 B|+400 B"));
/// ```
pub fn render_report(diff: &DiffMapping) -> String {
    let mut bigger: Vec<(&String, &DiffRecord)> = Vec::new();
    let mut smaller: Vec<(&String, &DiffRecord)> = Vec::new();
    let mut same: Vec<(&String, &DiffRecord)> = Vec::new();

    for (file, record) in diff {
        if record.raw > 0 {
            bigger.push((file, record));
        } else if record.raw < 0 {
            smaller.push((file, record));
        } else {
            same.push((file, record));
        }
    }

    let mut output = String::new();

    if !bigger.is_empty() {
        output.push_str(&format!("{HEADING_BIGGER}\n\n{}\n", report_table(&bigger)));
    }
    if !smaller.is_empty() {
        output.push_str(&format!("{HEADING_SMALLER}\n\n{}\n\n", report_table(&smaller)));
    }
    if !same.is_empty() {
        output.push_str(&format!("{HEADING_SAME}\n\n{}\n\n", report_table(&same)));
    }

    output.trim_end().to_string()
}
