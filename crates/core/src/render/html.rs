//! Hypertext report with inline diff highlighting

use crate::diff::{DiffOp, EditType};
use crate::report::CollationReport;

const HEADER: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n</head>\n<body>\n";
const FOOTER: &str = "</body>\n</html>\n";

pub fn render(report: &CollationReport) -> String {
    let mut out = String::from(HEADER);

    for entry in &report.entries {
        out.push_str(&format!(
            "<h1>{} (¶{})</h1>\n",
            escape(&entry.id),
            entry.ordinal
        ));
        for reading in &entry.readings {
            out.push_str(&format!("<h2>{}</h2>", escape(&reading.label)));
            out.push_str(&highlight(&reading.ops));
            out.push('\n');
        }
    }

    out.push_str(FOOTER);
    out
}

/// Inline markup for an edit script: insertions green, deletions red
pub fn highlight(ops: &[DiffOp]) -> String {
    ops.iter()
        .map(|op| {
            let text = escape(&op.text).replace('\n', "&para;<br>");
            match op.edit_type {
                EditType::Insert => format!("<ins style=\"background:#e6ffe6;\">{text}</ins>"),
                EditType::Delete => format!("<del style=\"background:#ffe6e6;\">{text}</del>"),
                EditType::Equal => format!("<span>{text}</span>"),
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
