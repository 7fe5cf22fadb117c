//! Plain-text report
//!
//! ```text
//! --------------
//! <id> (¶<n>)
//! --------------
//! <base label>
//! <base text>
//!
//! <witness label>
//! ˜˜˜ |deletion|...|
//! +++ |addition|...|
//! ```
//!
//! Marker lines only appear when the witness has deletions or additions.

use crate::report::CollationReport;

const RULE: &str = "--------------";
const DELETION_MARK: &str = "˜˜˜";
const ADDITION_MARK: &str = "+++";

pub fn render(report: &CollationReport) -> String {
    let mut out = String::new();

    for entry in &report.entries {
        out.push_str(&format!(
            "\n\n{RULE}\n{} (¶{})\n{RULE}\n{}\n{}\n",
            entry.id, entry.ordinal, report.base_label, entry.base_text
        ));

        for reading in &entry.readings {
            out.push_str(&format!("\n{}\n", reading.label));
            if !reading.deletions.is_empty() {
                out.push_str(&format!("{DELETION_MARK} {}\n", piped(&reading.deletions)));
            }
            if !reading.additions.is_empty() {
                out.push_str(&format!("{ADDITION_MARK} {}\n", piped(&reading.additions)));
            }
        }
    }

    out
}

/// `|a|b|`
fn piped(items: &[String]) -> String {
    let mut out = String::from("|");
    for item in items {
        out.push_str(item);
        out.push('|');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_report;

    #[test]
    fn test_entry_layout() {
        let text = render(&sample_report());
        let expected = "\n\n--------------\nb1d3qun-d1e1 (¶1)\n--------------\n#S\nDeus est bonus\n\
                        \n#V\n+++ |non|\n\
                        \n#A\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_deletions_precede_additions() {
        let mut report = sample_report();
        report.entries[0].readings[1].deletions = vec!["est".to_string(), "bonus".to_string()];
        report.entries[0].readings[1].additions = vec!["malus".to_string()];

        let text = render(&report);
        assert!(text.ends_with("\n#A\n˜˜˜ |est|bonus|\n+++ |malus|\n"));
    }

    #[test]
    fn test_piped_lists() {
        assert_eq!(piped(&["a".to_string(), "b c".to_string()]), "|a|b c|");
    }
}
