//! Markdown report generation
//!
//! Renders the leaderboard as a GitHub-flavoured markdown table preceded by a
//! short run summary.

use crate::output::{ScrapeReport, COLUMNS};

/// Formats a report as markdown
///
/// # Arguments
///
/// * `report` - The scraped records and run parameters
///
/// # Returns
///
/// A formatted markdown string
pub fn format_markdown(report: &ScrapeReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", report.title()));

    md.push_str(&format!("- **Stat**: {}\n", report.kind.name()));
    md.push_str(&format!("- **Pages**: {}\n", report.page_count));
    md.push_str(&format!("- **Players**: {}\n", report.records.len()));
    md.push_str(&format!(
        "- **Scraped**: {}\n\n",
        report.scraped_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if report.records.is_empty() {
        md.push_str("*No players found.*\n");
        return md;
    }

    md.push_str(&format!("| {} |\n", COLUMNS.join(" | ")));
    md.push_str(&format!("|{}\n", "------|".repeat(COLUMNS.len())));

    for record in &report.records {
        let cells = ScrapeReport::cells(record).map(|cell| escape_cell(&cell));
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }

    md
}

/// Escapes characters that would break a markdown table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}
