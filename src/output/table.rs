//! Plain-text table rendering
//!
//! Produces a bordered, left-aligned table sized to its widest cell:
//!
//! ```text
//! +------+--------------+
//! | Rank | Player Name  |
//! +------+--------------+
//! | 1    | Gareth Barry |
//! ```

use crate::output::{ScrapeReport, COLUMNS};

/// Formats a report as a titled text table
pub fn format_table(report: &ScrapeReport) -> String {
    let rows: Vec<[String; 6]> = report.records.iter().map(ScrapeReport::cells).collect();

    let mut widths = COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = border(&widths);
    let mut out = String::new();

    out.push_str(&report.title());
    out.push('\n');
    out.push_str(&separator);
    out.push_str(&line(&COLUMNS.map(str::to_string), &widths));
    out.push_str(&separator);
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    if !rows.is_empty() {
        out.push_str(&separator);
    }

    out
}

fn border(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for width in widths {
        s.push_str(&"-".repeat(width + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let padding = width - cell.chars().count();
        s.push(' ');
        s.push_str(cell);
        s.push_str(&" ".repeat(padding + 1));
        s.push('|');
    }
    s.push('\n');
    s
}
