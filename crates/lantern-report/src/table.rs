//! Fixed-width terminal tables.

use crate::rows::ReportRow;

const COLUMNS: [&str; 5] = ["Model", "Lemma", "Status", "Steps", "Flags"];

fn cells(row: &ReportRow) -> [String; 5] {
    [
        row.model.clone(),
        row.lemma.clone(),
        row.status_cell(),
        row.steps_cell(),
        row.flags_cell(),
    ]
}

/// Render rows as an aligned ASCII table with a header rule.
pub fn render_table(rows: &[ReportRow]) -> String {
    let body: Vec<[String; 5]> = rows.iter().map(cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.len()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let format_line = |cells: &[String]| {
        let mut line = String::new();
        for (i, (cell, &width)) in cells.iter().zip(&widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(&format!("{cell:<width$}"));
        }
        line.trim_end().to_string() + "\n"
    };

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut out = format_line(&header);
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &body {
        out.push_str(&format_line(row));
    }
    out
}

/// Table restricted to decided (verified / falsified) rows; used for the
/// per-model summary.
pub fn render_decided_table(rows: &[ReportRow]) -> String {
    let decided: Vec<ReportRow> = rows.iter().filter(|r| r.is_decided()).cloned().collect();
    render_table(&decided)
}
