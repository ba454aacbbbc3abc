//! CSV persistence of report rows.

use std::fs;
use std::path::{Path, PathBuf};

use crate::rows::ReportRow;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

const HEADER: [&str; 5] = ["model", "lemma", "status", "steps", "flags"];

/// Quote a field when it contains a delimiter, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn line(cells: &[String]) -> String {
    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(cell));
    }
    out.push('\n');
    out
}

/// Render rows as a CSV document with a header line.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = line(&HEADER.map(String::from));
    for row in rows {
        out.push_str(&line(&[
            row.model.clone(),
            row.lemma.clone(),
            row.status_cell(),
            row.steps_cell(),
            row.flags_cell(),
        ]));
    }
    out
}

/// Write one model's rows under `results_dir`, creating it on demand.
/// Returns the written path.
pub fn write_model_csv(
    results_dir: &Path,
    model: &str,
    rows: &[ReportRow],
) -> Result<PathBuf, ReportError> {
    let io_err = |path: &Path| {
        let path = path.display().to_string();
        move |source| ReportError::Io { path, source }
    };

    fs::create_dir_all(results_dir).map_err(io_err(results_dir))?;
    let stem = Path::new(model)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model");
    let path = results_dir.join(format!("recent_results_{stem}.csv"));
    fs::write(&path, render_csv(rows)).map_err(io_err(&path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_search::{Provenance, Status};

    fn row(flags: &[&str]) -> ReportRow {
        ReportRow {
            model: "proto.spthy".into(),
            lemma: "secrecy".into(),
            status: Status::Verified,
            provenance: Provenance::Queried,
            steps: Some(3),
            flags: flags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_includes_header_and_rows() {
        let csv = render_csv(&[row(&["a1"])]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("model,lemma,status,steps,flags"));
        assert_eq!(lines.next(), Some("proto.spthy,secrecy,verified,3,a1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let mut r = row(&[]);
        r.lemma = "has,comma".into();
        r.flags = vec!["a\"quote".into()];
        let csv = render_csv(&[r]);
        assert!(csv.contains("\"has,comma\""));
        assert!(csv.contains("\"a\"\"quote\""));
    }

    #[test]
    fn test_write_creates_results_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results");
        let path = write_model_csv(&results, "models/proto.spthy", &[row(&["a1"])]).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "recent_results_proto.csv"
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("model,lemma,status,steps,flags"));
    }
}
