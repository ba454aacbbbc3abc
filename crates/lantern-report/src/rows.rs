use lantern_search::{Provenance, SearchReport, Status, VerdictRecord};

/// One line of the final report: a resolved assignment for one lemma of one
/// model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub model: String,
    pub lemma: String,
    pub status: Status,
    pub provenance: Provenance,
    pub steps: Option<u64>,
    pub flags: Vec<String>,
}

impl ReportRow {
    pub fn from_record(model: &str, record: &VerdictRecord) -> Self {
        Self {
            model: model.to_string(),
            lemma: record.label.clone(),
            status: record.status,
            provenance: record.provenance,
            steps: record.steps,
            flags: record.flags.clone(),
        }
    }

    /// Status cell; propagated verdicts are marked so they are not mistaken
    /// for fresh measurements.
    pub fn status_cell(&self) -> String {
        match self.provenance {
            Provenance::Queried => self.status.to_string(),
            Provenance::Implied => format!("implied:{}", self.status),
        }
    }

    /// Step-count cell, empty when no fresh measurement exists.
    pub fn steps_cell(&self) -> String {
        self.steps.map(|s| s.to_string()).unwrap_or_default()
    }

    pub fn flags_cell(&self) -> String {
        self.flags.join(" ")
    }

    pub fn is_decided(&self) -> bool {
        self.status.is_decided()
    }
}

/// Flatten one model's per-lemma reports into rows, keeping each report's
/// generation order.
pub fn rows_for_model(model: &str, reports: &[SearchReport]) -> Vec<ReportRow> {
    reports
        .iter()
        .flat_map(|report| report.rows.iter())
        .map(|record| ReportRow::from_record(model, record))
        .collect()
}
