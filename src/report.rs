use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;

/// One line of the championship table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Team")]
    pub team: String,

    #[serde(rename = "Championships")]
    pub championships: u64,

    #[serde(rename = "Win %")]
    pub win_pct: f64,
}

impl ReportRow {
    pub fn new(team: impl Into<String>, championships: u64, win_pct: f64) -> Self {
        ReportRow {
            team: team.into(),
            championships,
            win_pct,
        }
    }
}

/// Destination for the finished championship table.
pub trait ReportSink {
    fn write_report(&mut self, rows: &[ReportRow]) -> Result<()>;
}

/// Writes the table as CSV with a header row.
#[derive(Clone, Debug)]
pub struct CsvReportSink {
    path: PathBuf,
}

impl CsvReportSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvReportSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvReportSink {
    fn write_report(&mut self, rows: &[ReportRow]) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut wtr = csv::Writer::from_writer(file);

        // serde only emits headers with the first record
        if rows.is_empty() {
            wtr.write_record(["Team", "Championships", "Win %"])?;
        }
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        info!("Saved to {}", self.path.display());
        Ok(())
    }
}
