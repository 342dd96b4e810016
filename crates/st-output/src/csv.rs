//! CSV run writer.  Creates `runs.csv` in the configured directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RunWriter;
use crate::{OutputResult, RunRecord};

pub const RUNS_FILE: &str = "runs.csv";

pub struct CsvRunWriter {
    runs:     Writer<File>,
    written:  usize,
    finished: bool,
}

impl CsvRunWriter {
    /// Create `runs.csv` in `dir` (truncating any previous file) and write
    /// the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut runs = Writer::from_path(dir.join(RUNS_FILE))?;
        runs.write_record(["road", "name", "start_ms", "end_ms", "distance_m", "average_kmh"])?;
        Ok(Self { runs, written: 0, finished: false })
    }

    /// Rows written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl RunWriter for CsvRunWriter {
    fn write_run(&mut self, run: &RunRecord) -> OutputResult<()> {
        self.runs.write_record(&[
            run.road.clone(),
            run.name.clone(),
            run.start_ms.to_string(),
            run.end_ms.to_string(),
            format!("{:.1}", run.distance_m),
            run.average_kmh.map(|v| format!("{v:.2}")).unwrap_or_default(),
        ])?;
        self.written += 1;
        // A run is rare and valuable; don't leave it in the buffer.
        self.runs.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.runs.flush()?;
        Ok(())
    }
}
