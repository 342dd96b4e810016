//! `RunOutputObserver<W>`: bridges `TrackingObserver` to a `RunWriter`.

use log::debug;

use st_engine::{TrackingEngine, Transition};
use st_runner::TrackingObserver;

use crate::writer::RunWriter;
use crate::{OutputError, OutputResult, RunRecord};

/// A [`TrackingObserver`] that writes one [`RunRecord`] per finished run.
///
/// Errors from the writer are stored internally because observer hooks have
/// no return value.  After the controller returns, check with
/// [`take_error`](Self::take_error).
pub struct RunOutputObserver<W: RunWriter> {
    writer:     W,
    runs:       usize,
    last_error: Option<OutputError>,
}

impl<W: RunWriter> RunOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, runs: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Runs handed to the writer so far.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Unwrap the inner writer (e.g. to inspect files afterwards).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RunWriter> TrackingObserver for RunOutputObserver<W> {
    fn on_transition(&mut self, transition: &Transition, engine: &TrackingEngine) {
        if !matches!(transition, Transition::Finished { .. }) {
            return;
        }
        let Some(run) = RunRecord::from_engine(engine) else {
            return;
        };
        debug!("recording run {}|{}", run.road, run.name);
        self.runs += 1;
        let result = self.writer.write_run(&run);
        self.store_err(result);
    }

    fn on_stream_end(&mut self, _engine: &TrackingEngine) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
