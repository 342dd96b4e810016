//! The `RunWriter` trait implemented by all run writers.

use crate::{OutputResult, RunRecord};

/// Errors are stored by the observer and retrieved with
/// [`RunOutputObserver::take_error`](crate::RunOutputObserver::take_error).
pub trait RunWriter {
    fn write_run(&mut self, run: &RunRecord) -> OutputResult<()>;

    /// Flush and close the underlying handles.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
