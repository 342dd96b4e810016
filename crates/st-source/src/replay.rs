//! Replay of a recorded position trace.
//!
//! # Trace format
//!
//! CSV with a header, one fix per row, timestamps non-decreasing:
//!
//! ```csv
//! timestamp_ms,latitude,longitude,speed_mps
//! 1700000000000,59.8890,10.5226,22.4
//! 1700000001000,59.8891,10.5230,
//! ```
//!
//! An empty or `NaN` speed is an unavailable reading.

use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::Deserialize;

use st_core::{Coordinate, PositionUpdate, SpeedReading, Timestamp};

use crate::{
    PositionSource, SourceError, SourceResult, Subscription, UpdateSender, WatchFilter,
    WatchOptions,
};

#[derive(Deserialize)]
struct TraceRecord {
    timestamp_ms: u64,
    latitude:     f64,
    longitude:    f64,
    speed_mps:    Option<f64>,
}

/// Load a trace from a CSV file.
pub fn load_trace(path: &Path) -> SourceResult<Vec<PositionUpdate>> {
    let file = std::fs::File::open(path)?;
    let trace = read_trace(file)?;
    info!("loaded {} fixes from {}", trace.len(), path.display());
    Ok(trace)
}

/// Like [`load_trace`] but accepts any `Read` source.
///
/// # Errors
///
/// [`SourceError::Trace`] for an out-of-range coordinate or a timestamp that
/// goes backwards.
pub fn read_trace<R: Read>(reader: R) -> SourceResult<Vec<PositionUpdate>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut trace: Vec<PositionUpdate> = Vec::new();

    for (row, record) in csv_reader.deserialize::<TraceRecord>().enumerate() {
        let r = record?;
        let position = Coordinate::new(r.latitude, r.longitude);
        position
            .validate()
            .map_err(|e| SourceError::Trace(format!("row {}: {e}", row + 1)))?;
        let timestamp = Timestamp(r.timestamp_ms);
        if let Some(prev) = trace.last() {
            if timestamp < prev.timestamp {
                return Err(SourceError::Trace(format!(
                    "row {}: timestamp {timestamp} before {}",
                    row + 1,
                    prev.timestamp
                )));
            }
        }
        trace.push(PositionUpdate::new(position, SpeedReading::from_raw(r.speed_mps), timestamp));
    }
    Ok(trace)
}

/// Plays a recorded trace back through a subscription.
///
/// Delivery runs on a background thread.  Without a time scale the trace is
/// pushed as fast as the channel accepts it; with one, the gaps between fix
/// timestamps are reproduced divided by the scale (`10.0` = ten times real
/// time).
pub struct ReplaySource {
    trace:      Arc<[PositionUpdate]>,
    permission: bool,
    time_scale: Option<f64>,
}

impl ReplaySource {
    pub fn new(trace: Vec<PositionUpdate>) -> Self {
        Self {
            trace:      trace.into(),
            permission: true,
            time_scale: None,
        }
    }

    pub fn from_csv(path: &Path) -> SourceResult<Self> {
        Ok(Self::new(load_trace(path)?))
    }

    /// Pace delivery at `scale` times real time.  Non-positive or non-finite
    /// values switch pacing off; a gap too long to sleep is delivered at once.
    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = (scale.is_finite() && scale > 0.0).then_some(scale);
        self
    }

    /// Answer permission requests with `granted`.
    pub fn with_permission(mut self, granted: bool) -> Self {
        self.permission = granted;
        self
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }
}

impl PositionSource for ReplaySource {
    fn request_permission(&mut self) -> bool {
        self.permission
    }

    /// The first fix of the trace.
    fn current_position(&mut self) -> SourceResult<PositionUpdate> {
        self.trace
            .first()
            .copied()
            .ok_or_else(|| SourceError::Unavailable("trace is empty".to_string()))
    }

    fn subscribe(&mut self, options: &WatchOptions, sink: UpdateSender) -> SourceResult<Subscription> {
        let trace = Arc::clone(&self.trace);
        let released = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&released);
        let filter = WatchFilter::new(*options);
        let scale = self.time_scale;

        let handle = thread::Builder::new()
            .name("trace-replay".to_string())
            .spawn(move || replay_loop(&trace, filter, scale, &flag, &sink))?;

        Ok(Subscription::new(move || {
            released.store(true, Ordering::SeqCst);
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("trace replay thread panicked");
            }
        }))
    }
}

fn replay_loop(
    trace:    &[PositionUpdate],
    mut filter: WatchFilter,
    scale:    Option<f64>,
    released: &AtomicBool,
    sink:     &UpdateSender,
) {
    let mut sent = 0usize;
    let mut prev: Option<Timestamp> = None;

    for update in trace {
        if let (Some(scale), Some(prev)) = (scale, prev) {
            let gap_ms = update.timestamp.millis_since(prev).max(0) as f64 / scale;
            match Duration::try_from_secs_f64(gap_ms / 1000.0) {
                Ok(wait) => pause(wait, released),
                Err(_) => warn!("replay gap of {gap_ms} ms is out of range; not pausing"),
            }
        }
        prev = Some(update.timestamp);

        if released.load(Ordering::SeqCst) {
            debug!("replay released after {sent} fixes");
            return;
        }
        if !filter.accept(update) {
            continue;
        }
        if !sink.send(*update) {
            debug!("replay receiver gone after {sent} fixes");
            return;
        }
        sent += 1;
    }
    debug!("replay finished: {sent} of {} fixes delivered", trace.len());
}

/// Sleep for `wait`, returning early once `released` is set.
fn pause(wait: Duration, released: &AtomicBool) {
    let Some(deadline) = Instant::now().checked_add(wait) else {
        warn!("replay pause of {wait:?} is out of range; not pausing");
        return;
    };
    while !released.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        thread::park_timeout(deadline - now);
    }
}
