//! replay: run a recorded drive through the segment tracker.
//!
//! ```text
//! replay [DATA_DIR] [OUTPUT_DIR]
//! ```
//!
//! `DATA_DIR` (default: this demo's `data/`) holds `catalog.json`,
//! `trace.csv` and optionally `tracker.json`, `limits.json`, `paths.json`
//! and `checkpoints.json`.  Finished runs go to `OUTPUT_DIR/runs.csv`
//! (default `output/replay`).
//!
//! After the trace, the same catalog is driven once more by a simulated
//! source along the first segment.  Set `RUST_LOG=debug` to see every fix.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use st_catalog::{load_catalog_json, load_checkpoints_json, LimitsTable, PathCache};
use st_core::{SystemClock, Timestamp};
use st_engine::SessionSnapshot;
use st_output::{CsvRunWriter, RunOutputObserver};
use st_runner::{Both, LogObserver, StartOutcome, TrackerConfig, TrackingController};
use st_source::{ReplaySource, SimulatedDrive};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data"));
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output/replay"));

    println!("=== replay — segment speed tracker ===");
    println!("data: {}  |  output: {}", data_dir.display(), out_dir.display());
    println!();

    // 1. Static inputs.
    let config = TrackerConfig::load(&data_dir.join("tracker.json"))?;
    let mut catalog = load_catalog_json(&data_dir.join("catalog.json"))
        .with_context(|| format!("loading catalog from {}", data_dir.display()))?;
    let paths = PathCache::load(&data_dir.join("paths.json"))?;
    let merged = paths.merge_into(&mut catalog);
    let missing = paths.missing(&catalog);
    let limits = LimitsTable::load(&data_dir.join("limits.json"))?;
    let checkpoints_path = data_dir.join("checkpoints.json");
    let checkpoints = if checkpoints_path.exists() {
        Some(load_checkpoints_json(&checkpoints_path)?)
    } else {
        None
    };

    println!("Catalog: {} segments ({merged} with display paths)", catalog.len());
    for key in &missing {
        println!("  no cached path for {key}");
    }
    println!("Limits: {} entries  |  checkpoints: {}", limits.len(), if checkpoints.is_some() { "yes" } else { "no" });
    println!();

    let first_segment = catalog
        .segments()
        .first()
        .map(|s| s.display_path())
        .context("catalog is empty")?;
    let catalog_again = load_catalog_json(&data_dir.join("catalog.json"))?;

    // 2. Output.
    std::fs::create_dir_all(&out_dir)?;
    let writer = CsvRunWriter::new(&out_dir)?;
    let mut obs = Both(LogObserver::new(limits), RunOutputObserver::new(writer));

    // 3. Replay the recorded trace.
    let source = ReplaySource::from_csv(&data_dir.join("trace.csv"))?;
    let fixes = source.len();
    let mut ctl = TrackingController::from_config(catalog, checkpoints, source, SystemClock, &config);

    let t0 = Instant::now();
    let processed = match ctl.start(&mut obs)? {
        StartOutcome::Streaming => ctl.run(&mut obs),
        StartOutcome::PermissionDenied => 0,
    };
    println!("Replayed {processed} of {fixes} fixes in {:.3} s", t0.elapsed().as_secs_f64());
    print_snapshot(&ctl.snapshot());
    if let Some(line) = ctl.status_line() {
        println!("  {line}");
    }
    ctl.shutdown();
    println!();

    // 4. Drive the first segment again with a simulated source.
    let drive = SimulatedDrive::new(first_segment)
        .with_speed_mps(15.0)
        .with_jitter(3.0, 42)
        .starting_at(Timestamp(1_700_000_600_000));
    let mut sim = TrackingController::from_config(catalog_again, None, drive, SystemClock, &config)
        .with_stop_on_finish(true);
    if sim.start(&mut obs)? == StartOutcome::Streaming {
        let n = sim.run(&mut obs);
        println!("Simulated drive: {n} fixes");
        print_snapshot(&sim.snapshot());
    }

    let Both(log_obs, mut out_obs) = obs;
    if let Some(e) = out_obs.take_error() {
        eprintln!("output error: {e}");
    }
    println!();
    println!("Limit excursions: {}", log_obs.excursions());
    println!("Runs recorded   : {} ({})", out_obs.runs(), out_dir.join("runs.csv").display());
    info!("done");
    Ok(())
}

fn print_snapshot(snap: &SessionSnapshot) {
    let segment = snap
        .active_segment
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    println!("  phase    : {}", snap.phase);
    println!("  segment  : {segment}");
    println!("  speed    : {:.1} km/h", snap.current_speed_kmh);
    match snap.average_kmh {
        Some(avg) => println!("  average  : {avg:.2} km/h"),
        None => println!("  average  : -"),
    }
}
