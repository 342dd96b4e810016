//! A synthetic drive for demos and tests.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use st_core::{Coordinate, PositionUpdate, SpeedReading, Timestamp, EARTH_RADIUS_M};

use crate::{
    PositionSource, SourceError, SourceResult, Subscription, UpdateSender, WatchFilter,
    WatchOptions,
};

/// Metres per degree of latitude on the haversine sphere.
const M_PER_DEG_LAT: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Drives along a polyline of waypoints at constant speed.
///
/// A fix is sampled every `interval_ms` (plus one exactly at the last
/// waypoint) and optionally perturbed by uniform jitter of up to `jitter_m`
/// metres per axis.  Jitter is drawn from a `SmallRng` seeded with `seed`, so
/// the same configuration always yields the same fixes.
///
/// Updates are delivered synchronously inside `subscribe`; the sink is
/// dropped when it returns, which ends the stream.
#[derive(Clone, Debug)]
pub struct SimulatedDrive {
    waypoints:        Vec<Coordinate>,
    speed_mps:        f64,
    interval_ms:      u64,
    start:            Timestamp,
    jitter_m:         f64,
    seed:             u64,
    grant_permission: bool,
    initial_fix:      bool,
}

impl SimulatedDrive {
    /// Defaults: 20 m/s, one fix per second, starting at t = 0, no jitter.
    pub fn new(waypoints: Vec<Coordinate>) -> Self {
        Self {
            waypoints,
            speed_mps:        20.0,
            interval_ms:      1_000,
            start:            Timestamp::ZERO,
            jitter_m:         0.0,
            seed:             0,
            grant_permission: true,
            initial_fix:      true,
        }
    }

    pub fn with_speed_mps(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms.max(1);
        self
    }

    pub fn starting_at(mut self, start: Timestamp) -> Self {
        self.start = start;
        self
    }

    pub fn with_jitter(mut self, jitter_m: f64, seed: u64) -> Self {
        self.jitter_m = jitter_m.max(0.0);
        self.seed = seed;
        self
    }

    /// Refuse every permission request.
    pub fn deny_permission(mut self) -> Self {
        self.grant_permission = false;
        self
    }

    /// Make [`PositionSource::current_position`] fail.
    pub fn without_initial_fix(mut self) -> Self {
        self.initial_fix = false;
        self
    }

    /// Total route length in metres.
    pub fn route_length_m(&self) -> f64 {
        self.waypoints.windows(2).map(|w| w[0].distance_m(w[1])).sum()
    }

    /// Every fix of the drive, before watch filtering.
    pub fn fixes(&self) -> Vec<PositionUpdate> {
        let Some(&first) = self.waypoints.first() else {
            return Vec::new();
        };
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total_m = self.route_length_m();
        if total_m <= 0.0 || self.speed_mps <= 0.0 {
            return vec![self.sample(first, self.start, &mut rng)];
        }

        let step_m = self.speed_mps * self.interval_ms as f64 / 1000.0;
        let mut fixes = Vec::new();
        let mut k: u64 = 0;
        loop {
            let travelled = k as f64 * step_m;
            if travelled >= total_m {
                break;
            }
            let at = self.start.offset_ms(k * self.interval_ms);
            fixes.push(self.sample(self.point_at(travelled), at, &mut rng));
            k += 1;
        }

        let end_ms = (total_m / self.speed_mps * 1000.0).round() as u64;
        let last = self.waypoints[self.waypoints.len() - 1];
        fixes.push(self.sample(last, self.start.offset_ms(end_ms), &mut rng));
        fixes
    }

    /// Position `travelled` metres along the route.
    fn point_at(&self, travelled: f64) -> Coordinate {
        let mut remaining = travelled;
        for w in self.waypoints.windows(2) {
            let leg = w[0].distance_m(w[1]);
            if remaining <= leg && leg > 0.0 {
                let f = remaining / leg;
                return Coordinate::new(
                    w[0].lat + (w[1].lat - w[0].lat) * f,
                    w[0].lon + (w[1].lon - w[0].lon) * f,
                );
            }
            remaining -= leg;
        }
        self.waypoints[self.waypoints.len() - 1]
    }

    fn sample(&self, p: Coordinate, at: Timestamp, rng: &mut SmallRng) -> PositionUpdate {
        let position = if self.jitter_m > 0.0 {
            let dn = rng.gen_range(-self.jitter_m..=self.jitter_m);
            let de = rng.gen_range(-self.jitter_m..=self.jitter_m);
            let m_per_deg_lon = M_PER_DEG_LAT * p.lat.to_radians().cos().max(1e-6);
            Coordinate::new(
                (p.lat + dn / M_PER_DEG_LAT).clamp(-90.0, 90.0),
                p.lon + de / m_per_deg_lon,
            )
        } else {
            p
        };
        PositionUpdate::new(position, SpeedReading::Measured(self.speed_mps), at)
    }
}

impl PositionSource for SimulatedDrive {
    fn request_permission(&mut self) -> bool {
        self.grant_permission
    }

    fn current_position(&mut self) -> SourceResult<PositionUpdate> {
        if !self.initial_fix {
            return Err(SourceError::Unavailable("simulated fix failure".to_string()));
        }
        let first = self
            .waypoints
            .first()
            .copied()
            .ok_or_else(|| SourceError::Unavailable("no waypoints".to_string()))?;
        Ok(PositionUpdate::new(first, SpeedReading::Measured(0.0), self.start))
    }

    fn subscribe(&mut self, options: &WatchOptions, sink: UpdateSender) -> SourceResult<Subscription> {
        let mut filter = WatchFilter::new(*options);
        let fixes = self.fixes();
        let mut sent = 0usize;
        for fix in fixes.iter().filter(|f| filter.accept(f)) {
            if !sink.send(*fix) {
                break;
            }
            sent += 1;
        }
        debug!("simulated drive delivered {sent} of {} fixes", fixes.len());
        Ok(Subscription::finished())
    }
}
