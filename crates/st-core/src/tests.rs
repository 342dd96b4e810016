//! Unit tests for st-core primitives.

#[cfg(test)]
mod geo {
    use crate::{bearing_deg, distance_m, is_near, Coordinate, CoreError};

    #[test]
    fn zero_distance() {
        let p = Coordinate::new(59.9139, 10.7522);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = Coordinate::new(59.9139, 10.7522);
        let b = Coordinate::new(60.3913, 5.3221);
        assert_eq!(distance_m(a, b), distance_m(b, a));
        assert!(distance_m(a, b) > 0.0);
    }

    #[test]
    fn one_degree_longitude_at_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let d = distance_m(a, b);
        assert!((d - 111_195.0).abs() < 1_112.0, "got {d}");
    }

    #[test]
    fn one_degree_latitude() {
        let a = Coordinate::new(30.0, -88.0);
        let b = Coordinate::new(31.0, -88.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn near_requires_candidate() {
        let p = Coordinate::new(10.0, 10.0);
        assert!(!is_near(p, None, 1_000_000.0));
    }

    #[test]
    fn near_self_for_any_radius() {
        let p = Coordinate::new(-33.8688, 151.2093);
        assert!(is_near(p, Some(p), 0.0));
        assert!(is_near(p, Some(p), 30.0));
    }

    #[test]
    fn near_respects_radius() {
        let p = Coordinate::new(0.0, 0.0);
        // ~22 m east
        let q = Coordinate::new(0.0, 0.0002);
        assert!(is_near(p, Some(q), 30.0));
        assert!(!is_near(p, Some(q), 20.0));
    }

    #[test]
    fn bearing_cardinal_directions() {
        let o = Coordinate::new(0.0, 0.0);
        assert!((bearing_deg(o, Coordinate::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(o, Coordinate::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(o, Coordinate::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((bearing_deg(o, Coordinate::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn validation() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinate::new(91.0, 0.0).validate().is_err());
    }

    #[test]
    fn validate_reports_the_offending_coordinate() {
        let err = Coordinate::new(91.0, 0.0).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidCoordinate(c) if c.lat == 91.0));
        assert!(err.to_string().contains("latitude must be in [-90, 90]"), "{err}");
        assert_eq!(Coordinate::new(45.0, 45.0).validate().unwrap(), Coordinate::new(45.0, 45.0));
    }

    #[test]
    fn display() {
        assert_eq!(Coordinate::new(1.5, -2.25).to_string(), "(1.500000, -2.250000)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, ManualClock, Timestamp};

    #[test]
    fn elapsed_is_signed() {
        let a = Timestamp(1_000);
        let b = Timestamp(4_000);
        assert_eq!(b.millis_since(a), 3_000);
        assert_eq!(a.millis_since(b), -3_000);
    }

    #[test]
    fn hours_since() {
        let start = Timestamp(0);
        let end = start.offset_ms(1_800_000);
        assert!((end.hours_since(start) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(Timestamp(10));
        assert_eq!(clock.now(), Timestamp(10));
        clock.advance_ms(5);
        assert_eq!(clock.now(), Timestamp(15));
        clock.set(Timestamp(100));
        assert_eq!(clock.now(), Timestamp(100));
    }
}

#[cfg(test)]
mod speed {
    use crate::SpeedReading;

    #[test]
    fn missing_and_nan_are_unavailable() {
        assert_eq!(SpeedReading::from_raw(None), SpeedReading::Unavailable);
        assert_eq!(SpeedReading::from_raw(Some(f64::NAN)), SpeedReading::Unavailable);
        assert_eq!(SpeedReading::from_raw(Some(f64::INFINITY)), SpeedReading::Unavailable);
        assert_eq!(SpeedReading::Unavailable.kmh(), None);
    }

    #[test]
    fn converts_to_kmh() {
        let kmh = SpeedReading::from_raw(Some(10.0)).kmh().unwrap();
        assert!((kmh - 36.0).abs() < 1e-9);
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(SpeedReading::Measured(-1.0).kmh(), Some(0.0));
    }
}
