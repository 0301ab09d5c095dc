//! Unit tests for ctm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LinkId, NodeId};

    #[test]
    fn index_casts() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(LinkId(7).index(), 7);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(LinkId(100) > LinkId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(LinkId::default(), LinkId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod point {
    use crate::Point;

    #[test]
    fn zero_distance() {
        let p = Point::new(3.5, -1.0);
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_km(b) - 5.0).abs() < 1e-12);
        assert!((b.distance_km(a) - 5.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod fd {
    use crate::{DomainError, FundamentalDiagram};

    fn arterial() -> FundamentalDiagram {
        FundamentalDiagram::new(1800.0, 33.7, 6.9).unwrap()
    }

    #[test]
    fn derived_quantities() {
        let fd = arterial();
        assert!((fd.free_flow_speed() - 1800.0 / 33.7).abs() < 1e-12);
        assert!((fd.jam_density() - (1800.0 / 6.9 + 33.7)).abs() < 1e-12);
    }

    #[test]
    fn free_flow_branch_is_linear() {
        let fd = arterial();
        let v = fd.free_flow_speed();
        for d in [0.0, 5.0, 20.0, 33.0] {
            assert!((fd.flow_at_density(d).unwrap() - v * d).abs() < 1e-9);
        }
    }

    #[test]
    fn congested_branch_slope() {
        let fd = arterial();
        let flow = fd.flow_at_density(100.0).unwrap();
        assert!((flow - (1800.0 - 6.9 * (100.0 - 33.7))).abs() < 1e-9);
    }

    #[test]
    fn continuous_at_critical_density() {
        let fd = arterial();
        let below = fd.flow_at_density(33.7 - 1e-9).unwrap();
        let at = fd.flow_at_density(33.7).unwrap();
        assert!((below - at).abs() < 1e-6);
        assert!((at - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn flow_vanishes_at_jam_density() {
        let fd = arterial();
        let flow = fd.flow_at_density(fd.jam_density()).unwrap();
        assert!(flow.abs() < 1e-9, "got {flow}");
    }

    #[test]
    fn density_outside_range_is_rejected() {
        let fd = arterial();
        assert!(matches!(fd.flow_at_density(-0.1), Err(DomainError::Density { .. })));
        assert!(matches!(
            fd.flow_at_density(fd.jam_density() + 1.0),
            Err(DomainError::Density { .. })
        ));
        assert!(fd.speed_at_density(-1.0).is_err());
    }

    #[test]
    fn speed_branches() {
        let fd = arterial();
        assert_eq!(fd.speed_at_density(10.0).unwrap(), fd.free_flow_speed());
        // At and above the critical density the query reports the backward
        // wave speed, by model convention.
        assert_eq!(fd.speed_at_density(33.7).unwrap(), 6.9);
        assert_eq!(fd.speed_at_density(200.0).unwrap(), 6.9);
    }

    #[test]
    fn sending_capacity_caps_at_flow_capacity() {
        let fd = arterial();
        assert_eq!(fd.sending_capacity(0.0), 0.0);
        assert!((fd.sending_capacity(10.0) - fd.free_flow_speed() * 10.0).abs() < 1e-9);
        // Any density at or above critical sends exactly the capacity.
        assert_eq!(fd.sending_capacity(50.0), 1800.0);
        assert_eq!(fd.sending_capacity(fd.jam_density()), 1800.0);
    }

    #[test]
    fn receiving_capacity_shrinks_with_density() {
        let fd = arterial();
        assert_eq!(fd.receiving_capacity(0.0), 1800.0);
        assert!(fd.receiving_capacity(fd.jam_density()).abs() < 1e-9);
        let half = fd.receiving_capacity(fd.jam_density() / 2.0);
        assert!(half > 0.0 && half < 1800.0);
    }

    #[test]
    fn queries_are_pure() {
        let fd = arterial();
        assert_eq!(fd.flow_at_density(42.0).unwrap(), fd.flow_at_density(42.0).unwrap());
        assert_eq!(fd.speed_at_density(42.0).unwrap(), fd.speed_at_density(42.0).unwrap());
    }

    #[test]
    fn non_positive_parameters_are_rejected() {
        assert!(FundamentalDiagram::new(0.0, 33.7, 6.9).is_err());
        assert!(FundamentalDiagram::new(1800.0, -1.0, 6.9).is_err());
        assert!(FundamentalDiagram::new(1800.0, 33.7, f64::NAN).is_err());
    }

    #[test]
    fn default_is_valid() {
        let fd = FundamentalDiagram::default();
        assert_eq!(fd.flow_capacity(), 1800.0);
        assert!(fd.jam_density() > fd.critical_density());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig};

    #[test]
    fn clock_advances_without_drift() {
        let mut clock = SimClock::new(6.0, 0.25);
        assert_eq!(clock.time_hours(), 6.0);
        for _ in 0..8 {
            clock.advance();
        }
        assert_eq!(clock.current_step, 8);
        assert!((clock.time_hours() - 8.0).abs() < 1e-12);
        assert!((clock.elapsed_hours() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn hms_formatting() {
        let mut clock = SimClock::new(6.25, 0.25);
        clock.advance(); // 6.5 h = 06:30:00
        assert_eq!(clock.hms(), (6, 30, 0));
        assert_eq!(clock.to_string(), "step 1 (06:30:00)");
    }

    fn config() -> SimConfig {
        SimConfig {
            start_hours: 0.0,
            end_hours: 24.0,
            step_hours: 0.25,
            output_interval_steps: 4,
        }
    }

    #[test]
    fn total_steps_covers_window() {
        assert_eq!(config().total_steps(), 96);
        let uneven = SimConfig { end_hours: 1.1, step_hours: 0.25, ..config() };
        assert_eq!(uneven.total_steps(), 5); // rounds up to cover the window
    }

    #[test]
    fn validate_rejects_bad_windows() {
        assert!(config().validate().is_ok());
        assert!(SimConfig { step_hours: 0.0, ..config() }.validate().is_err());
        assert!(SimConfig { end_hours: -1.0, ..config() }.validate().is_err());
    }

    #[test]
    fn make_clock_starts_at_config_start() {
        let clock = config().make_clock();
        assert_eq!(clock.time_hours(), 0.0);
        assert_eq!(clock.step_hours, 0.25);
    }
}
