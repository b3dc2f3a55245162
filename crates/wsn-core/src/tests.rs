//! Unit tests for wsn-core primitives.

#[cfg(test)]
mod ids {
    use crate::DeviceId;

    #[test]
    fn index_roundtrip() {
        let id = DeviceId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(DeviceId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(DeviceId::INVALID.0, u32::MAX);
        assert_eq!(DeviceId::default(), DeviceId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(DeviceId(7).to_string(), "dev#7");
        assert_eq!(DeviceId::INVALID.to_string(), "dev#-");
        assert!(!DeviceId::INVALID.is_valid());
    }
}

#[cfg(test)]
mod geo {
    use crate::Position;

    #[test]
    fn zero_distance() {
        let p = Position::new(3.0, -4.0);
        assert_eq!(p.distance_to(p), 0.0);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn finite_check() {
        assert!(Position::new(11.0, -9.5).is_finite());
        assert!(!Position::new(f64::NAN, 0.0).is_finite());
        assert!(!Position::new(0.0, f64::INFINITY).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Timestamp};

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp(10);
        assert_eq!(t + 5, Timestamp(15));
        assert_eq!(t.offset(3), Timestamp(13));
        assert_eq!(Timestamp(15) - Timestamp(10), 5u64);
        assert_eq!(Timestamp(3).since(Timestamp(10)), 0);
    }

    #[test]
    fn adding_past_the_end_saturates() {
        let last = Timestamp(u64::MAX);
        assert_eq!(Timestamp(5) + u64::MAX, last);
        assert_eq!(Timestamp(u64::MAX - 1).offset(3), last);
        assert_eq!(last + 0, last);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_ticks_per_hour_rejected() {
        let cfg = SimConfig { ticks_per_hour: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn sub_unity_peukert_rejected() {
        let cfg = SimConfig { peukert_exponent: 0.9, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = SimConfig { peukert_exponent: f64::NAN, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod battery {
    use crate::{BatteryProfile, Lifetime};

    #[test]
    fn rated_current_gives_rated_runtime() {
        let b = BatteryProfile::TWO_E91_AA;
        let hours = b.lifetime_hours(b.rated_current_ma(), 1.15).unwrap();
        assert!((hours - 250.0).abs() < 1e-6, "got {hours}");
    }

    #[test]
    fn peukert_penalises_high_draw() {
        let b = BatteryProfile::CR2032_COIN;
        let linear = b.lifetime_hours(1.0, 1.0).unwrap();
        let peukert = b.lifetime_hours(1.0, 1.3).unwrap();
        // 1 mA is above the coin cell's rated ~0.19 mA, so p > 1 shortens life.
        assert!(peukert < linear);
        assert!((linear - 240.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_draw_has_no_projection() {
        let b = BatteryProfile::default();
        assert!(b.lifetime_hours(0.0, 1.15).is_none());
        assert!(b.lifetime_hours(-2.0, 1.15).is_none());
        assert!(b.lifetime_hours(f64::NAN, 1.15).is_none());
        assert!(b.lifetime(0.0, 1.15).is_none());
    }

    #[test]
    fn lifetime_breakdown_roundtrips() {
        let b = BatteryProfile::TWO_E91_AA;
        let life = b.lifetime(b.rated_current_ma(), 1.15).unwrap();
        let rebuilt = life.years() * 365 * 24 + life.days() * 24 + life.hours();
        assert_eq!(rebuilt, life.total_hours);

        let long = Lifetime::from_hours(2 * 8760 + 3 * 24 + 5);
        assert_eq!((long.years(), long.days(), long.hours()), (2, 3, 5));
        assert_eq!(long.to_string(), "2 years, 3 days and 5 hours");
    }

    #[test]
    fn invalid_profile_rejected() {
        assert!(BatteryProfile::new(0.0, 10.0).validate().is_err());
        assert!(BatteryProfile::new(100.0, -1.0).validate().is_err());
        assert!(BatteryProfile::CR2032_COIN.validate().is_ok());
    }
}

#[cfg(test)]
mod rng {
    use crate::{DeviceId, DeviceRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = DeviceRng::new(12345, DeviceId(0));
        let mut r2 = DeviceRng::new(12345, DeviceId(0));
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_devices_differ() {
        let mut r0 = DeviceRng::new(1, DeviceId(0));
        let mut r1 = DeviceRng::new(1, DeviceId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn forks_are_independent_and_repeatable() {
        let root = SimRng::new(9);
        let mut a = root.fork(3);
        let mut b = root.fork(3);
        let mut c = root.fork(4);
        let xa: u64 = a.gen_range(0..u64::MAX);
        assert_eq!(xa, b.gen_range(0..u64::MAX));
        assert_ne!(xa, c.gen_range(0..u64::MAX));
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0));
    }

    #[test]
    fn nan_probability_is_never_true() {
        let mut sim = SimRng::new(0);
        let mut dev = DeviceRng::new(0, DeviceId(3));
        for _ in 0..32 {
            assert!(!sim.gen_bool(f64::NAN));
            assert!(!dev.gen_bool(f64::NAN));
        }
    }
}
