//! Unit tests for wsn-device.

use wsn_core::{DeviceId, Position, Timestamp};

use crate::{DeviceStoreBuilder, PassiveBehavior, RadioConfig};

fn t(n: u64) -> Timestamp {
    Timestamp(n)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── PowerLedger ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod power_ledger {
    use super::*;
    use crate::PowerLedger;

    #[test]
    fn empty_window_and_empty_log_are_zero() {
        let ledger = PowerLedger::new();
        assert_eq!(ledger.average_ma(t(0), t(100)), 0.0);
        assert_eq!(ledger.usage_mah(t(0), t(100), 10), 0.0);
        assert!(ledger.power_usage(t(5), t(5)).is_empty());
        assert_eq!(ledger.average_ma(t(9), t(3)), 0.0);
    }

    #[test]
    fn register_then_remove_returns_to_zero() {
        let ledger = PowerLedger::new();
        ledger.register_drain(5.0, t(2));
        ledger.remove_drain(5.0, t(4));
        let samples = ledger.power_usage(t(0), t(8));
        assert_eq!(samples, vec![0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn overlapping_drains_accumulate() {
        let ledger = PowerLedger::new();
        ledger.register_drain(2.0, t(0));
        ledger.register_drain(3.0, t(1));
        ledger.remove_drain(2.0, t(3));
        assert_eq!(ledger.power_usage(t(0), t(4)), vec![2.0, 5.0, 5.0, 3.0]);
        assert_eq!(ledger.current_ma(t(10)), 3.0);
    }

    #[test]
    fn integral_matches_sample_sum() {
        let ledger = PowerLedger::new();
        ledger.register_drain(1.5, t(3));
        ledger.register_drain(4.0, t(7));
        ledger.remove_drain(1.5, t(11));
        for (first, last) in [(0, 20), (5, 9), (7, 8), (11, 30), (0, 3)] {
            let sum: f64 = ledger.power_usage(t(first), t(last)).iter().sum();
            assert!(approx(sum, ledger.charge_ma_ticks(t(first), t(last))), "[{first}, {last})");
        }
    }

    #[test]
    fn window_starting_after_warm_up() {
        let ledger = PowerLedger::new();
        ledger.register_drain(100.0, t(0));
        ledger.remove_drain(100.0, t(10));
        ledger.register_drain(2.0, t(10));
        assert!(approx(ledger.average_ma(t(10), t(20)), 2.0));
        assert!(approx(ledger.average_ma(t(0), t(20)), 51.0));
    }

    #[test]
    fn later_appends_do_not_change_past_queries() {
        let ledger = PowerLedger::new();
        ledger.register_drain(3.0, t(1));
        let before = ledger.power_usage(t(0), t(10));
        ledger.register_drain(7.0, t(10));
        assert_eq!(ledger.power_usage(t(0), t(10)), before);
    }

    #[test]
    fn one_hour_at_ten_ma_is_ten_mah() {
        const TICKS_PER_HOUR: u64 = 3_600_000;
        let ledger = PowerLedger::new();
        ledger.register_drain(10.0, t(0));
        assert!(approx(ledger.usage_mah(t(0), t(TICKS_PER_HOUR), TICKS_PER_HOUR), 10.0));
        assert!(approx(ledger.average_ma(t(0), t(TICKS_PER_HOUR)), 10.0));
    }

    #[test]
    fn events_keep_insertion_order() {
        let ledger = PowerLedger::new();
        ledger.register_drain(1.0, t(0));
        ledger.register_drain(2.0, t(0));
        ledger.remove_drain(1.0, t(5));
        let deltas: Vec<f64> = ledger.events().iter().map(|e| e.delta_ma).collect();
        assert_eq!(deltas, vec![1.0, 2.0, -1.0]);
        assert_eq!(ledger.len(), 3);
    }
}

// ── Append-only property ──────────────────────────────────────────────────────

#[cfg(test)]
mod power_ledger_props {
    use proptest::prelude::*;

    use super::*;
    use crate::PowerLedger;

    proptest! {
        /// Appending after the window never changes what the window reports.
        #[test]
        fn past_windows_are_stable(
            drains in prop::collection::vec((0.1f64..50.0, 0u64..5), 0..20),
            extra in 0.1f64..50.0,
        ) {
            let ledger = PowerLedger::new();
            let mut now = 0;
            for (ma, gap) in &drains {
                now += gap;
                ledger.register_drain(*ma, t(now));
            }
            let last = now + 1;
            let before = ledger.power_usage(t(0), t(last));
            let charge = ledger.charge_ma_ticks(t(0), t(last));

            ledger.register_drain(extra, t(last + 1));

            prop_assert_eq!(ledger.power_usage(t(0), t(last)), before);
            prop_assert_eq!(ledger.charge_ma_ticks(t(0), t(last)), charge);
        }
    }
}

// ── Radio ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod radio {
    use super::*;
    use crate::{PowerLedger, Radio, RadioPacket, RadioState};

    fn cfg() -> RadioConfig {
        RadioConfig { tx_current_ma: 5.0, rx_current_ma: 4.0 }
    }

    #[test]
    fn silent_radio_has_zero_duty_cycle() {
        let radio = Radio::new(cfg(), t(0));
        assert_eq!(radio.total_duty_cycle(t(0)), 0.0);
        assert_eq!(radio.total_duty_cycle(t(500)), 0.0);
    }

    #[test]
    fn duty_cycle_counts_listen_and_transmit() {
        let ledger = PowerLedger::new();
        let mut radio = Radio::new(cfg(), t(0));
        radio.listen(&ledger, t(0));
        radio
            .transmit(DeviceId(0), RadioPacket::broadcast(vec![1], 5), &ledger, t(10))
            .unwrap();
        assert_eq!(radio.state(), RadioState::Transmitting);
        assert!(radio.finish_transmission(&ledger, t(14)).is_none());
        let tx = radio.finish_transmission(&ledger, t(15)).unwrap();
        assert_eq!((tx.started, tx.ends), (t(10), t(15)));
        assert_eq!(radio.state(), RadioState::Listening);
        radio.turn_off(&ledger, t(20));

        assert_eq!(radio.active_ticks(t(40)), 20);
        assert!(approx(radio.total_duty_cycle(t(40)), 0.5));
        assert_eq!(radio.transmitted(), 1);
        // 10 ticks rx, 5 ticks tx, 5 ticks rx.
        assert!(approx(ledger.charge_ma_ticks(t(0), t(40)), 40.0 + 25.0 + 20.0));
        assert!(approx(ledger.current_ma(t(30)), 0.0));
    }

    #[test]
    fn transmit_while_busy_is_rejected() {
        let ledger = PowerLedger::new();
        let mut radio = Radio::new(cfg(), t(0));
        radio
            .transmit(DeviceId(3), RadioPacket::broadcast(vec![], 4), &ledger, t(0))
            .unwrap();
        let err = radio
            .transmit(DeviceId(3), RadioPacket::broadcast(vec![], 4), &ledger, t(1))
            .unwrap_err();
        assert!(matches!(err, crate::DeviceError::RadioBusy { until, .. } if until == t(4)));
    }

    #[test]
    fn off_radio_returns_to_off_after_sending() {
        let ledger = PowerLedger::new();
        let mut radio = Radio::new(cfg(), t(0));
        radio
            .transmit(DeviceId(0), RadioPacket::broadcast(vec![], 0), &ledger, t(3))
            .unwrap();
        // Zero airtime is rounded up to one tick.
        assert!(radio.finish_transmission(&ledger, t(4)).is_some());
        assert_eq!(radio.state(), RadioState::Off);
        assert!(approx(ledger.current_ma(t(4)), 0.0));
    }

    #[test]
    fn listen_requested_mid_transmission_applies_afterwards() {
        let ledger = PowerLedger::new();
        let mut radio = Radio::new(cfg(), t(0));
        radio
            .transmit(DeviceId(0), RadioPacket::broadcast(vec![], 2), &ledger, t(0))
            .unwrap();
        radio.listen(&ledger, t(1));
        assert_eq!(radio.state(), RadioState::Transmitting);
        radio.finish_transmission(&ledger, t(2));
        assert!(radio.is_listening());
    }

    #[test]
    fn receive_counters() {
        let mut radio = Radio::new(cfg(), t(0));
        radio.record_receive(false);
        radio.record_receive(true);
        assert_eq!((radio.received(), radio.corrupted()), (2, 1));
    }
}

// ── Packet ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod packet {
    use super::*;
    use crate::RadioPacket;

    #[test]
    fn addressing() {
        let b = RadioPacket::broadcast(vec![], 1);
        assert!(b.is_broadcast());
        assert!(b.is_for(DeviceId(9)));

        let u = RadioPacket::unicast(DeviceId(2), vec![], 1);
        assert!(u.is_for(DeviceId(2)));
        assert!(!u.is_for(DeviceId(3)));
    }
}

// ── Timer ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timer {
    use super::*;
    use crate::Timer;

    #[test]
    fn drains_due_alarms_in_order() {
        let mut timer = Timer::new();
        timer.schedule(t(10), 1);
        timer.schedule(t(5), 2);
        timer.schedule(t(5), 3);
        timer.schedule(t(20), 4);
        assert!(timer.drain_due(t(4)).is_empty());
        assert_eq!(timer.drain_due(t(10)), vec![2, 3, 1]);
        assert_eq!(timer.len(), 1);
    }

    #[test]
    fn cancel_removes_every_matching_tag() {
        let mut timer = Timer::new();
        timer.schedule(t(1), 7);
        timer.schedule(t(2), 7);
        timer.schedule(t(2), 8);
        assert_eq!(timer.cancel(7), 2);
        assert_eq!(timer.len(), 1);
        assert_eq!(timer.drain_due(t(5)), vec![8]);
        assert!(timer.is_empty());
    }
}

// ── Device + store ────────────────────────────────────────────────────────────

#[cfg(test)]
mod device_store {
    use super::*;
    use crate::{DeviceError, Intent};

    #[test]
    fn zero_devices_is_a_configuration_error() {
        let result = DeviceStoreBuilder::new(1).build();
        assert!(matches!(result, Err(DeviceError::NoDevices)));
    }

    #[test]
    fn ids_follow_push_order() {
        let store = DeviceStoreBuilder::new(1)
            .push(Position::new(0.0, 0.0), PassiveBehavior)
            .populate(&[Position::new(3.0, 4.0), Position::new(6.0, 8.0)], |_| PassiveBehavior)
            .build()
            .unwrap();
        assert_eq!(store.count, 3);
        let ids: Vec<DeviceId> = store.ids().collect();
        assert_eq!(ids, vec![DeviceId(0), DeviceId(1), DeviceId(2)]);
        let d0 = store.device(DeviceId(0)).unwrap();
        let d2 = store.device(DeviceId(2)).unwrap();
        assert_eq!(d2.id(), DeviceId(2));
        assert!(approx(d0.distance_to(d2), 10.0));
        assert!(store.device(DeviceId(3)).is_none());
    }

    #[test]
    fn passive_behavior_defaults() {
        let mut store = DeviceStoreBuilder::new(1)
            .push(Position::default(), PassiveBehavior)
            .build()
            .unwrap();
        let b = store.behavior(DeviceId(0)).unwrap();
        assert!(!b.is_cluster_head());
        assert!(b.neighbors().is_empty());
        assert!(b.subscription().is_none());
        let intents = store.invoke(DeviceId(0), t(0), |b, ctx, rng| b.step(ctx, rng));
        assert!(intents.is_empty());
        assert!(store.invoke(DeviceId(5), t(0), |b, ctx, rng| b.step(ctx, rng)).is_empty());
    }

    #[test]
    fn invoke_passes_context() {
        struct Echo;
        impl crate::DeviceBehavior for Echo {
            fn step(&mut self, ctx: &crate::DeviceContext<'_>, _rng: &mut wsn_core::DeviceRng) -> Vec<Intent> {
                vec![Intent::SetTimer { after: ctx.now.0, tag: ctx.id().0 }]
            }
        }
        let mut store = DeviceStoreBuilder::new(1)
            .push(Position::default(), PassiveBehavior)
            .push(Position::default(), Echo)
            .build()
            .unwrap();
        let intents = store.invoke(DeviceId(1), t(9), |b, ctx, rng| b.step(ctx, rng));
        assert_eq!(intents, vec![Intent::SetTimer { after: 9, tag: 1 }]);
    }

    #[test]
    fn device_power_delegates_to_ledger() {
        let store = DeviceStoreBuilder::new(1)
            .radio(RadioConfig::default())
            .push(Position::default(), PassiveBehavior)
            .build()
            .unwrap();
        let dev = store.device(DeviceId(0)).unwrap();
        dev.register_power_drain(10.0, t(0));
        dev.remove_power_drain(10.0, t(50));
        assert!(approx(dev.power_usage_avg(t(0), t(100), 100), 5.0));
        assert!(approx(dev.average_current_ma(t(0), t(100)), 5.0));
        assert_eq!(dev.power_usage(t(49), t(51)), vec![10.0, 0.0]);
    }
}

// ── Layout loader ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{DeviceError, load_layout_reader};

    #[test]
    fn loads_rows_in_any_order() {
        let csv = "device_id,x,y\n1,2.5,3.0\n0,0.0,1.0\n";
        let layout = load_layout_reader(Cursor::new(csv)).unwrap();
        assert_eq!(layout, vec![Position::new(0.0, 1.0), Position::new(2.5, 3.0)]);
    }

    #[test]
    fn gap_in_ids_is_an_error() {
        let csv = "device_id,x,y\n0,0.0,0.0\n2,1.0,1.0\n";
        assert!(load_layout_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn duplicate_id_is_an_error() {
        let csv = "device_id,x,y\n0,0.0,0.0\n0,1.0,1.0\n";
        assert!(load_layout_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn huge_id_is_rejected_without_allocating() {
        let csv = "device_id,x,y\n4294967295,0.0,0.0\n";
        match load_layout_reader(Cursor::new(csv)) {
            Err(DeviceError::Parse(msg)) => assert!(msg.contains("device 0 missing")),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_row_is_an_error() {
        let csv = "device_id,x,y\n0,zero,0.0\n";
        assert!(load_layout_reader(Cursor::new(csv)).is_err());
    }
}
