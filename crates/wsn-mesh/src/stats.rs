//! Network-wide statistics derived from a [`MeshWsn`].
//!
//! Every ratio whose denominator can be zero is an `Option`: `None` means
//! "no data", never a division by zero.

use std::fmt;

use wsn_core::{DeviceId, Lifetime, Timestamp};

use crate::MeshWsn;

#[cfg(feature = "fx-hash")]
type TallyMap = rustc_hash::FxHashMap<DeviceId, u32>;
#[cfg(not(feature = "fx-hash"))]
type TallyMap = std::collections::HashMap<DeviceId, u32>;

/// Per-device power figures over the post-stabilization window.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PowerStats {
    /// The `[first, last)` window the figures cover.
    pub first:          Timestamp,
    pub last:           Timestamp,
    /// Charge consumed over the window, mAh.
    pub avg_usage_mah:  f64,
    pub max_usage_mah:  f64,
    pub min_usage_mah:  f64,
    /// Mean current of the hungriest and the most frugal device, mA.
    pub max_current_ma: f64,
    pub min_current_ma: f64,
    /// Projected death of the hungriest device (`None` if it draws nothing).
    pub first_death:    Option<Lifetime>,
    /// Projected death of the most frugal device.
    pub last_death:     Option<Lifetime>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshStats {
    pub devices:              usize,
    pub transmits:            u64,
    pub receives:             u64,
    pub corrupted:            u64,
    pub cluster_head_elections: u64,

    /// receives / transmits.
    pub rx_per_tx:            Option<f64>,
    /// corrupted / receives.
    pub corruption_rate:      Option<f64>,
    /// elections / devices.
    pub cluster_head_rate:    Option<f64>,

    /// Devices with no discovered neighbors.
    pub loners:               usize,
    /// Devices currently in the cluster-head role.
    pub cluster_heads:        Vec<DeviceId>,
    /// Connection endpoints per current head, ascending by ID.  Heads that
    /// appear in no connection are listed with zero.
    pub head_subscribers:     Vec<(DeviceId, u32)>,
    pub max_head_subscribers: Option<u32>,
    pub avg_head_subscribers: Option<f64>,
    /// Current heads that appear in no connection.
    pub useless_heads:        usize,

    pub connections:          usize,
    /// symmetric / connections.
    pub symmetric_rate:       Option<f64>,

    /// Mean radio duty cycle over all devices.
    pub avg_duty_cycle:       Option<f64>,

    /// `None` when the window after stabilization is still empty.
    pub power:                Option<PowerStats>,
}

impl MeshStats {
    pub fn collect(mesh: &MeshWsn) -> MeshStats {
        let store = &mesh.store;
        let counters = mesh.counters();
        let devices = store.count;

        // ── Clustering ────────────────────────────────────────────────────
        let mut loners = 0;
        let mut cluster_heads = Vec::new();
        for id in store.ids() {
            let Some(behavior) = store.behavior(id) else { continue };
            if behavior.neighbors().is_empty() {
                loners += 1;
            }
            if behavior.is_cluster_head() {
                cluster_heads.push(id);
            }
        }

        let is_head = |id: DeviceId| store.behavior(id).is_some_and(|b| b.is_cluster_head());
        let mut tally = TallyMap::default();
        let mut symmetric = 0usize;
        for conn in mesh.connections() {
            if conn.symmetric {
                symmetric += 1;
            }
            for end in conn.endpoints() {
                if is_head(end) {
                    *tally.entry(end).or_insert(0) += 1;
                }
            }
        }

        let head_subscribers: Vec<(DeviceId, u32)> = cluster_heads
            .iter()
            .map(|&h| (h, tally.get(&h).copied().unwrap_or(0)))
            .collect();
        let total_subs: u64 = head_subscribers.iter().map(|&(_, n)| n as u64).sum();
        let useless_heads = head_subscribers.iter().filter(|&&(_, n)| n == 0).count();

        // ── Radio ─────────────────────────────────────────────────────────
        let now = mesh.elapsed();
        let duty_total: f64 = store
            .devices
            .iter()
            .map(|d| d.radio().total_duty_cycle(now))
            .sum();

        let connections = mesh.connections().len();

        MeshStats {
            devices,
            transmits: counters.transmits,
            receives: counters.receives,
            corrupted: counters.corrupted,
            cluster_head_elections: counters.cluster_heads,
            rx_per_tx: ratio(counters.receives as f64, counters.transmits as f64),
            corruption_rate: ratio(counters.corrupted as f64, counters.receives as f64),
            cluster_head_rate: ratio(counters.cluster_heads as f64, devices as f64),
            loners,
            max_head_subscribers: head_subscribers.iter().map(|&(_, n)| n).max(),
            avg_head_subscribers: ratio(total_subs as f64, head_subscribers.len() as f64),
            useless_heads,
            cluster_heads,
            head_subscribers,
            connections,
            symmetric_rate: ratio(symmetric as f64, connections as f64),
            avg_duty_cycle: ratio(duty_total, devices as f64),
            power: power_stats(mesh),
        }
    }
}

fn ratio(num: f64, den: f64) -> Option<f64> {
    (den > 0.0).then(|| num / den)
}

/// Charge (mAh) and mean current (mA) per device over the window.
fn per_device_usage(mesh: &MeshWsn, first: Timestamp, last: Timestamp) -> Vec<(f64, f64)> {
    let tph = mesh.config.ticks_per_hour;
    let usage = |d: &wsn_device::Device| {
        (d.power_usage_avg(first, last, tph), d.average_current_ma(first, last))
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        mesh.store.devices.par_iter().map(usage).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        mesh.store.devices.iter().map(usage).collect()
    }
}

fn power_stats(mesh: &MeshWsn) -> Option<PowerStats> {
    let last = mesh.elapsed();
    let first = Timestamp(mesh.config.stabilization_ticks);
    if first >= last {
        return None;
    }

    let usage = per_device_usage(mesh, first, last);
    if usage.is_empty() {
        return None;
    }

    let total_mah: f64 = usage.iter().map(|&(mah, _)| mah).sum();
    let (max_mah, max_ma) = usage
        .iter()
        .copied()
        .fold((f64::MIN, f64::MIN), |acc, u| if u.1 > acc.1 { u } else { acc });
    let (min_mah, min_ma) = usage
        .iter()
        .copied()
        .fold((f64::MAX, f64::MAX), |acc, u| if u.1 < acc.1 { u } else { acc });

    let battery = mesh.config.battery;
    let peukert = mesh.config.peukert_exponent;

    Some(PowerStats {
        first,
        last,
        avg_usage_mah:  total_mah / usage.len() as f64,
        max_usage_mah:  max_mah,
        min_usage_mah:  min_mah,
        max_current_ma: max_ma,
        min_current_ma: min_ma,
        first_death:    battery.lifetime(max_ma, peukert),
        last_death:     battery.lifetime(min_ma, peukert),
    })
}

// ── Display ───────────────────────────────────────────────────────────────────

struct Opt<'a>(Option<f64>, &'a str);

impl fmt::Display for Opt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.4}{}", self.1),
            None => f.write_str("n/a"),
        }
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |v: Option<f64>| v.map(|x| x * 100.0);
        writeln!(f, "Devices: {}", self.devices)?;
        writeln!(f, "Transmits: {}", self.transmits)?;
        writeln!(f, "Avg. RX per TX: {}", Opt(self.rx_per_tx, ""))?;
        writeln!(f, "Corruption rate: {}", Opt(pct(self.corruption_rate), "%"))?;
        writeln!(f, "Cluster heads: {}", self.cluster_head_elections)?;
        writeln!(f, "Cluster head rate: {}", Opt(self.cluster_head_rate, ""))?;
        writeln!(f, "Loners: {}", self.loners)?;
        writeln!(f, "Symmetric connection rate: {}", Opt(pct(self.symmetric_rate), "%"))?;
        match self.max_head_subscribers {
            Some(n) => writeln!(f, "Max CH subs: {n}")?,
            None => writeln!(f, "Max CH subs: n/a")?,
        }
        writeln!(f, "Useless CHs: {}", self.useless_heads)?;
        writeln!(f, "Avg CH subs: {}", Opt(self.avg_head_subscribers, ""))?;
        writeln!(f, "Average radio duty cycle: {}", Opt(pct(self.avg_duty_cycle), "%"))?;
        match &self.power {
            None => writeln!(f, "Power usage: n/a (window still inside stabilization)"),
            Some(p) => {
                writeln!(f, "Avg power usage: {:.5}mAh", p.avg_usage_mah)?;
                writeln!(f, "Max power usage: {:.5}mAh", p.max_usage_mah)?;
                writeln!(f, "Min power usage: {:.5}mAh", p.min_usage_mah)?;
                match p.first_death {
                    Some(l) => writeln!(f, "First dead node: {l}")?,
                    None => writeln!(f, "First dead node: n/a")?,
                }
                match p.last_death {
                    Some(l) => writeln!(f, "Last dead node: {l}"),
                    None => writeln!(f, "Last dead node: n/a"),
                }
            }
        }
    }
}
