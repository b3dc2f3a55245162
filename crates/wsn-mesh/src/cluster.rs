//! `ClusterMeshDev`: a neighbor-count clustering protocol.
//!
//! # Phases
//!
//! ```text
//! Search   ─ broadcast Beacon{neighbors} every beacon_interval (jittered),
//!            record every beacon heard.
//! Elect    ─ at search_ticks:
//!              no neighbors                  → Loner, radio off
//!              own count beats every neighbor
//!              (ties: lower id wins)         → Head
//!              otherwise                     → Waiting
//! Waiting  ─ first Announce opens a subscribe window; the strongest head
//!            heard before it closes is chosen → Member.
//!            No Announce before the deadline → self-elect Head.
//! Head     ─ listens, re-announces every announce_interval.
//! Member   ─ sends Subscribe, powers the radio down, wakes only to send a
//!            Report every report_interval.
//! ```
//!
//! Corrupted or undecodable packets are ignored.

use std::collections::BTreeMap;

use wsn_core::{DeviceId, DeviceRng};
use wsn_device::{DeviceBehavior, DeviceContext, Intent, RadioPacket};

use crate::MeshMessage;

// Timer tags.
const BEACON: u32 = 1;
const ELECT: u32 = 2;
const ANNOUNCE: u32 = 3;
const SUBSCRIBE: u32 = 4;
const DEADLINE: u32 = 5;
const REPORT: u32 = 6;

/// Protocol timing and the device's baseline draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClusterConfig {
    pub beacon_interval_ticks:   u64,
    /// Length of the discovery phase; the election runs when it ends.
    pub search_ticks:            u64,
    pub airtime_ticks:           u64,
    pub announce_interval_ticks: u64,
    /// How long a waiting device collects announcements before subscribing.
    pub subscribe_window_ticks:  u64,
    /// How long after the election a device without a head self-elects.
    pub head_deadline_ticks:     u64,
    pub report_interval_ticks:   u64,
    /// MCU and sensor draw, registered once at start, mA.
    pub idle_current_ma:         f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            beacon_interval_ticks:   200,
            search_ticks:            2_000,
            airtime_ticks:           2,
            announce_interval_ticks: 5_000,
            subscribe_window_ticks:  200,
            head_deadline_ticks:     1_000,
            report_interval_ticks:   10_000,
            idle_current_ma:         0.01,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ClusterRole {
    #[default]
    Search,
    Waiting,
    Member,
    Head,
    Loner,
}

pub struct ClusterMeshDev {
    config:       ClusterConfig,
    role:         ClusterRole,
    started:      bool,
    /// Sorted, unique.
    neighbors:    Vec<DeviceId>,
    /// Last neighbor count each neighbor advertised.
    advertised:   BTreeMap<DeviceId, u16>,
    /// Strongest head heard while waiting.
    candidate:    Option<(DeviceId, u8)>,
    subscription: Option<DeviceId>,
    report_seq:   u32,
    reports_seen: u64,
}

impl ClusterMeshDev {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            role:         ClusterRole::Search,
            started:      false,
            neighbors:    Vec::new(),
            advertised:   BTreeMap::new(),
            candidate:    None,
            subscription: None,
            report_seq:   0,
            reports_seen: 0,
        }
    }

    pub fn role(&self) -> ClusterRole {
        self.role
    }

    /// Reports received while acting as head.
    pub fn reports_seen(&self) -> u64 {
        self.reports_seen
    }

    fn add_neighbor(&mut self, id: DeviceId) {
        if let Err(i) = self.neighbors.binary_search(&id) {
            self.neighbors.insert(i, id);
        }
    }

    fn broadcast(&self, msg: MeshMessage) -> Intent {
        Intent::Transmit(RadioPacket::broadcast(msg.encode(), self.config.airtime_ticks))
    }

    fn unicast(&self, to: DeviceId, msg: MeshMessage) -> Intent {
        Intent::Transmit(RadioPacket::unicast(to, msg.encode(), self.config.airtime_ticks))
    }

    /// `true` if this device's neighbor count beats every neighbor's
    /// advertised count.  Equal counts go to the lower ID.
    fn wins_election(&self, me: DeviceId) -> bool {
        let own = self.neighbors.len();
        self.neighbors.iter().all(|n| {
            let theirs = self.advertised.get(n).copied().unwrap_or(0) as usize;
            own > theirs || (own == theirs && me < *n)
        })
    }

    fn become_head(&mut self, rng: &mut DeviceRng) -> Vec<Intent> {
        self.role = ClusterRole::Head;
        self.candidate = None;
        let jitter = rng.gen_range(1..=self.config.beacon_interval_ticks.max(1));
        vec![
            Intent::BecomeClusterHead,
            Intent::CancelTimer(DEADLINE),
            Intent::CancelTimer(SUBSCRIBE),
            Intent::Listen,
            Intent::SetTimer { after: jitter, tag: ANNOUNCE },
        ]
    }

    fn elect(&mut self, ctx: &DeviceContext<'_>, rng: &mut DeviceRng) -> Vec<Intent> {
        let mut intents = vec![Intent::CancelTimer(BEACON)];
        if self.neighbors.is_empty() {
            self.role = ClusterRole::Loner;
            intents.push(Intent::RadioOff);
        } else if self.wins_election(ctx.id()) {
            intents.extend(self.become_head(rng));
        } else {
            self.role = ClusterRole::Waiting;
            intents.push(Intent::SetTimer {
                after: self.config.head_deadline_ticks,
                tag:   DEADLINE,
            });
        }
        intents
    }

    fn subscribe(&mut self) -> Vec<Intent> {
        let Some((head, _)) = self.candidate.take() else {
            return vec![];
        };
        self.role = ClusterRole::Member;
        self.subscription = Some(head);
        self.add_neighbor(head);
        vec![
            Intent::CancelTimer(DEADLINE),
            self.unicast(head, MeshMessage::Subscribe),
            Intent::RadioOff,
            Intent::SetTimer { after: self.config.report_interval_ticks, tag: REPORT },
        ]
    }
}

impl DeviceBehavior for ClusterMeshDev {
    fn step(&mut self, _ctx: &DeviceContext<'_>, rng: &mut DeviceRng) -> Vec<Intent> {
        if self.started {
            return vec![];
        }
        self.started = true;
        let mut intents = Vec::with_capacity(4);
        if self.config.idle_current_ma > 0.0 {
            intents.push(Intent::RegisterDrain(self.config.idle_current_ma));
        }
        let jitter = rng.gen_range(1..=self.config.beacon_interval_ticks.max(1));
        intents.push(Intent::Listen);
        intents.push(Intent::SetTimer { after: jitter, tag: BEACON });
        intents.push(Intent::SetTimer { after: self.config.search_ticks, tag: ELECT });
        intents
    }

    fn on_timer(&mut self, tag: u32, ctx: &DeviceContext<'_>, rng: &mut DeviceRng) -> Vec<Intent> {
        match (tag, self.role) {
            (BEACON, ClusterRole::Search) => {
                let neighbors = u16::try_from(self.neighbors.len()).unwrap_or(u16::MAX);
                vec![
                    self.broadcast(MeshMessage::Beacon { neighbors }),
                    Intent::SetTimer { after: self.config.beacon_interval_ticks, tag: BEACON },
                ]
            }
            (ELECT, ClusterRole::Search) => self.elect(ctx, rng),
            (ANNOUNCE, ClusterRole::Head) => vec![
                self.broadcast(MeshMessage::Announce),
                Intent::SetTimer { after: self.config.announce_interval_ticks, tag: ANNOUNCE },
            ],
            (SUBSCRIBE, ClusterRole::Waiting) => self.subscribe(),
            (DEADLINE, ClusterRole::Waiting) if self.candidate.is_none() => self.become_head(rng),
            (REPORT, ClusterRole::Member) => {
                let Some(head) = self.subscription else { return vec![] };
                let seq = self.report_seq;
                self.report_seq = self.report_seq.wrapping_add(1);
                vec![
                    self.unicast(head, MeshMessage::Report { seq }),
                    Intent::SetTimer { after: self.config.report_interval_ticks, tag: REPORT },
                ]
            }
            _ => vec![],
        }
    }

    fn radio_callback_rx(
        &mut self,
        packet:    &RadioPacket,
        strength:  u8,
        corrupted: bool,
        ctx:       &DeviceContext<'_>,
        _rng:      &mut DeviceRng,
    ) -> Vec<Intent> {
        if corrupted {
            return vec![];
        }
        let Some(msg) = MeshMessage::decode(&packet.payload) else {
            return vec![];
        };
        let from = packet.source;

        match (msg, self.role) {
            (MeshMessage::Beacon { neighbors }, ClusterRole::Search) => {
                self.add_neighbor(from);
                self.advertised.insert(from, neighbors);
                vec![]
            }
            (MeshMessage::Announce, ClusterRole::Waiting) => {
                self.add_neighbor(from);
                let opens_window = self.candidate.is_none();
                if self.candidate.is_none_or(|(_, best)| strength > best) {
                    self.candidate = Some((from, strength));
                }
                if opens_window {
                    vec![Intent::SetTimer { after: self.config.subscribe_window_ticks, tag: SUBSCRIBE }]
                } else {
                    vec![]
                }
            }
            (MeshMessage::Announce, ClusterRole::Head) => {
                self.add_neighbor(from);
                vec![]
            }
            (MeshMessage::Subscribe, ClusterRole::Head) if packet.destination == Some(ctx.id()) => {
                self.add_neighbor(from);
                vec![]
            }
            (MeshMessage::Report { .. }, ClusterRole::Head) if packet.destination == Some(ctx.id()) => {
                self.reports_seen += 1;
                vec![]
            }
            _ => vec![],
        }
    }

    fn is_cluster_head(&self) -> bool {
        self.role == ClusterRole::Head
    }

    fn neighbors(&self) -> &[DeviceId] {
        &self.neighbors
    }

    fn subscription(&self) -> Option<DeviceId> {
        self.subscription
    }
}
