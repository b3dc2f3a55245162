//! Radio transceiver model.
//!
//! # States
//!
//! ```text
//!            listen()                 transmit()
//!   Off  ──────────────▶ Listening ─────────────▶ Transmitting
//!    ▲                       │  ▲                      │
//!    └──── turn_off() ───────┘  └── finish (resume) ───┘
//! ```
//!
//! Entering a state registers that state's current on the owning device's
//! [`PowerLedger`]; leaving it removes the same amount, so the ledger stays
//! balanced.  `Listening` and `Transmitting` both count as active time for
//! the duty cycle.

use wsn_core::{DeviceId, Timestamp};

use crate::{DeviceError, DeviceResult, PowerLedger, RadioPacket};

/// Current draw of each radio state, mA.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioConfig {
    pub tx_current_ma: f64,
    pub rx_current_ma: f64,
}

impl Default for RadioConfig {
    /// Figures typical of a 2.4 GHz low-power SoC at 0 dBm.
    fn default() -> Self {
        Self {
            tx_current_ma: 5.3,
            rx_current_ma: 5.4,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadioState {
    #[default]
    Off,
    Listening,
    Transmitting,
}

impl RadioState {
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, RadioState::Off)
    }
}

/// A packet on the air.
#[derive(Clone, Debug, PartialEq)]
pub struct Transmission {
    pub packet:  RadioPacket,
    pub started: Timestamp,
    /// First tick at which the packet is no longer on the air.
    pub ends:    Timestamp,
}

#[derive(Debug)]
pub struct Radio {
    config:       RadioConfig,
    state:        RadioState,
    /// State to return to when the current transmission ends.
    resume:       RadioState,
    current:      Option<Transmission>,
    state_since:  Timestamp,
    powered_at:   Timestamp,
    active_ticks: u64,
    transmitted:  u64,
    received:     u64,
    corrupted:    u64,
}

impl Radio {
    pub fn new(config: RadioConfig, now: Timestamp) -> Self {
        Self {
            config,
            state:        RadioState::Off,
            resume:       RadioState::Off,
            current:      None,
            state_since:  now,
            powered_at:   now,
            active_ticks: 0,
            transmitted:  0,
            received:     0,
            corrupted:    0,
        }
    }

    #[inline]
    pub fn state(&self) -> RadioState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// The packet currently on the air, if any.
    pub fn transmission(&self) -> Option<&Transmission> {
        self.current.as_ref()
    }

    /// `true` if the radio can hear a packet right now.
    #[inline]
    pub fn is_listening(&self) -> bool {
        self.state == RadioState::Listening
    }

    pub fn transmitted(&self) -> u64 {
        self.transmitted
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn corrupted(&self) -> u64 {
        self.corrupted
    }

    fn draw_of(&self, state: RadioState) -> f64 {
        match state {
            RadioState::Off          => 0.0,
            RadioState::Listening    => self.config.rx_current_ma,
            RadioState::Transmitting => self.config.tx_current_ma,
        }
    }

    fn switch(&mut self, next: RadioState, ledger: &PowerLedger, now: Timestamp) {
        if next == self.state {
            return;
        }
        if self.state.is_active() {
            self.active_ticks += now.since(self.state_since);
        }
        let (old, new) = (self.draw_of(self.state), self.draw_of(next));
        if old > 0.0 {
            ledger.remove_drain(old, now);
        }
        if new > 0.0 {
            ledger.register_drain(new, now);
        }
        self.state = next;
        self.state_since = now;
    }

    /// Start listening.  While transmitting, the radio will listen once the
    /// packet is sent instead.
    pub fn listen(&mut self, ledger: &PowerLedger, now: Timestamp) {
        if self.state == RadioState::Transmitting {
            self.resume = RadioState::Listening;
        } else {
            self.switch(RadioState::Listening, ledger, now);
        }
    }

    /// Power the radio down (deferred until the end of a transmission).
    pub fn turn_off(&mut self, ledger: &PowerLedger, now: Timestamp) {
        if self.state == RadioState::Transmitting {
            self.resume = RadioState::Off;
        } else {
            self.switch(RadioState::Off, ledger, now);
        }
    }

    /// Put `packet` on the air for `packet.airtime_ticks` ticks (at least one).
    ///
    /// Returns the tick at which the transmission ends.
    pub fn transmit(
        &mut self,
        device: DeviceId,
        packet: RadioPacket,
        ledger: &PowerLedger,
        now:    Timestamp,
    ) -> DeviceResult<Timestamp> {
        if let Some(tx) = &self.current {
            return Err(DeviceError::RadioBusy { device, until: tx.ends });
        }
        let ends = now + packet.airtime_ticks.max(1);
        self.resume = self.state;
        self.switch(RadioState::Transmitting, ledger, now);
        self.current = Some(Transmission { packet, started: now, ends });
        Ok(ends)
    }

    /// Complete the transmission if it ends at or before `now`.
    ///
    /// The radio returns to the state it was in (or was asked to enter)
    /// while the packet was on the air.
    pub fn finish_transmission(&mut self, ledger: &PowerLedger, now: Timestamp) -> Option<Transmission> {
        if self.current.as_ref().is_none_or(|tx| tx.ends > now) {
            return None;
        }
        let tx = self.current.take()?;
        self.switch(self.resume, ledger, tx.ends);
        self.transmitted += 1;
        Some(tx)
    }

    /// Count a packet that reached this radio.
    pub fn record_receive(&mut self, corrupted: bool) {
        self.received += 1;
        if corrupted {
            self.corrupted += 1;
        }
    }

    /// Ticks spent listening or transmitting up to `now`.
    pub fn active_ticks(&self, now: Timestamp) -> u64 {
        let open = if self.state.is_active() { now.since(self.state_since) } else { 0 };
        self.active_ticks + open
    }

    /// Fraction of elapsed time the radio has been active, in `[0, 1]`.
    ///
    /// Zero when no time has elapsed yet.
    pub fn total_duty_cycle(&self, now: Timestamp) -> f64 {
        let elapsed = now.since(self.powered_at);
        if elapsed == 0 {
            return 0.0;
        }
        (self.active_ticks(now) as f64 / elapsed as f64).min(1.0)
    }
}
