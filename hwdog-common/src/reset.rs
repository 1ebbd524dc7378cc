// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Reset pulse generation on the host's reset line.
//!
//! The line is only driven while a pulse is in flight. The rest of the time it
//! is left floating so the host's own reset circuitry (button, supervisor,
//! deep-sleep wake) keeps full control of it.

use embedded_hal::delay::DelayNs;

/// A reset output with a non-driving idle state.
pub trait ResetLine {
    /// Start driving the line to its reset-active level.
    fn assert(&mut self);
    /// Stop driving the line (high impedance).
    fn release(&mut self);
}

/// Electrical state of the reset output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPulseState {
    Idle,
    Asserted,
}

/// Issues fixed-length blocking pulses.
pub struct ResetDriver<L> {
    line: L,
    pulse_ms: u32,
    state: ResetPulseState,
    pulses: u32,
}

impl<L: ResetLine> ResetDriver<L> {
    /// Take ownership of the line and make sure it is released.
    pub fn new(mut line: L, pulse_ms: u32) -> Self {
        line.release();
        Self {
            line,
            pulse_ms,
            state: ResetPulseState::Idle,
            pulses: 0,
        }
    }

    /// Assert the line for the configured duration, then release it.
    ///
    /// Blocks the caller for the full pulse; nothing else runs on the control
    /// loop meanwhile, which keeps the pulse length exact.
    pub fn pulse(&mut self, delay: &mut impl DelayNs) {
        self.state = ResetPulseState::Asserted;
        self.line.assert();
        delay.delay_ms(self.pulse_ms);
        self.line.release();
        self.state = ResetPulseState::Idle;
        self.pulses = self.pulses.wrapping_add(1);
    }

    pub fn state(&self) -> ResetPulseState {
        self.state
    }

    pub fn pulse_ms(&self) -> u32 {
        self.pulse_ms
    }

    /// Pulses issued since power-up.
    pub fn pulse_count(&self) -> u32 {
        self.pulses
    }

    pub fn line(&self) -> &L {
        &self.line
    }
}
