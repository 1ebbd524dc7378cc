// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Fixed-period time base for the control loop.

use crate::config::TICK_MS;
use embedded_hal::delay::DelayNs;

/// Source of control-loop ticks.
pub trait TickSource {
    /// Block until the next tick is due.
    fn wait_tick(&mut self);
}

/// Tick source backed by a blocking delay.
///
/// Loop body time adds to the period; with a body of a few microseconds
/// against a 100 ms period the drift is negligible.
pub struct Ticker<D> {
    delay: D,
    period_ms: u32,
}

impl<D: DelayNs> Ticker<D> {
    pub fn new(delay: D) -> Self {
        Self::with_period(delay, TICK_MS)
    }

    pub fn with_period(delay: D, period_ms: u32) -> Self {
        Self { delay, period_ms }
    }
}

impl<D: DelayNs> TickSource for Ticker<D> {
    fn wait_tick(&mut self) {
        self.delay.delay_ms(self.period_ms);
    }
}
