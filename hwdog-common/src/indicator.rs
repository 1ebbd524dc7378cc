// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Status outputs with a tick-based on-time.

use embedded_hal::digital::OutputPin;

/// Change produced by one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Countdown {
    /// Not running, or still running after this tick.
    Unchanged,
    /// Reached zero on this tick; the output goes off now.
    Expired,
}

/// Re-armable countdown in tick units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorTimer {
    remaining: u32,
}

impl IndicatorTimer {
    pub const fn new() -> Self {
        Self { remaining: 0 }
    }

    /// Start or restart the countdown. Re-arming does not accumulate.
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = ticks;
    }

    pub fn tick(&mut self) -> Countdown {
        if self.remaining == 0 {
            return Countdown::Unchanged;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            Countdown::Expired
        } else {
            Countdown::Unchanged
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }
}

/// An output pin lit while its timer runs.
pub struct Indicator<P> {
    pin: P,
    timer: IndicatorTimer,
    lit: bool,
}

impl<P: OutputPin> Indicator<P> {
    /// Take ownership of the pin and switch it off.
    pub fn new(mut pin: P) -> Self {
        pin.set_low().ok();
        Self {
            pin,
            timer: IndicatorTimer::new(),
            lit: false,
        }
    }

    /// Light the output for `ticks` ticks, restarting any running countdown.
    pub fn arm(&mut self, ticks: u32) {
        self.timer.arm(ticks);
        self.set(true);
    }

    /// Advance the countdown; turns the output off on the tick it expires.
    pub fn tick(&mut self) -> Countdown {
        let change = self.timer.tick();
        if change == Countdown::Expired {
            self.set(false);
        }
        change
    }

    /// Drive the output directly, bypassing the timer. Used by the lamp test.
    pub fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.lit = on;
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn timer(&self) -> &IndicatorTimer {
        &self.timer
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }
}
