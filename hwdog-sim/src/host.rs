// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Virtual time and pins for running the watchdog on the host.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use hwdog_common::ResetLine;

/// Shared virtual clock in nanoseconds. Delays advance it instantly.
#[derive(Clone, Default)]
pub struct VirtualClock {
    now_ns: Rc<Cell<u64>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}

impl DelayNs for VirtualClock {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ms) * 1_000_000);
    }
}

/// Output pin that only remembers its level.
#[derive(Default)]
pub struct SimPin {
    high: bool,
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

/// One completed assertion of the reset line, in virtual milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Pulse {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// Reset line that timestamps every assertion.
pub struct SimResetLine {
    clock: VirtualClock,
    asserted_at: Option<u64>,
    pulses: Rc<RefCell<Vec<Pulse>>>,
}

impl SimResetLine {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            asserted_at: None,
            pulses: Rc::default(),
        }
    }

    /// Handle to the pulse log that stays valid after the line is moved.
    pub fn pulses(&self) -> Rc<RefCell<Vec<Pulse>>> {
        Rc::clone(&self.pulses)
    }
}

impl ResetLine for SimResetLine {
    fn assert(&mut self) {
        self.asserted_at = Some(self.clock.now_ms());
    }

    fn release(&mut self) {
        if let Some(start_ms) = self.asserted_at.take() {
            self.pulses.borrow_mut().push(Pulse {
                start_ms,
                end_ms: self.clock.now_ms(),
            });
        }
    }
}
