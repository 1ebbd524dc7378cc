// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Activity latch shared between the kick interrupt and the control loop.

use core::cell::Cell;
use critical_section::Mutex;

/// "Activity observed since the last tick."
///
/// Set from interrupt context, read-and-cleared once per tick from the main loop.
/// Several kicks within one tick collapse into a single observation.
///
/// Cortex-M0+ has no atomic swap, so the compound read-then-clear runs inside a
/// critical section. A kick that lands before [`take`](Self::take) enters the
/// section is always seen by it; one that lands after is seen on the next tick.
pub struct ActivityFlag {
    seen: Mutex<Cell<bool>>,
}

impl ActivityFlag {
    pub const fn new() -> Self {
        Self {
            seen: Mutex::new(Cell::new(false)),
        }
    }

    /// Record a kick. Callable from any context.
    pub fn signal(&self) {
        critical_section::with(|cs| self.signal_in(cs));
    }

    /// Record a kick from code already holding a critical section.
    pub fn signal_in(&self, cs: critical_section::CriticalSection<'_>) {
        self.seen.borrow(cs).set(true);
    }

    /// Consume the latch, returning whether any kick arrived since the last call.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.seen.borrow(cs).replace(false))
    }

    /// Peek without consuming.
    pub fn is_set(&self) -> bool {
        critical_section::with(|cs| self.seen.borrow(cs).get())
    }
}

impl Default for ActivityFlag {
    fn default() -> Self {
        Self::new()
    }
}
