// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Core of the hwdog hardware watchdog.
//!
//! The watchdog watches one kick input and pulses the host's reset line when the
//! input stays silent for longer than the build-time timeout.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for host tools
//! - `embedded` feature: Enables RP2040 board support (rp2040-hal)

#![cfg_attr(not(feature = "std"), no_std)]

pub mod activity;
pub mod config;
pub mod engine;
pub mod indicator;
pub mod reset;
pub mod tick;
pub mod watchdog;

// Board bring-up and pin types (requires embedded feature)
#[cfg(feature = "embedded")]
pub mod board;

// Re-export commonly used types
pub use activity::ActivityFlag;
pub use config::{KickEdge, WatchdogConfig, KICK_EDGE, TICK_MS, TIMEOUT_TICKS};
pub use engine::{EngineAction, EngineState, TickEvent, TimeoutEngine};
pub use indicator::{Countdown, Indicator, IndicatorTimer};
pub use reset::{ResetDriver, ResetLine, ResetPulseState};
pub use tick::{TickSource, Ticker};
pub use watchdog::{TickReport, Watchdog};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Blink an LED a specified number of times.
pub fn blink(led: &mut impl OutputPin, timer: &mut impl DelayNs, count: u32, period_ms: u32) {
    for _ in 0..count {
        led.set_high().ok();
        timer.delay_ms(period_ms);
        led.set_low().ok();
        timer.delay_ms(period_ms);
    }
}
