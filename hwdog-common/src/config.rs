// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build-time configuration.
//!
//! Everything here is fixed when the firmware is compiled. There is no runtime
//! reconfiguration surface and nothing is persisted across power cycles.

/// Period of one control-loop tick.
pub const TICK_MS: u32 = 100;

/// Silence on the kick input tolerated before the host is reset.
pub const TIMEOUT_MINUTES: u32 = 3;

/// Idle ticks that trigger a reset.
pub const TIMEOUT_TICKS: u32 = ticks_from_ms(TIMEOUT_MINUTES * 60 * 1000);

/// How long the reset line is held asserted, like a user pressing the button.
pub const RESET_PULSE_MS: u32 = 500;

/// Activity indicator on-time after an observed kick.
pub const ACTIVITY_LED_MS: u32 = 200;

/// Timeout indicator on-time after a fired reset.
pub const TIMEOUT_LED_MS: u32 = 15_100;

/// Both indicators are lit for this long at power-on.
pub const SELF_TEST_MS: u32 = 3000;

/// Flash count and half period used by the `timeout-flash` feature.
pub const TIMEOUT_FLASH_COUNT: u32 = 4;
pub const TIMEOUT_FLASH_PERIOD_MS: u32 = 330;

/// Edge of the kick input that counts as activity.
pub const KICK_EDGE: KickEdge = if cfg!(feature = "kick-rising-edge") {
    KickEdge::Rising
} else {
    KickEdge::Falling
};

/// Level the reset line is driven to while asserted.
pub const RESET_ACTIVE_HIGH: bool = cfg!(feature = "reset-active-high");

const _: () = assert!(TICK_MS > 0);
const _: () = assert!(TIMEOUT_TICKS > 0, "timeout must span at least one tick");
const _: () = assert!(ticks_from_ms(ACTIVITY_LED_MS) > 0);
const _: () = assert!(ticks_from_ms(TIMEOUT_LED_MS) > 0);

/// Convert a duration to whole ticks, rounding down.
pub const fn ticks_from_ms(ms: u32) -> u32 {
    ms / TICK_MS
}

/// Signal edge on the kick input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KickEdge {
    Falling,
    Rising,
}

/// Tick counts consumed by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchdogConfig {
    /// Idle ticks before a reset fires. Never zero.
    pub threshold_ticks: u32,
    pub reset_pulse_ms: u32,
    pub activity_indicator_ticks: u32,
    pub timeout_indicator_ticks: u32,
}

impl WatchdogConfig {
    /// The configuration compiled into the firmware.
    pub const BUILD: Self = Self {
        threshold_ticks: TIMEOUT_TICKS,
        reset_pulse_ms: RESET_PULSE_MS,
        activity_indicator_ticks: ticks_from_ms(ACTIVITY_LED_MS),
        timeout_indicator_ticks: ticks_from_ms(TIMEOUT_LED_MS),
    };

    /// Build configuration with a different idle threshold.
    ///
    /// A zero threshold is clamped to one tick.
    pub const fn with_threshold(threshold_ticks: u32) -> Self {
        Self {
            threshold_ticks: if threshold_ticks == 0 { 1 } else { threshold_ticks },
            ..Self::BUILD
        }
    }

    /// Wall-clock length of the idle window, excluding the reset pulse.
    pub const fn timeout_ms(&self) -> u32 {
        self.threshold_ticks * TICK_MS
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self::BUILD
    }
}
