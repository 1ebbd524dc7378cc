// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for the build-time configuration.

use hwdog_common::config::{
    ticks_from_ms, ACTIVITY_LED_MS, RESET_PULSE_MS, TIMEOUT_LED_MS, TIMEOUT_MINUTES,
};
use hwdog_common::{KickEdge, WatchdogConfig, KICK_EDGE, TICK_MS, TIMEOUT_TICKS};

#[test]
fn test_reference_timing() {
    assert_eq!(TICK_MS, 100);
    assert_eq!(TIMEOUT_MINUTES, 3);
    assert_eq!(TIMEOUT_TICKS, 1800);
    assert_eq!(RESET_PULSE_MS, 500);
}

#[test]
fn test_build_config_derives_ticks() {
    let config = WatchdogConfig::BUILD;
    assert_eq!(config.threshold_ticks, TIMEOUT_TICKS);
    assert_eq!(config.activity_indicator_ticks, ticks_from_ms(ACTIVITY_LED_MS));
    assert_eq!(config.activity_indicator_ticks, 2);
    assert_eq!(config.timeout_indicator_ticks, ticks_from_ms(TIMEOUT_LED_MS));
    assert_eq!(config.timeout_indicator_ticks, 151);
    assert_eq!(config.timeout_ms(), 180_000);
    assert_eq!(WatchdogConfig::default(), config);
}

#[test]
fn test_with_threshold_keeps_other_fields() {
    let config = WatchdogConfig::with_threshold(3);
    assert_eq!(config.threshold_ticks, 3);
    assert_eq!(config.reset_pulse_ms, RESET_PULSE_MS);
    assert_eq!(config.timeout_ms(), 300);
}

#[test]
fn test_with_threshold_never_zero() {
    assert_eq!(WatchdogConfig::with_threshold(0).threshold_ticks, 1);
}

#[test]
fn test_ticks_round_down() {
    assert_eq!(ticks_from_ms(99), 0);
    assert_eq!(ticks_from_ms(150), 1);
    assert_eq!(ticks_from_ms(15_100), 151);
}

#[test]
fn test_default_kick_edge() {
    if cfg!(feature = "kick-rising-edge") {
        assert_eq!(KICK_EDGE, KickEdge::Rising);
    } else {
        assert_eq!(KICK_EDGE, KickEdge::Falling);
    }
}
