// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Simulation runs and their console output.

use std::collections::BTreeSet;

use anyhow::{bail, ensure, Result};
use hwdog_common::config::{
    ACTIVITY_LED_MS, RESET_PULSE_MS, TIMEOUT_LED_MS, TIMEOUT_MINUTES,
};
use hwdog_common::{
    ActivityFlag, TickReport, TickSource, Ticker, Watchdog, WatchdogConfig, KICK_EDGE, TICK_MS,
};

use crate::host::{Pulse, SimPin, SimResetLine, VirtualClock};

/// Longest run accepted from the command line (about 28 hours of virtual time).
pub const MAX_TICKS: u32 = 1_000_000;

/// Outcome of a simulated run.
pub struct Trace {
    pub reports: Vec<TickReport>,
    pub pulses: Vec<Pulse>,
    /// Virtual time at the end of each tick, milliseconds.
    pub times_ms: Vec<u64>,
}

impl Trace {
    /// Ticks on which a reset fired.
    pub fn fired_on(&self) -> Vec<u32> {
        self.reports
            .iter()
            .filter(|r| r.reset_fired)
            .map(|r| r.tick)
            .collect()
    }
}

/// Reference scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scenario {
    /// No activity ever
    A,
    /// Activity on tick 2 only
    B,
    /// Activity on every tick
    C,
    /// Activity on the tick that would cross the threshold
    D,
}

impl Scenario {
    const THRESHOLD: u32 = 3;

    fn describe(self) -> &'static str {
        match self {
            Self::A => "threshold 3, no activity: fires on ticks 3, 6, 9",
            Self::B => "threshold 3, activity on tick 2: counter restarts, fires on tick 5",
            Self::C => "threshold 3, activity every tick: never fires",
            Self::D => "threshold 3, activity on tick 3: activity wins, fires on tick 6",
        }
    }

    fn ticks(self) -> u32 {
        match self {
            Self::A => 9,
            Self::B => 7,
            Self::C => 10,
            Self::D => 7,
        }
    }

    fn activity(self) -> BTreeSet<u32> {
        match self {
            Self::A => BTreeSet::new(),
            Self::B => BTreeSet::from([2]),
            Self::C => (1..=self.ticks()).collect(),
            Self::D => BTreeSet::from([3]),
        }
    }

    fn expected_fires(self) -> Vec<u32> {
        match self {
            Self::A => vec![3, 6, 9],
            Self::B => vec![5],
            Self::C => vec![],
            Self::D => vec![6],
        }
    }
}

/// Drive the control loop for `ticks` ticks with kicks on the given ticks.
pub fn simulate(config: WatchdogConfig, ticks: u32, activity: &BTreeSet<u32>) -> Trace {
    let clock = VirtualClock::new();
    let line = SimResetLine::new(clock.clone());
    let pulses = line.pulses();
    let mut watchdog = Watchdog::new(config, line, SimPin::default(), SimPin::default());
    let mut ticker = Ticker::new(clock.clone());
    let mut delay = clock.clone();
    let flag = ActivityFlag::new();

    let mut reports = Vec::with_capacity(ticks as usize);
    let mut times_ms = Vec::with_capacity(ticks as usize);
    for tick in 1..=ticks {
        // Kicks land while the loop sleeps, before the tick consumes the latch.
        if activity.contains(&tick) {
            flag.signal();
        }
        ticker.wait_tick();
        reports.push(watchdog.tick(flag.take(), &mut delay));
        times_ms.push(clock.now_ms());
    }

    let pulses = pulses.borrow().clone();
    Trace {
        reports,
        pulses,
        times_ms,
    }
}

fn print_trace(trace: &Trace) {
    println!("tick  time_ms  kick  idle  reset  act_led  tmo_led");
    for (report, time_ms) in trace.reports.iter().zip(&trace.times_ms) {
        println!(
            "{:>4}  {:>7}  {:>4}  {:>4}  {:>5}  {:>7}  {:>7}",
            report.tick,
            time_ms,
            flag_str(report.activity),
            report.idle_ticks,
            flag_str(report.reset_fired),
            on_off(report.activity_lit),
            on_off(report.timeout_lit),
        );
    }
    for pulse in &trace.pulses {
        println!(
            "reset pulse {} ms .. {} ms ({} ms)",
            pulse.start_ms,
            pulse.end_ms,
            pulse.duration_ms()
        );
    }
}

fn flag_str(value: bool) -> &'static str {
    if value {
        "x"
    } else {
        "."
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Simulate a custom kick pattern.
pub fn run(threshold: u32, ticks: u32, activity: &[u32], every_tick: bool) -> Result<()> {
    ensure!(threshold > 0, "threshold must be at least one tick");
    ensure!(ticks > 0, "nothing to simulate with zero ticks");
    ensure!(
        ticks <= MAX_TICKS,
        "{ticks} ticks is more than the {MAX_TICKS} a run may simulate"
    );
    if let Some(&late) = activity.iter().find(|&&t| t == 0 || t > ticks) {
        bail!("activity tick {late} is outside 1..={ticks}");
    }

    let kicks: BTreeSet<u32> = if every_tick {
        (1..=ticks).collect()
    } else {
        activity.iter().copied().collect()
    };

    let trace = simulate(WatchdogConfig::with_threshold(threshold), ticks, &kicks);
    print_trace(&trace);
    println!("resets fired on ticks {:?}", trace.fired_on());
    Ok(())
}

/// Replay a reference scenario and check its outcome.
pub fn scenario(which: Scenario) -> Result<()> {
    println!("Scenario {:?}: {}", which, which.describe());

    let trace = simulate(
        WatchdogConfig::with_threshold(Scenario::THRESHOLD),
        which.ticks(),
        &which.activity(),
    );
    print_trace(&trace);

    let fired = trace.fired_on();
    let expected = which.expected_fires();
    if fired != expected {
        bail!("scenario {which:?}: resets fired on {fired:?}, expected {expected:?}");
    }
    println!("OK: resets fired on ticks {fired:?}");
    Ok(())
}

/// Print the configuration compiled into the firmware.
pub fn show_config() -> Result<()> {
    let config = WatchdogConfig::BUILD;
    println!("Tick period:        {TICK_MS} ms");
    println!(
        "Timeout:            {TIMEOUT_MINUTES} min ({} ticks, {} ms)",
        config.threshold_ticks,
        config.timeout_ms()
    );
    println!("Reset pulse:        {RESET_PULSE_MS} ms");
    println!(
        "Activity indicator: {ACTIVITY_LED_MS} ms ({} ticks)",
        config.activity_indicator_ticks
    );
    println!(
        "Timeout indicator:  {TIMEOUT_LED_MS} ms ({} ticks)",
        config.timeout_indicator_ticks
    );
    println!("Kick edge:          {KICK_EDGE:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scenarios_match_expectations() {
        for which in [Scenario::A, Scenario::B, Scenario::C, Scenario::D] {
            let trace = simulate(
                WatchdogConfig::with_threshold(Scenario::THRESHOLD),
                which.ticks(),
                &which.activity(),
            );
            assert_eq!(trace.fired_on(), which.expected_fires(), "{which:?}");
        }
    }

    #[test]
    fn test_pulses_are_exact() {
        let trace = simulate(WatchdogConfig::with_threshold(2), 6, &BTreeSet::new());
        assert_eq!(trace.pulses.len(), 3);
        for pulse in &trace.pulses {
            assert_eq!(pulse.duration_ms(), u64::from(RESET_PULSE_MS));
        }
    }

    #[test]
    fn test_pulse_time_is_added_to_the_clock() {
        let trace = simulate(WatchdogConfig::with_threshold(3), 3, &BTreeSet::new());
        let expected = 3 * u64::from(TICK_MS) + u64::from(RESET_PULSE_MS);
        assert_eq!(trace.times_ms.last().copied(), Some(expected));
    }

    #[test]
    fn test_run_rejects_out_of_range_activity() {
        assert!(run(3, 5, &[6], false).is_err());
        assert!(run(3, 5, &[0], false).is_err());
        assert!(run(0, 5, &[], false).is_err());
    }

    #[test]
    fn test_run_rejects_oversized_tick_count() {
        let err = run(3, u32::MAX, &[], false).unwrap_err();
        assert!(err.to_string().contains("more than"));
        assert!(run(3, MAX_TICKS + 1, &[], false).is_err());
    }

    #[test]
    fn test_run_accepts_valid_input() {
        assert!(run(3, 5, &[1, 5], false).is_ok());
    }
}
