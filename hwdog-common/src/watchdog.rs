// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The control loop: engine, reset driver and indicators under one owner.

use crate::activity::ActivityFlag;
use crate::config::WatchdogConfig;
use crate::engine::{EngineAction, EngineState, TickEvent, TimeoutEngine};
use crate::indicator::Indicator;
use crate::reset::{ResetDriver, ResetLine};
use crate::tick::TickSource;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Ticks processed since power-up, this one included.
    pub tick: u32,
    pub activity: bool,
    pub reset_fired: bool,
    /// Idle count after the tick.
    pub idle_ticks: u32,
    pub activity_lit: bool,
    pub timeout_lit: bool,
}

/// Hardware watchdog for one host.
///
/// `L` is the tri-state reset line, `A` and `T` the activity and timeout
/// indicator outputs.
pub struct Watchdog<L, A, T> {
    config: WatchdogConfig,
    engine: TimeoutEngine,
    reset: ResetDriver<L>,
    activity_led: Indicator<A>,
    timeout_led: Indicator<T>,
    ticks: u32,
}

impl<L, A, T> Watchdog<L, A, T>
where
    L: ResetLine,
    A: OutputPin,
    T: OutputPin,
{
    /// Power-up state: counters zero, reset line released, indicators off.
    pub fn new(config: WatchdogConfig, reset_line: L, activity_pin: A, timeout_pin: T) -> Self {
        Self {
            config,
            engine: TimeoutEngine::new(config.threshold_ticks),
            reset: ResetDriver::new(reset_line, config.reset_pulse_ms),
            activity_led: Indicator::new(activity_pin),
            timeout_led: Indicator::new(timeout_pin),
            ticks: 0,
        }
    }

    /// Light both indicators for `duration_ms`, then switch them off.
    pub fn lamp_test(&mut self, delay: &mut impl DelayNs, duration_ms: u32) {
        self.activity_led.set(true);
        self.timeout_led.set(true);
        delay.delay_ms(duration_ms);
        self.activity_led.set(false);
        self.timeout_led.set(false);
    }

    /// Process one tick.
    ///
    /// `activity` is the consumed kick latch. Indicators are decremented after
    /// the engine ran, including on the tick that armed them.
    pub fn tick(&mut self, activity: bool, delay: &mut impl DelayNs) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);
        #[cfg(feature = "defmt")]
        let was_idle = self.engine.idle_ticks();

        let mut reset_fired = false;
        match self.engine.step(TickEvent::from(activity)) {
            EngineAction::None => {}
            EngineAction::ArmActivityIndicator => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Activity after {} idle ticks", was_idle);
                self.activity_led.arm(self.config.activity_indicator_ticks);
            }
            EngineAction::PulseReset => {
                self.fire_reset(delay);
                reset_fired = true;
            }
        }

        self.timeout_led.tick();
        self.activity_led.tick();

        TickReport {
            tick: self.ticks,
            activity,
            reset_fired,
            idle_ticks: self.engine.idle_ticks(),
            activity_lit: self.activity_led.is_lit(),
            timeout_lit: self.timeout_led.is_lit(),
        }
    }

    /// Run forever: wait a tick, consume the kick latch, process.
    pub fn run(
        &mut self,
        ticker: &mut impl TickSource,
        activity: &ActivityFlag,
        delay: &mut impl DelayNs,
    ) -> ! {
        loop {
            ticker.wait_tick();
            self.tick(activity.take(), delay);
        }
    }

    fn fire_reset(&mut self, delay: &mut impl DelayNs) {
        #[cfg(feature = "defmt")]
        defmt::println!(
            "No activity for {} ticks, resetting host (pulse #{})",
            self.config.threshold_ticks,
            self.reset.pulse_count() + 1
        );

        #[cfg(feature = "timeout-flash")]
        {
            crate::blink(
                self.activity_led.pin_mut(),
                delay,
                crate::config::TIMEOUT_FLASH_COUNT,
                crate::config::TIMEOUT_FLASH_PERIOD_MS,
            );
            self.activity_led.set(false);
        }

        self.timeout_led.set(true);
        // Idle time is counted from the end of this pulse, not its start.
        self.reset.pulse(delay);
        self.timeout_led.arm(self.config.timeout_indicator_ticks);
        self.engine.complete_reset();
    }

    pub fn config(&self) -> &WatchdogConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn idle_ticks(&self) -> u32 {
        self.engine.idle_ticks()
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn reset_driver(&self) -> &ResetDriver<L> {
        &self.reset
    }

    pub fn activity_indicator(&self) -> &Indicator<A> {
        &self.activity_led
    }

    pub fn timeout_indicator(&self) -> &Indicator<T> {
        &self.timeout_led
    }
}
