// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! RP2040 board support: clocks, pin assignment and the tri-state reset line.
//!
//! | signal         | pin  | direction                       |
//! |----------------|------|---------------------------------|
//! | kick           | GP2  | input, pull-up, edge interrupt  |
//! | reset out      | GP16 | tri-state, driven only on pulse |
//! | activity LED   | GP25 | push-pull (onboard LED)         |
//! | timeout LED    | GP15 | push-pull                       |

use crate::config::{KickEdge, KICK_EDGE, RESET_ACTIVE_HIGH};
use crate::reset::ResetLine;
use embedded_hal::digital::{OutputPin, PinState};
use rp2040_hal::{
    clocks::init_clocks_and_plls,
    gpio::{
        bank0, FunctionSioInput, FunctionSioOutput, Interrupt, OutputEnableOverride, Pin,
        PullDown, PullNone, PullUp,
    },
    pac, Sio, Timer, Watchdog,
};

/// Crystal on the Pico and most RP2040 boards.
pub const XTAL_FREQ_HZ: u32 = 12_000_000;

pub type KickPin = Pin<bank0::Gpio2, FunctionSioInput, PullUp>;
pub type ResetPin = Pin<bank0::Gpio16, FunctionSioOutput, PullNone>;
pub type ActivityLedPin = Pin<bank0::Gpio25, FunctionSioOutput, PullDown>;
pub type TimeoutLedPin = Pin<bank0::Gpio15, FunctionSioOutput, PullDown>;

/// GPIO interrupt matching the configured kick edge.
pub const KICK_INTERRUPT: Interrupt = match KICK_EDGE {
    KickEdge::Falling => Interrupt::EdgeLow,
    KickEdge::Rising => Interrupt::EdgeHigh,
};

/// Peripherals the watchdog needs, configured and ready.
pub struct Board {
    pub timer: Timer,
    pub kick: KickPin,
    pub reset: TriStateResetLine,
    pub activity_led: ActivityLedPin,
    pub timeout_led: TimeoutLedPin,
}

/// Bring up clocks, the microsecond timer and the watchdog pins.
///
/// The kick interrupt is left disabled; see [`enable_kick_interrupt`].
///
/// Returns `None` if the peripherals were already taken or the PLLs fail to lock.
pub fn init_board() -> Option<Board> {
    let mut pac = pac::Peripherals::take()?;
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()?;

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let sio = Sio::new(pac.SIO);
    let pins = rp2040_hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let kick = pins.gpio2.into_pull_up_input();

    // Disable the output before the pad becomes an output so the host never
    // sees a glitch on its reset line during bring-up.
    let mut reset_pin = pins.gpio16.into_pull_type::<PullNone>();
    reset_pin.set_output_enable_override(OutputEnableOverride::Disable);
    let reset = TriStateResetLine::new(reset_pin.into_push_pull_output_in_state(reset_level()));

    Some(Board {
        timer,
        kick,
        reset,
        activity_led: pins.gpio25.into_push_pull_output(),
        timeout_led: pins.gpio15.into_push_pull_output(),
    })
}

/// Drop edges latched so far and start raising interrupts on the kick edge.
///
/// Called once the lamp test is over, so kicks seen during it never count.
pub fn enable_kick_interrupt(kick: &mut KickPin) {
    kick.clear_interrupt(KICK_INTERRUPT);
    kick.set_interrupt_enabled(KICK_INTERRUPT, true);
}

fn reset_level() -> PinState {
    if RESET_ACTIVE_HIGH {
        PinState::High
    } else {
        PinState::Low
    }
}

/// Reset output that floats when idle.
///
/// The pad latch holds the reset-active level permanently; asserting and
/// releasing only flips the output enable, so the line is either driven to
/// that level or not driven at all.
pub struct TriStateResetLine {
    pin: ResetPin,
}

impl TriStateResetLine {
    pub fn new(mut pin: ResetPin) -> Self {
        pin.set_output_enable_override(OutputEnableOverride::Disable);
        pin.set_state(reset_level()).ok();
        Self { pin }
    }
}

impl ResetLine for TriStateResetLine {
    fn assert(&mut self) {
        self.pin.set_output_enable_override(OutputEnableOverride::Enable);
    }

    fn release(&mut self) {
        self.pin.set_output_enable_override(OutputEnableOverride::Disable);
    }
}
