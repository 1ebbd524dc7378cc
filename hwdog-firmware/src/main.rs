// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

#![no_std]
#![no_main]

use core::cell::RefCell;
use critical_section::Mutex;
use defmt_rtt as _;
use hwdog_common::board::{self, KickPin, KICK_INTERRUPT};
use hwdog_common::config::{RESET_PULSE_MS, SELF_TEST_MS, TIMEOUT_MINUTES};
use hwdog_common::{ActivityFlag, Ticker, Watchdog, WatchdogConfig, KICK_EDGE, TICK_MS};
use panic_probe as _;
use rp2040_hal::pac::{self, interrupt};

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;

#[unsafe(link_section = ".boot2")]
#[used]
pub static BOOT2_FIRMWARE: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

const VERSION: &str = env!("HWDOG_VERSION");

/// Set by the kick interrupt, consumed once per tick by the control loop.
static ACTIVITY: ActivityFlag = ActivityFlag::new();

/// Kick input, handed to the interrupt handler once configured.
static KICK_PIN: Mutex<RefCell<Option<KickPin>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    defmt::println!("hwdog {} init", VERSION);

    let Some(board) = board::init_board() else {
        defmt::println!("Board init failed, watchdog inactive");
        loop {
            cortex_m::asm::nop();
        }
    };

    let config = WatchdogConfig::BUILD;
    defmt::println!(
        "Timeout {} min ({} ticks of {} ms), reset pulse {} ms, kick edge {}",
        TIMEOUT_MINUTES,
        config.threshold_ticks,
        TICK_MS,
        RESET_PULSE_MS,
        KICK_EDGE
    );

    let mut delay = board.timer;
    let mut ticker = Ticker::new(board.timer);
    let mut watchdog = Watchdog::new(config, board.reset, board.activity_led, board.timeout_led);

    watchdog.lamp_test(&mut delay, SELF_TEST_MS);

    let mut kick = board.kick;
    board::enable_kick_interrupt(&mut kick);
    critical_section::with(|cs| {
        KICK_PIN.borrow_ref_mut(cs).replace(kick);
    });
    // SAFETY: the handler only touches KICK_PIN and ACTIVITY, both behind critical sections.
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    defmt::println!("Watching");
    watchdog.run(&mut ticker, &ACTIVITY, &mut delay)
}

#[interrupt]
fn IO_IRQ_BANK0() {
    critical_section::with(|cs| {
        let mut kick = KICK_PIN.borrow_ref_mut(cs);
        if let Some(pin) = kick.as_mut() {
            if pin.interrupt_status(KICK_INTERRUPT) {
                pin.clear_interrupt(KICK_INTERRUPT);
                ACTIVITY.signal_in(cs);
            }
        }
    });
}
