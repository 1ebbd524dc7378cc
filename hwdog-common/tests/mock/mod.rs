// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Recording doubles for the embedded-hal seams.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use hwdog_common::ResetLine;

/// Everything the doubles did, in order, with the virtual time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Pin { name: &'static str, high: bool },
    ResetAssert,
    ResetRelease,
    Delay { ms: u64 },
}

#[derive(Default)]
struct Inner {
    now_ns: u64,
    ops: Vec<(u64, Op)>,
}

/// Shared log and virtual clock.
#[derive(Clone, Default)]
pub struct Recorder {
    inner: Rc<RefCell<Inner>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ns / 1_000_000
    }

    pub fn ops(&self) -> Vec<(u64, Op)> {
        self.inner.borrow().ops.clone()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().ops.clear();
    }

    fn push(&self, op: Op) {
        let mut inner = self.inner.borrow_mut();
        let at = inner.now_ns / 1_000_000;
        inner.ops.push((at, op));
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            high: None,
            recorder: self.clone(),
        }
    }

    pub fn reset_line(&self) -> MockResetLine {
        MockResetLine {
            driving: false,
            recorder: self.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            recorder: self.clone(),
        }
    }

    /// Time between every assert and the release that follows it.
    pub fn pulse_lengths_ms(&self) -> Vec<u64> {
        let mut lengths = Vec::new();
        let mut started = None;
        for (at, op) in self.ops() {
            match op {
                Op::ResetAssert => started = Some(at),
                Op::ResetRelease => {
                    if let Some(start) = started.take() {
                        lengths.push(at - start);
                    }
                }
                _ => {}
            }
        }
        lengths
    }

    pub fn assert_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|(_, op)| *op == Op::ResetAssert)
            .count()
    }
}

pub struct MockPin {
    pub name: &'static str,
    pub high: Option<bool>,
    recorder: Recorder,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = Some(false);
        self.recorder.push(Op::Pin {
            name: self.name,
            high: false,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = Some(true);
        self.recorder.push(Op::Pin {
            name: self.name,
            high: true,
        });
        Ok(())
    }
}

pub struct MockResetLine {
    pub driving: bool,
    recorder: Recorder,
}

impl ResetLine for MockResetLine {
    fn assert(&mut self) {
        self.driving = true;
        self.recorder.push(Op::ResetAssert);
    }

    fn release(&mut self) {
        self.driving = false;
        self.recorder.push(Op::ResetRelease);
    }
}

pub struct MockDelay {
    recorder: Recorder,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.recorder.inner.borrow_mut().now_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.recorder.push(Op::Delay { ms: u64::from(ms) });
        self.recorder.inner.borrow_mut().now_ns += u64::from(ms) * 1_000_000;
    }
}
