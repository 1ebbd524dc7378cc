// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Timeout state machine.
//!
//! ```text
//!           silence, count below threshold
//!              ┌─────┐
//!              ▼     │
//!   ───► IdleCounting ──── silence, count reaches threshold ────► Resetting
//!              ▲  │                                                   │
//!              └──┘ activity, count = 0                               │
//!              ▲                                                      │
//!              └─────────────── pulse done, count = 0 ────────────────┘
//! ```
//!
//! The engine itself is pure: it decides, the control loop acts. Activity is
//! checked first, so a kick on the tick that would have crossed the threshold
//! suppresses the reset.

/// Engine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// Normal operation, counting consecutive idle ticks.
    IdleCounting { idle_ticks: u32 },
    /// A reset pulse is owed to the host.
    Resetting,
}

/// What a tick observed on the kick input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickEvent {
    Activity,
    Silence,
}

impl From<bool> for TickEvent {
    fn from(activity: bool) -> Self {
        if activity {
            Self::Activity
        } else {
            Self::Silence
        }
    }
}

/// Side effect the control loop must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineAction {
    None,
    ArmActivityIndicator,
    PulseReset,
}

/// Result of one pure transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStep {
    pub next_state: EngineState,
    pub action: EngineAction,
}

/// Idle-tick counter with threshold detection.
#[derive(Debug, Clone)]
pub struct TimeoutEngine {
    threshold_ticks: u32,
    state: EngineState,
}

impl TimeoutEngine {
    /// A zero threshold is treated as one tick.
    pub const fn new(threshold_ticks: u32) -> Self {
        Self {
            threshold_ticks: if threshold_ticks == 0 { 1 } else { threshold_ticks },
            state: EngineState::IdleCounting { idle_ticks: 0 },
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn threshold_ticks(&self) -> u32 {
        self.threshold_ticks
    }

    /// Current idle count. While a pulse is owed the count sits at the threshold.
    pub fn idle_ticks(&self) -> u32 {
        match self.state {
            EngineState::IdleCounting { idle_ticks } => idle_ticks,
            EngineState::Resetting => self.threshold_ticks,
        }
    }

    /// Compute the next state without touching `self`.
    pub fn transition(&self, state: EngineState, event: TickEvent) -> EngineStep {
        match (state, event) {
            (EngineState::IdleCounting { .. }, TickEvent::Activity) => EngineStep {
                next_state: EngineState::IdleCounting { idle_ticks: 0 },
                action: EngineAction::ArmActivityIndicator,
            },
            (EngineState::IdleCounting { idle_ticks }, TickEvent::Silence) => {
                let idle_ticks = idle_ticks.saturating_add(1);
                if idle_ticks >= self.threshold_ticks {
                    EngineStep {
                        next_state: EngineState::Resetting,
                        action: EngineAction::PulseReset,
                    }
                } else {
                    EngineStep {
                        next_state: EngineState::IdleCounting { idle_ticks },
                        action: EngineAction::None,
                    }
                }
            }
            // The owed pulse has not been confirmed yet; ask for it again.
            (EngineState::Resetting, _) => EngineStep {
                next_state: EngineState::Resetting,
                action: EngineAction::PulseReset,
            },
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, event: TickEvent) -> EngineAction {
        let step = self.transition(self.state, event);
        self.state = step.next_state;
        step.action
    }

    /// Acknowledge a finished reset pulse and restart counting from zero.
    pub fn complete_reset(&mut self) {
        if self.state == EngineState::Resetting {
            self.state = EngineState::IdleCounting { idle_ticks: 0 };
        }
    }
}
