//! Lift macros
//!
//! Two mutually exclusive macros drive the lift to a fixed position:
//! Raise (redirect extended, lift up) and Lower (redirect retracted, lift
//! down). A macro is armed on a button's rising edge only while no macro is
//! active, and ends when the lift reaches its target or the safety timer
//! started at arming expires.
//!
//! Lower is checked before Raise, so pressing both on the same tick arms
//! Lower. While a macro runs it holds the redirect in its position.

use crate::parameters::LiftMacroParams;
use crate::timer::Timer;

use super::session::SessionState;

/// Active macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MacroState {
    #[default]
    Idle,
    Raising,
    Lowering,
}

/// Lift command produced by an active macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftCommand {
    Velocity(i16),
    Brake,
}

/// Raise/Lower macro state machine
#[derive(Debug, Clone, Copy)]
pub struct LiftMacroSequencer {
    params: LiftMacroParams,
    state: MacroState,
    safety: Timer,
    finished: u8,
}

impl LiftMacroSequencer {
    pub fn new(params: LiftMacroParams) -> Self {
        Self {
            params,
            state: MacroState::Idle,
            safety: Timer::paused(params.safety_timeout_ms),
            finished: 0,
        }
    }

    pub fn state(&self) -> MacroState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != MacroState::Idle
    }

    /// Advance the macros by one tick.
    ///
    /// `raise_pressed` and `lower_pressed` are rising edges. Returns the
    /// lift command while a macro is active (including the final brake),
    /// `None` when the lift is left to manual control.
    ///
    /// Lower is armed and run to the end of its tick before Raise is
    /// considered, so a Raise press on the tick Lower finishes still arms.
    /// The active macro re-asserts the redirect every tick.
    pub fn update(
        &mut self,
        raise_pressed: bool,
        lower_pressed: bool,
        position: f32,
        now_ms: u64,
        session: &mut SessionState,
    ) -> Option<LiftCommand> {
        self.finished = 0;
        let mut command = None;

        if lower_pressed && self.state == MacroState::Idle {
            self.arm(MacroState::Lowering, now_ms, session);
        }
        if self.state == MacroState::Lowering {
            session.redirect_extended = false;
            let running = position > self.params.lower_target && !self.safety.is_done(now_ms);
            command = Some(if running {
                LiftCommand::Velocity(self.params.lower_velocity)
            } else {
                self.finish(session)
            });
        }

        if raise_pressed && self.state == MacroState::Idle {
            self.arm(MacroState::Raising, now_ms, session);
        }
        if self.state == MacroState::Raising {
            session.redirect_extended = true;
            let running = position < self.params.raise_target && !self.safety.is_done(now_ms);
            command = Some(if running {
                LiftCommand::Velocity(self.params.raise_velocity)
            } else {
                self.finish(session)
            });
        }

        command
    }

    /// Macros that ended during the last [`update`](Self::update)
    pub fn finished(&self) -> u8 {
        self.finished
    }

    fn arm(&mut self, state: MacroState, now_ms: u64, session: &mut SessionState) {
        self.state = state;
        self.safety = Timer::started(self.params.safety_timeout_ms, now_ms);
        session.lift_manual_disabled = true;
    }

    fn finish(&mut self, session: &mut SessionState) -> LiftCommand {
        self.state = MacroState::Idle;
        self.safety = Timer::paused(self.params.safety_timeout_ms);
        session.lift_manual_disabled = false;
        self.finished += 1;
        LiftCommand::Brake
    }
}
