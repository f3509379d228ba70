//! Ring ejection chain
//!
//! When sorting is enabled and a ring comes within range of the sort
//! sensor, two chained timers take over the upper intake:
//!
//! 1. Stage 1 (170 ms): the override is asserted and the upper intake keeps
//!    its last command while the ring travels up.
//! 2. Stage 2 (400 ms): the upper intake is driven at the eject velocity.
//!
//! When stage 2 completes both timers are reset and paused and the override
//! is released. The chain only re-arms from that idle state.

use crate::parameters::EjectionParams;
use crate::timer::Timer;

use super::session::SessionState;

/// Chain stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EjectionState {
    Idle,
    Stage1Active,
    Stage2Active,
}

/// Two-stage ejection timer chain
#[derive(Debug, Clone, Copy)]
pub struct EjectionChain {
    params: EjectionParams,
    stage1: Timer,
    stage2: Timer,
}

impl EjectionChain {
    pub fn new(params: EjectionParams) -> Self {
        Self {
            params,
            stage1: Timer::paused(params.stage1_ms),
            stage2: Timer::paused(params.stage2_ms),
        }
    }

    pub fn state(&self) -> EjectionState {
        if self.stage1.is_paused() {
            EjectionState::Idle
        } else if self.stage2.is_paused() {
            EjectionState::Stage1Active
        } else {
            EjectionState::Stage2Active
        }
    }

    /// Advance the chain by one tick.
    ///
    /// Returns an upper-intake velocity on the tick stage 2 starts.
    pub fn update(
        &mut self,
        sort_distance_in: f32,
        now_ms: u64,
        session: &mut SessionState,
    ) -> Option<i16> {
        let mut command = None;

        if sort_distance_in < self.params.trigger_distance_in
            && self.stage1.is_paused()
            && !self.stage1.is_done(now_ms)
            && session.sort_enabled
        {
            self.stage1.resume(now_ms);
        }

        if !self.stage1.is_paused() && !self.stage1.is_done(now_ms) {
            session.upper_intake_override = true;
        } else if self.stage1.is_done(now_ms)
            && self.stage2.is_paused()
            && !self.stage2.is_done(now_ms)
        {
            self.stage2.resume(now_ms);
            command = Some(self.params.eject_velocity);
        }

        if self.stage2.is_done(now_ms) && !self.stage1.is_paused() && !self.stage2.is_paused() {
            session.upper_intake_override = false;
            self.stage1.reset(now_ms);
            self.stage1.pause(now_ms);
            self.stage2.reset(now_ms);
            self.stage2.pause(now_ms);
        }

        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockTime, TimeSource};

    const NEAR: f32 = 2.0;
    const FAR: f32 = 30.0;

    fn chain() -> (EjectionChain, SessionState) {
        let mut session = SessionState::new();
        session.sort_enabled = true;
        (EjectionChain::new(EjectionParams::default()), session)
    }

    /// Run one full cycle starting at `time`, returning the commands seen.
    fn run_cycle(
        chain: &mut EjectionChain,
        session: &mut SessionState,
        time: &MockTime,
    ) -> heapless::Vec<Option<i16>, 4> {
        let mut seen = heapless::Vec::new();
        seen.push(chain.update(NEAR, time.now_ms(), session)).unwrap();
        time.advance(170);
        seen.push(chain.update(FAR, time.now_ms(), session)).unwrap();
        time.advance(400);
        seen.push(chain.update(FAR, time.now_ms(), session)).unwrap();
        seen
    }

    #[test]
    fn test_full_cycle() {
        let (mut chain, mut session) = chain();
        let time = MockTime::new();

        assert_eq!(chain.update(NEAR, time.now_ms(), &mut session), None);
        assert_eq!(chain.state(), EjectionState::Stage1Active);
        assert!(session.upper_intake_override);

        time.advance(169);
        assert_eq!(chain.update(FAR, time.now_ms(), &mut session), None);
        assert!(session.upper_intake_override);

        time.advance(1);
        assert_eq!(chain.update(FAR, time.now_ms(), &mut session), Some(200));
        assert_eq!(chain.state(), EjectionState::Stage2Active);
        assert!(session.upper_intake_override);

        time.advance(399);
        assert_eq!(chain.update(FAR, time.now_ms(), &mut session), None);
        assert!(session.upper_intake_override);

        time.advance(1);
        assert_eq!(chain.update(FAR, time.now_ms(), &mut session), None);
        assert_eq!(chain.state(), EjectionState::Idle);
        assert!(!session.upper_intake_override);
    }

    #[test]
    fn test_cycle_is_repeatable() {
        let (mut chain, mut session) = chain();
        let time = MockTime::new();

        let first = run_cycle(&mut chain, &mut session, &time);
        time.advance(50);
        let second = run_cycle(&mut chain, &mut session, &time);

        assert_eq!(first, second);
        assert_eq!(first.as_slice(), &[None, Some(200), None]);
        assert_eq!(chain.state(), EjectionState::Idle);
    }

    #[test]
    fn test_not_reentrant_while_active() {
        let (mut chain, mut session) = chain();

        chain.update(NEAR, 0, &mut session);
        // Ring still in range during stage 1
        chain.update(NEAR, 100, &mut session);
        assert_eq!(chain.update(NEAR, 170, &mut session), Some(200));
        // And during stage 2: no second resume, no second command
        assert_eq!(chain.update(NEAR, 300, &mut session), None);
        assert_eq!(chain.state(), EjectionState::Stage2Active);
        // Stage 2 still ends 400 ms after it started
        chain.update(NEAR, 570, &mut session);
        assert_eq!(chain.state(), EjectionState::Idle);
    }

    #[test]
    fn test_sort_disabled_never_arms() {
        let (mut chain, mut session) = chain();
        session.sort_enabled = false;

        assert_eq!(chain.update(NEAR, 0, &mut session), None);
        assert_eq!(chain.state(), EjectionState::Idle);
        assert!(!session.upper_intake_override);
    }

    #[test]
    fn test_threshold_is_strict() {
        let (mut chain, mut session) = chain();
        chain.update(5.0, 0, &mut session);
        assert_eq!(chain.state(), EjectionState::Idle);
        chain.update(4.99, 10, &mut session);
        assert_eq!(chain.state(), EjectionState::Stage1Active);
    }

    #[test]
    fn test_disabling_sort_mid_cycle_finishes_cycle() {
        let (mut chain, mut session) = chain();
        chain.update(NEAR, 0, &mut session);
        session.sort_enabled = false;
        assert_eq!(chain.update(FAR, 170, &mut session), Some(200));
        chain.update(FAR, 570, &mut session);
        assert_eq!(chain.state(), EjectionState::Idle);
        assert!(!session.upper_intake_override);
    }
}
