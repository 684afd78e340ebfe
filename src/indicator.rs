//! Indicator mode state machine
//!
//! Turns press/hold facts into mode changes among idle, left, right and
//! hazard. Rules are checked in a fixed precedence once per tick and at
//! most one of them fires:
//!
//! 1. both held longer than the hold time -> hazard
//! 2. in hazard, one button held alone longer than the hold time -> idle
//! 3. left held alone longer than the hold time -> toggle/switch left
//! 4. right held alone longer than the hold time -> toggle/switch right
//!
//! A button that has fired a single-button rule is latched until it is
//! released, so a long hold produces exactly one transition without
//! stalling the tick loop.

use core::fmt;

use log::debug;

use crate::config::HOLD_TIME_MS;
use crate::io::Side;
use crate::press::PressFacts;

/// The single persistent indicator state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndicatorMode {
    #[default]
    Idle,
    LeftOn,
    RightOn,
    Hazard,
}

impl IndicatorMode {
    /// The mode a single-button action on `side` moves to from `self`
    fn after_action(self, side: Side) -> Transition {
        match (side, self) {
            (Side::Left, IndicatorMode::RightOn) => Transition::SwitchRightToLeft,
            (Side::Left, IndicatorMode::LeftOn) => Transition::LeftOff,
            (Side::Left, _) => Transition::LeftOn,
            (Side::Right, IndicatorMode::LeftOn) => Transition::SwitchLeftToRight,
            (Side::Right, IndicatorMode::RightOn) => Transition::RightOff,
            (Side::Right, _) => Transition::RightOn,
        }
    }
}

/// A mode change that fired on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    HazardOn,
    HazardOff,
    LeftOn,
    LeftOff,
    RightOn,
    RightOff,
    SwitchRightToLeft,
    SwitchLeftToRight,
}

impl Transition {
    /// Mode the controller is in after this transition
    pub fn target(self) -> IndicatorMode {
        match self {
            Transition::HazardOn => IndicatorMode::Hazard,
            Transition::HazardOff | Transition::LeftOff | Transition::RightOff => {
                IndicatorMode::Idle
            }
            Transition::LeftOn | Transition::SwitchRightToLeft => IndicatorMode::LeftOn,
            Transition::RightOn | Transition::SwitchLeftToRight => IndicatorMode::RightOn,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Transition::HazardOn => "HAZARD MODE ON",
            Transition::HazardOff => "HAZARD MODE OFF",
            Transition::LeftOn => "LEFT ON",
            Transition::LeftOff => "LEFT OFF",
            Transition::RightOn => "RIGHT ON",
            Transition::RightOff => "RIGHT OFF",
            Transition::SwitchRightToLeft => "SWITCH RIGHT TO LEFT",
            Transition::SwitchLeftToRight => "SWITCH LEFT TO RIGHT",
        };
        f.write_str(label)
    }
}

/// Per-button "action consumed, awaiting release" flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ReleaseLatch {
    left: bool,
    right: bool,
}

impl ReleaseLatch {
    fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn set(&mut self, side: Side, latched: bool) {
        match side {
            Side::Left => self.left = latched,
            Side::Right => self.right = latched,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorStateMachine {
    mode: IndicatorMode,
    latch: ReleaseLatch,
}

impl IndicatorStateMachine {
    /// State machine in `Idle` with no button latched
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    /// Whether `side` already fired and is waiting to be let go
    pub fn awaiting_release(&self, side: Side) -> bool {
        self.latch.get(side)
    }

    /// Evaluate the transition rules for one tick.
    pub fn evaluate(&mut self, facts: &PressFacts) -> Option<Transition> {
        for side in [Side::Left, Side::Right] {
            if !facts.button(side).pressed && self.latch.get(side) {
                debug!("{:?} button released, latch cleared", side);
                self.latch.set(side, false);
            }
        }

        let transition = self
            .hazard_entry(facts)
            .or_else(|| self.hazard_exit(facts))
            .or_else(|| self.single_action(Side::Left, facts))
            .or_else(|| self.single_action(Side::Right, facts))?;

        self.mode = transition.target();
        Some(transition)
    }

    fn hazard_entry(&self, facts: &PressFacts) -> Option<Transition> {
        (facts.both_pressed()
            && self.mode != IndicatorMode::Hazard
            && facts.dual_held_ms > HOLD_TIME_MS)
            .then_some(Transition::HazardOn)
    }

    fn hazard_exit(&mut self, facts: &PressFacts) -> Option<Transition> {
        if self.mode != IndicatorMode::Hazard {
            return None;
        }
        let side = facts.only_pressed()?;
        if facts.button(side).held_ms <= HOLD_TIME_MS {
            return None;
        }
        // The exiting button must not go on to toggle its own side
        self.latch.set(side, true);
        Some(Transition::HazardOff)
    }

    fn single_action(&mut self, side: Side, facts: &PressFacts) -> Option<Transition> {
        let button = facts.button(side);
        if !button.pressed
            || facts.button(side.other()).pressed
            || button.held_ms <= HOLD_TIME_MS
            || self.mode == IndicatorMode::Hazard
            || self.latch.get(side)
        {
            return None;
        }
        self.latch.set(side, true);
        Some(self.mode.after_action(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::press::PressTracker;

    /// Feed 100 ms ticks of a fixed button pattern from `start` up to and
    /// including `end`, collecting every transition.
    fn hold(
        sm: &mut IndicatorStateMachine,
        tracker: &mut PressTracker,
        start: u64,
        end: u64,
        left: bool,
        right: bool,
    ) -> Vec<Transition> {
        let mut fired = Vec::new();
        let mut now = start;
        while now <= end {
            let facts = tracker.update(now, left, right);
            fired.extend(sm.evaluate(&facts));
            now += 100;
        }
        fired
    }

    #[test]
    fn test_short_tap_is_ignored() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();

        // 1000 ms is not strictly longer than the hold time
        assert!(hold(&mut sm, &mut tracker, 0, 1000, true, false).is_empty());
        assert!(hold(&mut sm, &mut tracker, 1100, 1500, false, false).is_empty());
        assert_eq!(sm.mode(), IndicatorMode::Idle);
    }

    #[test]
    fn test_long_hold_fires_once() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();

        let fired = hold(&mut sm, &mut tracker, 0, 5000, true, false);
        assert_eq!(fired, vec![Transition::LeftOn]);
        assert_eq!(sm.mode(), IndicatorMode::LeftOn);
        assert!(sm.awaiting_release(Side::Left));

        hold(&mut sm, &mut tracker, 5100, 5100, false, false);
        assert!(!sm.awaiting_release(Side::Left));
    }

    #[test]
    fn test_left_toggle_and_switch() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();

        assert_eq!(
            hold(&mut sm, &mut tracker, 0, 1200, true, false),
            vec![Transition::LeftOn]
        );
        hold(&mut sm, &mut tracker, 1300, 1300, false, false);
        assert_eq!(
            hold(&mut sm, &mut tracker, 1400, 2600, true, false),
            vec![Transition::LeftOff]
        );
        hold(&mut sm, &mut tracker, 2700, 2700, false, false);
        assert_eq!(
            hold(&mut sm, &mut tracker, 2800, 4000, false, true),
            vec![Transition::RightOn]
        );
        hold(&mut sm, &mut tracker, 4100, 4100, false, false);
        assert_eq!(
            hold(&mut sm, &mut tracker, 4200, 5400, true, false),
            vec![Transition::SwitchRightToLeft]
        );
        hold(&mut sm, &mut tracker, 5500, 5500, false, false);
        assert_eq!(
            hold(&mut sm, &mut tracker, 5600, 6800, false, true),
            vec![Transition::SwitchLeftToRight]
        );
        hold(&mut sm, &mut tracker, 6900, 6900, false, false);
        assert_eq!(
            hold(&mut sm, &mut tracker, 7000, 8200, false, true),
            vec![Transition::RightOff]
        );
        assert_eq!(sm.mode(), IndicatorMode::Idle);
    }

    #[test]
    fn test_hazard_entry_from_any_mode() {
        for (prelude_left, prelude_right) in [(false, false), (true, false), (false, true)] {
            let mut sm = IndicatorStateMachine::new();
            let mut tracker = PressTracker::new();
            if prelude_left || prelude_right {
                hold(&mut sm, &mut tracker, 0, 1200, prelude_left, prelude_right);
                hold(&mut sm, &mut tracker, 1300, 1300, false, false);
            }

            let fired = hold(&mut sm, &mut tracker, 2000, 3200, true, true);
            assert_eq!(fired, vec![Transition::HazardOn]);
            assert_eq!(sm.mode(), IndicatorMode::Hazard);
        }
    }

    #[test]
    fn test_dual_hold_never_reads_as_single_action() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();

        // Left first, right joins before left's hold time expires
        hold(&mut sm, &mut tracker, 0, 500, true, false);
        let fired = hold(&mut sm, &mut tracker, 600, 1700, true, true);
        assert_eq!(fired, vec![Transition::HazardOn]);
    }

    #[test]
    fn test_hazard_exit_lands_in_idle() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();
        hold(&mut sm, &mut tracker, 0, 1100, true, true);
        hold(&mut sm, &mut tracker, 1200, 1500, false, false);
        assert_eq!(sm.mode(), IndicatorMode::Hazard);

        // Short hold keeps hazard
        assert!(hold(&mut sm, &mut tracker, 1600, 2600, false, true).is_empty());
        hold(&mut sm, &mut tracker, 2700, 2700, false, false);

        let fired = hold(&mut sm, &mut tracker, 2800, 4000, false, true);
        assert_eq!(fired, vec![Transition::HazardOff]);
        assert_eq!(sm.mode(), IndicatorMode::Idle);
        // Still holding right: no RightOn until it is released and re-held
        assert!(hold(&mut sm, &mut tracker, 4100, 6000, false, true).is_empty());
        assert_eq!(sm.mode(), IndicatorMode::Idle);
    }

    #[test]
    fn test_hazard_exit_keeping_entry_button_down() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();
        hold(&mut sm, &mut tracker, 0, 1100, true, true);
        assert_eq!(sm.mode(), IndicatorMode::Hazard);

        // Right let go; left has been down since 0 ms
        assert_eq!(
            hold(&mut sm, &mut tracker, 1200, 1200, true, false),
            vec![Transition::HazardOff]
        );
        assert_eq!(sm.mode(), IndicatorMode::Idle);
        assert!(sm.awaiting_release(Side::Left));
        assert!(hold(&mut sm, &mut tracker, 1300, 4000, true, false).is_empty());
    }

    #[test]
    fn test_both_held_in_hazard_is_stable() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();
        let fired = hold(&mut sm, &mut tracker, 0, 10_000, true, true);
        assert_eq!(fired, vec![Transition::HazardOn]);
    }

    #[test]
    fn test_latched_button_still_exits_hazard() {
        let mut sm = IndicatorStateMachine::new();
        let mut tracker = PressTracker::new();

        // Left turns LeftOn and stays down, right joins for hazard
        hold(&mut sm, &mut tracker, 0, 1100, true, false);
        assert!(sm.awaiting_release(Side::Left));
        hold(&mut sm, &mut tracker, 1200, 2300, true, true);
        assert_eq!(sm.mode(), IndicatorMode::Hazard);

        let fired = hold(&mut sm, &mut tracker, 2400, 5000, true, false);
        assert_eq!(fired, vec![Transition::HazardOff]);
        assert_eq!(sm.mode(), IndicatorMode::Idle);
    }

    #[test]
    fn test_transition_targets_and_labels() {
        assert_eq!(Transition::HazardOn.target(), IndicatorMode::Hazard);
        assert_eq!(Transition::HazardOff.target(), IndicatorMode::Idle);
        assert_eq!(Transition::SwitchRightToLeft.target(), IndicatorMode::LeftOn);
        assert_eq!(Transition::SwitchLeftToRight.target(), IndicatorMode::RightOn);
        assert_eq!(Transition::HazardOn.to_string(), "HAZARD MODE ON");
        assert_eq!(Transition::SwitchLeftToRight.to_string(), "SWITCH LEFT TO RIGHT");
    }
}
