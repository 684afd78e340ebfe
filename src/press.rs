//! Press tracking for the two indicator buttons
//!
//! Keeps the previous-tick level of each button so press edges can be
//! detected, and remembers when the current single press and the current
//! simultaneous press began. Everything else (what a long hold *means*) is
//! left to the indicator state machine.

use crate::io::Side;

/// Edge-detection state for one button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressRecord {
    pressed_prev: bool,
    press_start: u64,
}

impl PressRecord {
    /// Feed this tick's level. Returns `true` on a released -> pressed edge.
    fn update(&mut self, pressed: bool, now: u64) -> bool {
        let edge = pressed && !self.pressed_prev;
        if edge {
            self.press_start = now;
        }
        self.pressed_prev = pressed;
        edge
    }
}

/// When both buttons most recently became held together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DualPressRecord {
    both_press_start: u64,
}

/// What the tracker knows about one button at the current tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonFacts {
    pub pressed: bool,
    /// Set only on the tick the press began
    pub press_edge: bool,
    /// Set only on the tick the button was let go
    pub release_edge: bool,
    /// `now - press_start` while pressed, 0 otherwise
    pub held_ms: u64,
}

/// Snapshot handed to the state machine once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressFacts {
    pub now: u64,
    pub left: ButtonFacts,
    pub right: ButtonFacts,
    /// `now - both_press_start` while both are pressed, 0 otherwise
    pub dual_held_ms: u64,
}

impl PressFacts {
    /// Facts for the button on `side`
    pub fn button(&self, side: Side) -> &ButtonFacts {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Whether both buttons are down this tick
    pub fn both_pressed(&self) -> bool {
        self.left.pressed && self.right.pressed
    }

    /// The single pressed button, if exactly one is down
    pub fn only_pressed(&self) -> Option<Side> {
        match (self.left.pressed, self.right.pressed) {
            (true, false) => Some(Side::Left),
            (false, true) => Some(Side::Right),
            _ => None,
        }
    }
}

/// Per-button and dual-press bookkeeping, mutated once per tick
#[derive(Debug, Clone, Default)]
pub struct PressTracker {
    left: PressRecord,
    right: PressRecord,
    dual: DualPressRecord,
}

impl PressTracker {
    /// Tracker with both buttons released
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this tick's button levels and report hold durations.
    pub fn update(&mut self, now: u64, left: bool, right: bool) -> PressFacts {
        // A new simultaneous press starts when both are down and at least
        // one of them was up on the previous tick.
        let both_edge = left && right && (!self.left.pressed_prev || !self.right.pressed_prev);

        let left_released = self.left.pressed_prev && !left;
        let right_released = self.right.pressed_prev && !right;
        let left_edge = self.left.update(left, now);
        let right_edge = self.right.update(right, now);

        if both_edge {
            self.dual.both_press_start = now;
        }

        PressFacts {
            now,
            left: facts(&self.left, left, left_edge, left_released, now),
            right: facts(&self.right, right, right_edge, right_released, now),
            dual_held_ms: if left && right {
                now.saturating_sub(self.dual.both_press_start)
            } else {
                0
            },
        }
    }
}

fn facts(
    record: &PressRecord,
    pressed: bool,
    press_edge: bool,
    release_edge: bool,
    now: u64,
) -> ButtonFacts {
    ButtonFacts {
        pressed,
        press_edge,
        release_edge,
        held_ms: if pressed {
            now.saturating_sub(record.press_start)
        } else {
            0
        },
    }
}
