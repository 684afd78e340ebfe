//! In-memory panel for host runs and tests
//!
//! Stands in for both buttons, both LED channels and the clock. Buttons are
//! set by hand, the clock only moves when told to, and every channel write
//! is recorded for inspection.

use crate::io::{Clock, Inputs, Outputs, Side};

#[derive(Debug, Default)]
pub struct SimPanel {
    now_ms: u64,
    left_pressed: bool,
    right_pressed: bool,
    left_lit: bool,
    right_lit: bool,
    writes: usize,
}

impl SimPanel {
    /// Panel with both buttons up, both LEDs dark and the clock at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold down or let go of the button on `side`
    pub fn press(&mut self, side: Side, pressed: bool) {
        match side {
            Side::Left => self.left_pressed = pressed,
            Side::Right => self.right_pressed = pressed,
        }
    }

    /// Move the clock forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Last level written to the channel on `side`
    pub fn lit(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_lit,
            Side::Right => self.right_lit,
        }
    }

    /// Number of `set_channel` calls seen so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Inputs for SimPanel {
    fn read_button(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_pressed,
            Side::Right => self.right_pressed,
        }
    }
}

impl Clock for SimPanel {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl Outputs for SimPanel {
    fn set_channel(&mut self, side: Side, on: bool) -> anyhow::Result<()> {
        match side {
            Side::Left => self.left_lit = on,
            Side::Right => self.right_lit = on,
        }
        self.writes += 1;
        Ok(())
    }
}
