//! Collaborator seams between the controller and the board
//!
//! The controller only ever sees two pressed/released levels, a monotonic
//! millisecond clock, and two on/off channel commands. Pin configuration,
//! pull resistors and PWM duty handling live behind these traits.

/// One of the two buttons, and the LED channel on the same side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The button/channel on the other side
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Source of button levels
pub trait Inputs {
    /// `true` while the button on `side` is held down
    fn read_button(&self, side: Side) -> bool;
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Sink for LED channel commands
///
/// The controller only requests fully on or fully off; how that maps to a
/// duty cycle is up to the implementation.
pub trait Outputs {
    fn set_channel(&mut self, side: Side, on: bool) -> anyhow::Result<()>;
}
