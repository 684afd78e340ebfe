//! Blink scheduling for the indicator LEDs
//!
//! A single shared phase flips every [`BLINK_INTERVAL_MS`] while any
//! indicator is active. Timing is measured against the clock rather than by
//! counting ticks, so a late or early tick does not stretch the blink.

use crate::config::BLINK_INTERVAL_MS;
use crate::indicator::IndicatorMode;
use crate::io::Side;

/// On/off command for both LED channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelDrive {
    pub left: bool,
    pub right: bool,
}

impl ChannelDrive {
    pub const OFF: Self = Self {
        left: false,
        right: false,
    };

    pub fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Current blink phase and when it last flipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlinkState {
    pub phase: bool,
    pub last_toggle: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BlinkScheduler {
    state: BlinkState,
}

impl BlinkScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    /// Restart the blink cycle at `now` with the given phase.
    ///
    /// Hazard entry restarts lit; entering a turn indicator restarts dark.
    pub fn restart(&mut self, now: u64, phase: bool) {
        self.state = BlinkState {
            phase,
            last_toggle: now,
        };
    }

    /// Advance the phase if due and decide which channels are lit.
    pub fn update(&mut self, mode: IndicatorMode, now: u64) -> ChannelDrive {
        if mode == IndicatorMode::Idle {
            return ChannelDrive::OFF;
        }

        if now.saturating_sub(self.state.last_toggle) >= BLINK_INTERVAL_MS {
            self.state.phase = !self.state.phase;
            self.state.last_toggle = now;
        }

        let phase = self.state.phase;
        match mode {
            IndicatorMode::LeftOn => ChannelDrive {
                left: phase,
                right: false,
            },
            IndicatorMode::RightOn => ChannelDrive {
                left: false,
                right: phase,
            },
            IndicatorMode::Hazard => ChannelDrive {
                left: phase,
                right: phase,
            },
            IndicatorMode::Idle => ChannelDrive::OFF,
        }
    }
}
