//! The indicator controller: one owned object evaluated once per tick
//!
//! Per tick: sample both buttons, update the press tracker, evaluate the
//! mode transitions, evaluate the blink, and drive both LED channels.
//! Nothing in here blocks; a held button is handled by the state machine's
//! release latch, so blinking and hazard detection stay live while a
//! button is down.

use log::{debug, info};

use crate::blink::{BlinkScheduler, BlinkState, ChannelDrive};
use crate::indicator::{IndicatorMode, IndicatorStateMachine, Transition};
use crate::io::{Clock, Inputs, Outputs, Side};
use crate::press::PressTracker;

/// Result of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub now: u64,
    pub mode: IndicatorMode,
    pub drive: ChannelDrive,
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    tracker: PressTracker,
    machine: IndicatorStateMachine,
    blink: BlinkScheduler,
}

impl Controller {
    /// Controller in `Idle` with both channels dark
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> IndicatorMode {
        self.machine.mode()
    }

    pub fn blink_state(&self) -> BlinkState {
        self.blink.state()
    }

    /// Evaluate one tick from already-sampled button levels.
    pub fn tick(&mut self, now: u64, left_pressed: bool, right_pressed: bool) -> Tick {
        let facts = self.tracker.update(now, left_pressed, right_pressed);
        for side in [Side::Left, Side::Right] {
            let button = facts.button(side);
            if button.press_edge {
                debug!("{:?} button pressed at {}ms", side, now);
            } else if button.release_edge {
                debug!("{:?} button released at {}ms", side, now);
            }
        }

        let transition = self.machine.evaluate(&facts);
        let drive = match transition {
            // Leaving hazard goes dark immediately, whatever the blink phase
            Some(Transition::HazardOff) => ChannelDrive::OFF,
            Some(Transition::HazardOn) => {
                self.blink.restart(now, true);
                self.blink.update(self.machine.mode(), now)
            }
            Some(t) if t.target() != IndicatorMode::Idle => {
                self.blink.restart(now, false);
                self.blink.update(self.machine.mode(), now)
            }
            _ => self.blink.update(self.machine.mode(), now),
        };

        Tick {
            now,
            mode: self.machine.mode(),
            drive,
            transition,
        }
    }

    /// Sample the collaborators, evaluate one tick and drive both channels.
    pub fn step<P>(&mut self, panel: &mut P) -> anyhow::Result<Tick>
    where
        P: Inputs + Clock + Outputs,
    {
        let left = panel.read_button(Side::Left);
        let right = panel.read_button(Side::Right);
        let now = panel.now_ms();

        let tick = self.tick(now, left, right);
        if let Some(transition) = tick.transition {
            info!(">> {}", transition);
        }

        panel.set_channel(Side::Left, tick.drive.left)?;
        panel.set_channel(Side::Right, tick.drive.right)?;

        Ok(tick)
    }
}
