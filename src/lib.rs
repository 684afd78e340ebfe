//! Turn-signal and hazard-light controller
//!
//! Two momentary buttons and two indicator LEDs:
//! - hold one button for over a second to switch that side's indicator on,
//!   off, or over from the other side
//! - hold both for over a second to enter hazard mode
//! - in hazard, hold either button alone for over a second to switch off
//!
//! The decision logic is target-independent and tested on the host. Only
//! `button` and `board` touch ESP-IDF peripherals.

pub mod blink;
pub mod config;
pub mod controller;
pub mod indicator;
pub mod io;
pub mod press;
pub mod sim;

#[cfg(target_os = "espidf")]
pub mod board;
#[cfg(target_os = "espidf")]
pub mod button;

pub use controller::{Controller, Tick};
pub use indicator::{IndicatorMode, Transition};
pub use io::Side;
