//! Compile-time timing and board configuration
//!
//! Nothing here is runtime-configurable: the controller has no persisted
//! settings and no configuration surface.

/// A press must be held strictly longer than this before it counts.
///
/// This is the only debounce the controller applies: a tap shorter than
/// the hold time never changes the indicator mode.
pub const HOLD_TIME_MS: u64 = 1000;

/// Time between blink phase flips in any non-idle mode
pub const BLINK_INTERVAL_MS: u64 = 300;

/// Period of the control loop
pub const TICK_PERIOD_MS: u32 = 100;

/// Left button input (active low, internal pull-up)
pub const LEFT_BUTTON_GPIO: i32 = 4;
/// Right button input (active low, internal pull-up)
pub const RIGHT_BUTTON_GPIO: i32 = 18;
/// Left indicator LED, LEDC channel 0
pub const LEFT_LED_GPIO: i32 = 2;
/// Right indicator LED, LEDC channel 1
pub const RIGHT_LED_GPIO: i32 = 5;

/// LEDC timer frequency for both LED channels
pub const PWM_FREQUENCY_HZ: u32 = 1000;
