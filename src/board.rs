//! ESP32 indicator panel: two buttons, two LEDC channels, one clock
//!
//! LEDs are driven through LEDC PWM channels so brightness could be
//! trimmed later; the controller only asks for fully on (maximum duty) or
//! fully off (zero duty).

use esp_idf_hal::gpio::{InputPin, OutputPin};
use esp_idf_hal::ledc::LedcDriver;

use crate::button::Button;
use crate::io::{Clock, Inputs, Outputs, Side};

pub struct Board<'d, L, R>
where
    L: InputPin,
    R: InputPin,
{
    left_button: Button<'d, L>,
    right_button: Button<'d, R>,
    left_led: LedcDriver<'d>,
    right_led: LedcDriver<'d>,
}

impl<'d, L, R> Board<'d, L, R>
where
    L: InputPin + OutputPin,
    R: InputPin + OutputPin,
{
    /// Take ownership of the panel hardware and switch both LEDs off
    pub fn new(
        left_button: Button<'d, L>,
        right_button: Button<'d, R>,
        left_led: LedcDriver<'d>,
        right_led: LedcDriver<'d>,
    ) -> anyhow::Result<Self> {
        let mut board = Self {
            left_button,
            right_button,
            left_led,
            right_led,
        };
        board.set_channel(Side::Left, false)?;
        board.set_channel(Side::Right, false)?;
        Ok(board)
    }
}

impl<'d, L, R> Inputs for Board<'d, L, R>
where
    L: InputPin + OutputPin,
    R: InputPin + OutputPin,
{
    fn read_button(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_button.is_pressed(),
            Side::Right => self.right_button.is_pressed(),
        }
    }
}

impl<'d, L, R> Clock for Board<'d, L, R>
where
    L: InputPin,
    R: InputPin,
{
    fn now_ms(&self) -> u64 {
        millis()
    }
}

impl<'d, L, R> Outputs for Board<'d, L, R>
where
    L: InputPin,
    R: InputPin,
{
    fn set_channel(&mut self, side: Side, on: bool) -> anyhow::Result<()> {
        let led = match side {
            Side::Left => &mut self.left_led,
            Side::Right => &mut self.right_led,
        };
        let duty = if on { led.get_max_duty() } else { 0 };
        led.set_duty(duty)?;
        Ok(())
    }
}

/// Milliseconds since boot
fn millis() -> u64 {
    unsafe { esp_idf_sys::esp_timer_get_time() as u64 / 1000 }
}
