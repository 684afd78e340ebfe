//! Indicator button input
//!
//! Both buttons are momentary switches to ground, read with the internal
//! pull-up enabled (active low). Levels are sampled once per control tick;
//! the hold-time rule in the state machine does the debouncing, so there is
//! no edge filtering here and no blocking wait for release.

use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};

pub struct Button<'d, P>
where
    P: InputPin,
{
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P> Button<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Wrap an input pin, enabling its pull-up
    pub fn new(mut pin: PinDriver<'d, P, Input>) -> anyhow::Result<Self> {
        pin.set_pull(Pull::Up)?;

        Ok(Self { pin })
    }

    /// Check if button is currently pressed
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
