//! turnsignal - two-button turn-signal and hazard-light controller
//!
//! On the ESP32 this samples the buttons every tick and blinks the LEDs.
//! Built for the host it replays a scripted button sequence through the
//! same controller and prints every tick.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::PinDriver;
    use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::FromValueType;
    use esp_idf_svc::log::EspLogger;
    use log::{info, warn};

    use turnsignal::board::Board;
    use turnsignal::button::Button;
    use turnsignal::config::{
        LEFT_BUTTON_GPIO, LEFT_LED_GPIO, PWM_FREQUENCY_HZ, RIGHT_BUTTON_GPIO, RIGHT_LED_GPIO,
        TICK_PERIOD_MS,
    };
    use turnsignal::Controller;

    // Initialize ESP-IDF
    esp_idf_sys::link_patches();
    EspLogger::initialize_default();

    info!("turnsignal v{} starting", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let left_button = Button::new(PinDriver::input(pins.gpio4)?)?;
    let right_button = Button::new(PinDriver::input(pins.gpio18)?)?;
    info!(
        "Buttons on GPIO{} (left) and GPIO{} (right)",
        LEFT_BUTTON_GPIO, RIGHT_BUTTON_GPIO
    );

    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(PWM_FREQUENCY_HZ.Hz())
            .resolution(Resolution::Bits8),
    )?;
    let left_led = LedcDriver::new(peripherals.ledc.channel0, &timer, pins.gpio2)?;
    let right_led = LedcDriver::new(peripherals.ledc.channel1, &timer, pins.gpio5)?;
    info!(
        "LEDs on GPIO{} (left) and GPIO{} (right), {} Hz PWM",
        LEFT_LED_GPIO, RIGHT_LED_GPIO, PWM_FREQUENCY_HZ
    );

    let mut board = Board::new(left_button, right_button, left_led, right_led)?;
    let mut controller = Controller::new();

    info!("Entering control loop ({}ms tick)", TICK_PERIOD_MS);

    loop {
        if let Err(e) = controller.step(&mut board) {
            warn!("LED update failed: {}", e);
        }

        FreeRtos::delay_ms(TICK_PERIOD_MS);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    for (tick, left, right) in dry_run::replay(dry_run::SCRIPT)? {
        println!(
            "{:>6}ms  [{}|{}]  {} {}  {:?}{}",
            tick.now,
            if left { 'L' } else { ' ' },
            if right { 'R' } else { ' ' },
            if tick.drive.left { '*' } else { '.' },
            if tick.drive.right { '*' } else { '.' },
            tick.mode,
            tick.transition
                .map(|t| format!("  >> {}", t))
                .unwrap_or_default(),
        );
    }

    Ok(())
}

#[cfg(not(target_os = "espidf"))]
mod dry_run {
    use turnsignal::config::TICK_PERIOD_MS;
    use turnsignal::io::Clock;
    use turnsignal::sim::SimPanel;
    use turnsignal::{Controller, Side, Tick};

    /// (duration ms, left pressed, right pressed)
    pub const SCRIPT: &[(u64, bool, bool)] = &[
        (500, false, false),
        (1200, true, false),  // left on
        (1500, false, false),
        (1200, false, true),  // switch left to right
        (1500, false, false),
        (1300, true, true),   // hazard on
        (1500, false, false),
        (1200, true, false),  // hazard off
        (500, false, false),
    ];

    /// Step a fresh controller through `script` on a simulated panel,
    /// returning every tick with the button levels that produced it.
    pub fn replay(script: &[(u64, bool, bool)]) -> anyhow::Result<Vec<(Tick, bool, bool)>> {
        let mut controller = Controller::new();
        let mut panel = SimPanel::new();
        let mut ticks = Vec::new();

        for &(duration, left, right) in script {
            panel.press(Side::Left, left);
            panel.press(Side::Right, right);

            let end = panel.now_ms() + duration;
            while panel.now_ms() < end {
                ticks.push((controller.step(&mut panel)?, left, right));
                panel.advance(TICK_PERIOD_MS as u64);
            }
        }

        Ok(ticks)
    }

}
