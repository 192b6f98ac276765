//! The single WS2812 status pixel and the colors of each phase.

use smart_leds::{RGB8, brightness};

/// RGB color representation re-exported from `smart_leds`.
pub type Rgb = RGB8;

/// Power-up and configuration.
pub const INTRO_COLOR: Rgb = Rgb::new(35, 91, 121);
/// A work session is running.
pub const WORK_COLOR: Rgb = Rgb::new(255, 0, 0);
/// A rest session is running.
pub const REST_COLOR: Rgb = Rgb::new(0, 255, 0);
/// The last minute of either session.
pub const LAST_MINUTE_COLOR: Rgb = Rgb::new(255, 255, 0);

/// Scale applied to every channel, in `smart_leds` units (`(value + 1) / 256`), about 30 %.
pub const BRIGHTNESS: u8 = 76;

/// `color` dimmed to [`BRIGHTNESS`].
#[must_use]
pub fn dimmed(color: Rgb) -> Rgb {
    brightness(core::iter::once(color), BRIGHTNESS)
        .next()
        .unwrap_or_default()
}

#[cfg(feature = "pico1")]
mod device {
    use embassy_executor::Spawner;
    use embassy_rp::bind_interrupts;
    use embassy_rp::peripherals::PIO0;
    use embassy_rp::pio::InterruptHandler;
    use embassy_rp::pio_programs::ws2812::PioWs2812;
    use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

    use super::{Rgb, dimmed};
    use crate::Result;

    bind_interrupts!(pub struct Pio0Irqs {
        PIO0_IRQ_0 => InterruptHandler<PIO0>;
    });

    /// One WS2812 pixel on PIO0 state machine 0.
    pub type Ws2812 = PioWs2812<'static, PIO0, 0, 1>;

    /// Signal carrying the next color to the [`StatusLed`] task.
    pub type StatusLedNotifier = Signal<CriticalSectionRawMutex, Rgb>;

    /// Shows a color on the status pixel from a background task.
    pub struct StatusLed<'a>(&'a StatusLedNotifier);

    impl StatusLed<'_> {
        /// Spawns the pixel task.
        ///
        /// # Errors
        ///
        /// Returns an error if the task cannot be spawned.
        #[must_use = "Must be used to manage the spawned task"]
        pub fn new(
            ws2812: Ws2812,
            notifier: &'static StatusLedNotifier,
            spawner: Spawner,
        ) -> Result<Self> {
            let token = device_loop(ws2812, notifier)?;
            spawner.spawn(token);
            Ok(Self(notifier))
        }

        #[must_use]
        pub const fn notifier() -> StatusLedNotifier {
            Signal::new()
        }

        /// Shows `color` at the status brightness.
        pub fn set(&self, color: Rgb) {
            self.0.signal(color);
        }
    }

    #[embassy_executor::task]
    async fn device_loop(mut ws2812: Ws2812, notifier: &'static StatusLedNotifier) -> ! {
        loop {
            let color = notifier.wait().await;
            ws2812.write(&[dimmed(color)]).await;
        }
    }
}

#[cfg(feature = "pico1")]
pub use device::{Pio0Irqs, StatusLed, StatusLedNotifier, Ws2812};
