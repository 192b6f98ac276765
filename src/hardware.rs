//! Board wiring for the RP2040 timer.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm};

use crate::button::ButtonArray;
use crate::jingles::JUMPER_COUNT;
use crate::melody::Buzzer;
use crate::output_array::OutputArray;
use crate::shared_constants::{CELL_COUNT, SEGMENT_COUNT};
use crate::status_led::{Pio0Irqs, Ws2812};

/// Every peripheral the firmware drives, claimed once at startup.
pub struct Hardware {
    /// Digit commons, active low, left to right.
    pub cells: OutputArray<Output<'static>, CELL_COUNT>,
    /// Segments a to g, then the decimal point, active high.
    pub segments: OutputArray<Output<'static>, SEGMENT_COUNT>,
    /// Up, down, confirm, reset; pulled up, pressed is low.
    pub buttons: ButtonArray<Input<'static>>,
    /// JP1, JP2, JP3; pulled down, a fitted jumper reads high.
    pub jumpers: [Input<'static>; JUMPER_COUNT],
    pub buzzer: Buzzer<'static>,
    pub ws2812: Ws2812,
}

impl Hardware {
    /// Which jumpers are fitted, JP1 first.
    #[must_use]
    pub fn jumpers_set(&self) -> [bool; JUMPER_COUNT] {
        self.jumpers.each_ref().map(Input::is_high)
    }
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let segments = OutputArray::new([
            Output::new(peripherals.PIN_2, Level::Low),
            Output::new(peripherals.PIN_3, Level::Low),
            Output::new(peripherals.PIN_4, Level::Low),
            Output::new(peripherals.PIN_5, Level::Low),
            Output::new(peripherals.PIN_6, Level::Low),
            Output::new(peripherals.PIN_7, Level::Low),
            Output::new(peripherals.PIN_8, Level::Low),
            Output::new(peripherals.PIN_9, Level::Low),
        ]);

        let cells = OutputArray::new([
            Output::new(peripherals.PIN_10, Level::High),
            Output::new(peripherals.PIN_11, Level::High),
            Output::new(peripherals.PIN_12, Level::High),
            Output::new(peripherals.PIN_13, Level::High),
        ]);

        let buttons = ButtonArray::new([
            Input::new(peripherals.PIN_15, Pull::Up),
            Input::new(peripherals.PIN_16, Pull::Up),
            Input::new(peripherals.PIN_14, Pull::Up),
            Input::new(peripherals.PIN_23, Pull::Up),
        ]);

        let jumpers = [
            Input::new(peripherals.PIN_20, Pull::Down),
            Input::new(peripherals.PIN_19, Pull::Down),
            Input::new(peripherals.PIN_18, Pull::Down),
        ];

        let buzzer = Buzzer::new(Pwm::new_output_a(
            peripherals.PWM_SLICE0,
            peripherals.PIN_0,
            pwm::Config::default(),
        ));

        let Pio {
            mut common, sm0, ..
        } = Pio::new(peripherals.PIO0, Pio0Irqs);
        let program = PioWs2812Program::new(&mut common);
        let ws2812 = PioWs2812::new(
            &mut common,
            sm0,
            peripherals.DMA_CH0,
            peripherals.PIN_1,
            &program,
        );

        Self {
            cells,
            segments,
            buttons,
            jumpers,
            buzzer,
            ws2812,
        }
    }
}
