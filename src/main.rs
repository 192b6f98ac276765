//! A Pomodoro timer on a 4-digit 7-segment display, with a buzzer and a status LED.
//!
//! Runs on a Raspberry Pi Pico RP2040. The display refresh runs on a
//! high-priority interrupt executor; the control loop, melodies, and LED run on
//! the thread executor.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use core::convert::Infallible;

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::{Instant, Ticker};
use panic_probe as _;
use pomodoro_kit::melody::{Jukebox, JukeboxNotifier};
use pomodoro_kit::status_led::{StatusLed, StatusLedNotifier};
use pomodoro_kit::{
    CELL_COUNT, DEBOUNCE_WINDOW, Debouncer, DisplayBuffer, Hardware, JingleSet, Multiplexer,
    POLL_INTERVAL, Pomodoro, Result, Settings,
};

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
#[expect(unsafe_code, reason = "Executor entry point for the refresh interrupt")]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for EXECUTOR_HIGH, started in `inner_main`.
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let Err(err) = inner_main(spawner).await;
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    static DISPLAY: DisplayBuffer<CELL_COUNT> = DisplayBuffer::new();
    static JUKEBOX_NOTIFIER: JukeboxNotifier = Jukebox::notifier();
    static STATUS_LED_NOTIFIER: StatusLedNotifier = StatusLed::notifier();

    info!("Pomodoro timer starting");
    let hardware = Hardware::default();
    let jingle_set = JingleSet::select(hardware.jumpers_set());
    let Hardware {
        cells,
        segments,
        mut buttons,
        buzzer,
        ws2812,
        ..
    } = hardware;

    interrupt::SWI_IRQ_1.set_priority(Priority::P1);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);
    Multiplexer::new(&DISPLAY, cells, segments).spawn(high_spawner)?;

    let jukebox = Jukebox::new(buzzer, jingle_set.parse()?, &JUKEBOX_NOTIFIER, spawner)?;
    let status_led = StatusLed::new(ws2812, &STATUS_LED_NOTIFIER, spawner)?;

    let mut debouncer: Debouncer = Debouncer::new(DEBOUNCE_WINDOW);
    let mut pomodoro = Pomodoro::new(Settings::default());
    let mut ticker = Ticker::every(POLL_INTERVAL);
    loop {
        let now = Instant::now();
        let events = debouncer.poll(now, buttons.pressed());
        let effects = pomodoro.step(now, events, &DISPLAY);
        if let Some(color) = effects.led {
            status_led.set(color);
        }
        if let Some(command) = effects.melody {
            jukebox.send(command);
        }
        ticker.next().await;
    }
}
