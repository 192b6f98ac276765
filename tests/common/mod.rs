//! Test doubles shared by the host tests.
#![allow(dead_code, reason = "Each test binary uses a different subset")]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embassy_time::Instant;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use pomodoro_kit::Tone;

/// Which fake output a logged write went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinId {
    Cell(usize),
    Segment(usize),
}

/// Every write to a set of fake outputs, in order, as `(pin, high)`.
pub type PinLog = Rc<RefCell<Vec<(PinId, bool)>>>;

/// An output pin whose level the test can read back through a shared handle.
#[derive(Clone, Default)]
pub struct FakeOutput {
    level: Rc<Cell<bool>>,
    log: Option<(PinId, PinLog)>,
}

impl FakeOutput {
    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    fn write(&self, high: bool) {
        self.level.set(high);
        if let Some((id, log)) = &self.log {
            log.borrow_mut().push((*id, high));
        }
    }
}

impl ErrorType for FakeOutput {
    type Error = Infallible;
}

impl OutputPin for FakeOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true);
        Ok(())
    }
}

/// `N` fake outputs plus handles to read them.
pub fn fake_outputs<const N: usize>() -> ([FakeOutput; N], [FakeOutput; N]) {
    let pins: [FakeOutput; N] = std::array::from_fn(|_| FakeOutput::default());
    (pins.clone(), pins)
}

/// Like [`fake_outputs`], but every write is also appended to `log` under `id(index)`.
pub fn logged_outputs<const N: usize>(
    id: fn(usize) -> PinId,
    log: &PinLog,
) -> ([FakeOutput; N], [FakeOutput; N]) {
    let pins: [FakeOutput; N] = std::array::from_fn(|index| FakeOutput {
        level: Rc::default(),
        log: Some((id(index), Rc::clone(log))),
    });
    (pins.clone(), pins)
}

/// An input pin the test drives. Starts high (released, with the pull-up).
#[derive(Clone)]
pub struct FakeInput(Rc<Cell<bool>>);

impl Default for FakeInput {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl FakeInput {
    pub fn set_high(&self, high: bool) {
        self.0.set(high);
    }
}

impl ErrorType for FakeInput {
    type Error = Infallible;
}

impl InputPin for FakeInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }
}

/// What a [`RecordingTone`] was asked to do on one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    Play { frequency_hz: u32, volume: u8 },
    Silence,
}

/// A [`Tone`] that records every call.
#[derive(Clone, Default)]
pub struct RecordingTone(Rc<RefCell<Vec<ToneEvent>>>);

impl RecordingTone {
    pub fn events(&self) -> Vec<ToneEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl Tone for RecordingTone {
    fn play(&mut self, frequency_hz: u32, volume: u8) {
        self.0.borrow_mut().push(ToneEvent::Play {
            frequency_hz,
            volume,
        });
    }

    fn silence(&mut self) {
        self.0.borrow_mut().push(ToneEvent::Silence);
    }
}

/// `millis` after boot.
pub const fn at(millis: u64) -> Instant {
    Instant::from_millis(millis)
}
