//! The top-level timer: configure, then alternate work and rest until reset.
//!
//! [`Pomodoro::step`] runs once per control-loop poll. It draws into the
//! [`DisplayBuffer`] directly and returns the LED and melody changes as
//! [`Effects`] for the caller to hand to the tasks that own that hardware.

use embassy_time::Instant;

use crate::button::{Button, ButtonEvents};
use crate::config::Settings;
use crate::countdown::{Countdown, CountdownStatus};
use crate::display_buffer::DisplayBuffer;
use crate::jingles::Jingle;
use crate::melody::MelodyCommand;
use crate::setup::Setup;
use crate::shared_constants::CELL_COUNT;
use crate::status_led::{INTRO_COLOR, LAST_MINUTE_COLOR, REST_COLOR, Rgb, WORK_COLOR};

/// Where the timer is.
#[derive(Debug, Clone)]
pub enum Phase {
    /// About to greet and enter configuration. Reset returns here.
    Init,
    Configure(Setup),
    Work(Countdown),
    Rest(Countdown),
}

/// Hardware changes requested by one [`Pomodoro::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    pub led: Option<Rgb>,
    pub melody: Option<MelodyCommand>,
}

impl Effects {
    const fn enter(led: Rgb, jingle: Jingle) -> Self {
        Self {
            led: Some(led),
            melody: Some(MelodyCommand::Play(jingle)),
        }
    }
}

/// The timer state machine, one value for the life of the firmware.
///
/// Reset never nests: it only moves back to [`Phase::Init`].
#[derive(Debug, Clone)]
pub struct Pomodoro {
    defaults: Settings,
    settings: Settings,
    phase: Phase,
}

impl Pomodoro {
    /// Starts in [`Phase::Init`]; configuration begins from `defaults` after every reset.
    #[must_use]
    pub const fn new(defaults: Settings) -> Self {
        Self {
            defaults,
            settings: defaults,
            phase: Phase::Init,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The lengths chosen in the last configuration phase.
    #[must_use]
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    /// One control-loop pass.
    pub fn step(
        &mut self,
        now: Instant,
        events: ButtonEvents,
        display: &DisplayBuffer<CELL_COUNT>,
    ) -> Effects {
        if events.contains(Button::Reset) {
            #[cfg(feature = "defmt")]
            defmt::info!("Reset");
            self.phase = Phase::Init;
            return Effects {
                led: None,
                melody: Some(MelodyCommand::Stop),
            };
        }

        let confirm = events.contains(Button::Confirm);
        match &mut self.phase {
            Phase::Init => {
                #[cfg(feature = "defmt")]
                defmt::info!("Init");
                let mut setup = Setup::new(self.defaults);
                setup.poll(now, ButtonEvents::NONE, display);
                self.phase = Phase::Configure(setup);
                Effects::enter(INTRO_COLOR, Jingle::Intro)
            }
            Phase::Configure(setup) => match setup.poll(now, events, display) {
                Some(settings) => {
                    self.settings = settings;
                    self.start_work(now, display)
                }
                None => Effects::default(),
            },
            Phase::Work(countdown) => {
                let update = countdown.poll(now, confirm, display);
                if update.status == CountdownStatus::Done {
                    self.start_rest(now, display)
                } else {
                    last_minute_effects(update.last_minute)
                }
            }
            Phase::Rest(countdown) => {
                let update = countdown.poll(now, confirm, display);
                if update.status == CountdownStatus::Done {
                    self.start_work(now, display)
                } else {
                    last_minute_effects(update.last_minute)
                }
            }
        }
    }

    fn start_work(&mut self, now: Instant, display: &DisplayBuffer<CELL_COUNT>) -> Effects {
        #[cfg(feature = "defmt")]
        defmt::info!("Work for {} s", self.settings.study_seconds());
        let countdown = Countdown::start(self.settings.study_seconds(), now);
        display.write(&countdown.frame());
        self.phase = Phase::Work(countdown);
        Effects::enter(WORK_COLOR, Jingle::Work)
    }

    fn start_rest(&mut self, now: Instant, display: &DisplayBuffer<CELL_COUNT>) -> Effects {
        #[cfg(feature = "defmt")]
        defmt::info!("Rest for {} s", self.settings.rest_seconds());
        let countdown = Countdown::start(self.settings.rest_seconds(), now);
        display.write(&countdown.frame());
        self.phase = Phase::Rest(countdown);
        Effects::enter(REST_COLOR, Jingle::Rest)
    }
}

const fn last_minute_effects(last_minute: bool) -> Effects {
    Effects {
        led: if last_minute {
            Some(LAST_MINUTE_COLOR)
        } else {
            None
        },
        melody: None,
    }
}
