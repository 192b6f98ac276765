//! The intro, work, and rest jingles, with one default set and three
//! alternates picked by jumpers JP1 to JP3.
//!
//! Each string uses the [`Melody`](crate::melody::Melody) text format, so a
//! sequence exported from a step sequencer can be pasted in directly.

use crate::Result;
use crate::melody::{Melody, MelodyPlayer};

/// Number of jumpers that select an alternate set.
pub const JUMPER_COUNT: usize = 3;

/// Which moment a jingle marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Jingle {
    /// Power-up and reset.
    Intro,
    /// A work session begins.
    Work,
    /// A rest session begins.
    Rest,
}

/// The melody text for each [`Jingle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JingleSet {
    pub intro: &'static str,
    pub work: &'static str,
    pub rest: &'static str,
}

impl JingleSet {
    /// Played when no jumper is set.
    pub const DEFAULT: Self = Self {
        intro: "2 A6 3 17;6 E6 1 17;9 G6 4 17;0 E6 1 17",
        work: "2 B4 2 43;0 E5 1 43;4 B4 1 43;5 C5 1 43;6 C#5 1 43",
        rest: "9 G#6 1 17;0 D#6 1 17;3 F6 1 17;5 G#6 1 17;7 A#6 1 17",
    };

    /// The alternates for JP1, JP2, and JP3.
    pub const ALTERNATES: [Self; JUMPER_COUNT] = [
        Self {
            intro: "0 F#6 1 21;1 A6 1 21;3 C7 1 21;5 B6 1 21",
            work: "7 G#4 1 21;0 F4 1 21;2 F#4 1 21;4 G#4 1 21;6 A#4 1 21",
            rest: "6 A7 2 43;0 A6 2 43;3 C#7 2 43",
        },
        Self {
            intro: "8 G#6 2 43;0 G#6 2 43;3 B6 2 43;6 D#7 2 43;11 A#6 2 43",
            work: "0 C#7 1 41;3 E7 1 41;5 F#7 1 41;9 G#7 1 41",
            rest: "0 C#7 2 41;4 G#7 2 41;2 E7 2 41",
        },
        Self {
            intro: "4 A#6 3 25;0 F6 1 25;2 G6 1 25",
            work: "9 D6 3 25;0 B6 3 25;3 G6 3 25;6 C6 3 25",
            rest: "10 F7 3 25;0 G6 3 25;4 A#6 3 25;7 D7 3 25",
        },
    ];

    /// The set for the first jumper that is set (JP1 first), else [`Self::DEFAULT`].
    #[must_use]
    pub fn select(jumpers: [bool; JUMPER_COUNT]) -> Self {
        jumpers
            .into_iter()
            .zip(Self::ALTERNATES)
            .find_map(|(is_set, set)| is_set.then_some(set))
            .unwrap_or(Self::DEFAULT)
    }

    #[must_use]
    pub const fn text(&self, jingle: Jingle) -> &'static str {
        match jingle {
            Jingle::Intro => self.intro,
            Jingle::Work => self.work,
            Jingle::Rest => self.rest,
        }
    }

    /// Parses all three melodies.
    ///
    /// # Errors
    ///
    /// Returns the first melody parse error.
    pub fn parse(&self) -> Result<Jingles> {
        Ok(Jingles {
            intro: MelodyPlayer::new(Melody::parse(self.intro)?),
            work: MelodyPlayer::new(Melody::parse(self.work)?),
            rest: MelodyPlayer::new(Melody::parse(self.rest)?),
        })
    }
}

/// A ready-to-play [`MelodyPlayer`] for each [`Jingle`].
#[derive(Debug, Clone)]
pub struct Jingles {
    intro: MelodyPlayer,
    work: MelodyPlayer,
    rest: MelodyPlayer,
}

impl Jingles {
    pub const fn player_mut(&mut self, jingle: Jingle) -> &mut MelodyPlayer {
        match jingle {
            Jingle::Intro => &mut self.intro,
            Jingle::Work => &mut self.work,
            Jingle::Rest => &mut self.rest,
        }
    }
}
