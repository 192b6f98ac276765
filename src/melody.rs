//! Buzzer melodies: the `start note duration volume;...` text format, pitches, and
//! a tick-driven player.
//!
//! Times in the text are in beats and may be fractional. A beat lasts
//! [`TICKS_PER_BEAT`] player ticks.

use heapless::Vec;

use crate::jingles::Jingle;
use crate::{Error, Result};

/// The most notes one melody holds.
pub const MAX_NOTES: usize = 32;

/// Player ticks per beat.
pub const TICKS_PER_BEAT: u32 = 3;

/// Melodies end on a whole bar.
const BEATS_PER_BAR: u32 = 8;

/// Scale of the fixed-point numbers in the text.
const MILLI: u32 = 1000;

/// Octave 8 (C8 through B8) in hundredths of a hertz. Lower octaves halve.
const OCTAVE_8_CENTI_HZ: [u32; 12] = [
    418_601, 443_492, 469_864, 497_803, 527_404, 558_765, 591_991, 627_193, 664_488, 704_000,
    745_862, 790_213,
];

/// A pitch as a MIDI note number, so A4 is 69 and sounds at 440 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pitch(u8);

impl Pitch {
    /// Highest valid MIDI note, G9.
    pub const MAX: Self = Self(127);

    #[must_use]
    pub const fn from_midi(midi: u8) -> Option<Self> {
        if midi <= Self::MAX.0 {
            Some(Self(midi))
        } else {
            None
        }
    }

    /// Parses a note name such as `A4`, `C#5`, or `Bb3`.
    ///
    /// The letter is `A`-`G` in either case, an optional `#` or `b` follows, and
    /// the octave is a single digit.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let pitch_class: i16 = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let rest = chars.as_str();
        let (accidental, octave) = if let Some(octave) = rest.strip_prefix('#') {
            (1_i16, octave)
        } else if let Some(octave) = rest.strip_prefix('b') {
            (-1, octave)
        } else {
            (0, rest)
        };
        let [digit] = octave.as_bytes() else {
            return None;
        };
        if !digit.is_ascii_digit() {
            return None;
        }
        let octave = i16::from(digit.checked_sub(b'0')?);
        let midi = octave
            .checked_add(1)?
            .checked_mul(12)?
            .checked_add(pitch_class)?
            .checked_add(accidental)?;
        Self::from_midi(u8::try_from(midi).ok()?)
    }

    #[must_use]
    pub const fn midi(self) -> u8 {
        self.0
    }

    /// Equal-tempered frequency, rounded to the nearest hertz.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        clippy::cast_lossless,
        reason = "MIDI numbers are at most 127, so the shifts stay within u32 and the remainder indexes a 12-entry table"
    )]
    pub const fn frequency_hz(self) -> u32 {
        let pitch_class = (self.0 % 12) as usize;
        // MIDI octave -1 is index 0.
        let octave_index = (self.0 / 12) as u32;
        let base = OCTAVE_8_CENTI_HZ[pitch_class];
        let centi_hz = if octave_index > 9 {
            base << (octave_index - 9)
        } else {
            base >> (9 - octave_index)
        };
        (centi_hz + 50) / 100
    }
}

/// One note of a melody, timed in whole beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    pub start: u32,
    pub pitch: Pitch,
    pub duration: u32,
    pub volume: u8,
}

impl Note {
    /// Whether the note sounds during `beat`.
    #[must_use]
    pub const fn sounds_at(&self, beat: u32) -> bool {
        self.start <= beat && beat < self.start.saturating_add(self.duration)
    }
}

/// A parsed melody: notes sorted by start, plus the beat it ends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Melody {
    notes: Vec<Note, MAX_NOTES>,
    end: u32,
}

impl Melody {
    /// Parses `start note duration volume` entries separated by `;`.
    ///
    /// Entries may come in any order. Starts round to the nearest beat and
    /// durations round up to at least one beat. Empty entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MelodySyntax`] or [`Error::UnknownNote`] with the index of
    /// the bad entry, or [`Error::MelodyTooLong`] past [`MAX_NOTES`] notes.
    pub fn parse(text: &str) -> Result<Self> {
        let mut notes = Vec::<Note, MAX_NOTES>::new();
        for (index, entry) in text
            .split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .enumerate()
        {
            let note = parse_note(index, entry)?;
            notes
                .push(note)
                .map_err(|_| Error::MelodyTooLong(MAX_NOTES))?;
        }
        notes.sort_unstable_by_key(|note| (note.start, note.pitch));

        let last_beat = notes
            .iter()
            .map(|note| note.start.saturating_add(note.duration))
            .max()
            .unwrap_or(0);
        let end = last_beat
            .div_ceil(BEATS_PER_BAR)
            .saturating_mul(BEATS_PER_BAR);
        Ok(Self { notes, end })
    }

    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The first beat after the melody, always a whole number of bars.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }
}

fn parse_note(index: usize, entry: &str) -> Result<Note> {
    let mut fields = entry.split_whitespace();
    let (Some(start), Some(name), Some(duration), Some(volume), None) = (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) else {
        return Err(Error::MelodySyntax(index));
    };
    let syntax = || Error::MelodySyntax(index);

    let start = round_milli(parse_milli(start).ok_or_else(syntax)?);
    let pitch = Pitch::parse(name).ok_or(Error::UnknownNote(index))?;
    let duration = ceil_milli(parse_milli(duration).ok_or_else(syntax)?).max(1);
    let volume = round_milli(parse_milli(volume).ok_or_else(syntax)?);
    Ok(Note {
        start,
        pitch,
        duration,
        volume: u8::try_from(volume).unwrap_or(u8::MAX),
    })
}

/// Parses a non-negative decimal such as `3`, `0.5`, or `12.25` into thousandths.
///
/// Digits past the third decimal place are dropped.
#[expect(
    clippy::integer_division_remainder_used,
    clippy::arithmetic_side_effects,
    reason = "The scale only shrinks, by a nonzero constant"
)]
fn parse_milli(field: &str) -> Option<u32> {
    let (whole, fraction) = field.split_once('.').unwrap_or((field, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for byte in whole.bytes() {
        value = value.checked_mul(10)?.checked_add(digit_value(byte)?)?;
    }
    value = value.checked_mul(MILLI)?;

    let mut scale = MILLI;
    for byte in fraction.bytes() {
        let digit = digit_value(byte)?;
        scale /= 10;
        value = value.checked_add(digit.checked_mul(scale)?)?;
    }
    Some(value)
}

fn digit_value(byte: u8) -> Option<u32> {
    byte.is_ascii_digit()
        .then(|| u32::from(byte.wrapping_sub(b'0')))
}

#[expect(
    clippy::integer_division_remainder_used,
    reason = "Dividing by a nonzero constant"
)]
const fn round_milli(milli: u32) -> u32 {
    milli.saturating_add(MILLI / 2) / MILLI
}

const fn ceil_milli(milli: u32) -> u32 {
    milli.div_ceil(MILLI)
}

/// Something that can sound one tone at a time, such as a PWM buzzer.
pub trait Tone {
    /// Sounds `frequency_hz` at `volume` (0-100) until told otherwise.
    fn play(&mut self, frequency_hz: u32, volume: u8);

    /// Stops sounding.
    fn silence(&mut self);
}

/// Plays a [`Melody`] one tick at a time.
///
/// Notes that sound together share the buzzer in turn, one note per tick.
#[derive(Debug, Clone)]
pub struct MelodyPlayer {
    melody: Melody,
    tick: u32,
    arpeggio: usize,
    looping: bool,
}

impl MelodyPlayer {
    /// A player that stops at the end of `melody`.
    #[must_use]
    pub const fn new(melody: Melody) -> Self {
        Self {
            melody,
            tick: 0,
            arpeggio: 0,
            looping: false,
        }
    }

    /// Starts over from the first tick at the end instead of stopping.
    ///
    /// An empty melody still ends at once.
    #[must_use]
    pub const fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    #[must_use]
    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    #[must_use]
    pub const fn melody(&self) -> &Melody {
        &self.melody
    }

    /// Sounds the current tick on `tone` and moves on.
    ///
    /// Returns `false`, with `tone` silenced, once the melody has ended, and
    /// keeps returning `false` until [`restart`](Self::restart). A
    /// [`looping`](Self::looping) player wraps to its first tick instead.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Dividing by nonzero values"
    )]
    pub fn tick<T: Tone>(&mut self, tone: &mut T) -> bool {
        let mut beat = self.tick / TICKS_PER_BEAT;
        if beat >= self.melody.end {
            if !self.looping || self.melody.end == 0 {
                tone.silence();
                return false;
            }
            self.restart();
            beat = 0;
        }

        let sounding = self
            .melody
            .notes
            .iter()
            .filter(|note| note.sounds_at(beat))
            .count();
        let note = self
            .arpeggio
            .checked_rem(sounding)
            .and_then(|turn| {
                self.melody
                    .notes
                    .iter()
                    .filter(|note| note.sounds_at(beat))
                    .nth(turn)
            });
        match note {
            Some(note) => {
                tone.play(note.pitch.frequency_hz(), note.volume);
                self.arpeggio = self.arpeggio.wrapping_add(1);
            }
            None => tone.silence(),
        }

        self.tick = self.tick.saturating_add(1);
        true
    }

    /// Rewinds to the first tick.
    pub const fn restart(&mut self) {
        self.tick = 0;
        self.arpeggio = 0;
    }
}

/// What the melody task should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MelodyCommand {
    /// Play a jingle from its start, replacing whatever is playing.
    Play(Jingle),
    /// Silence the buzzer.
    Stop,
}

#[cfg(feature = "pico1")]
mod device {
    use defmt::info;
    use embassy_executor::Spawner;
    use embassy_futures::select::{Either, select};
    use embassy_rp::clocks::clk_sys_freq;
    use embassy_rp::pwm::{Config, Pwm};
    use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
    use embassy_time::Ticker;

    use super::{MelodyCommand, Tone};
    use crate::Result;
    use crate::jingles::{Jingle, Jingles};
    use crate::shared_constants::MELODY_TICK;

    /// PWM clock divider; keeps audible periods within the 16-bit counter.
    const DIVIDER: u8 = 64;

    /// A piezo buzzer on one PWM channel A output.
    pub struct Buzzer<'d> {
        pwm: Pwm<'d>,
        config: Config,
    }

    impl<'d> Buzzer<'d> {
        /// e.g.: `Buzzer::new(Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, Config::default()))`
        #[must_use]
        pub fn new(mut pwm: Pwm<'d>) -> Self {
            let mut config = Config::default();
            config.divider = DIVIDER.into();
            config.compare_a = 0;
            config.enable = true;
            pwm.set_config(&config);
            Self { pwm, config }
        }
    }

    impl Tone for Buzzer<'_> {
        #[expect(
            clippy::integer_division_remainder_used,
            clippy::arithmetic_side_effects,
            reason = "Divisors are nonzero and products fit in u32"
        )]
        fn play(&mut self, frequency_hz: u32, volume: u8) {
            let ticks = clk_sys_freq()
                .checked_div(u32::from(DIVIDER) * frequency_hz)
                .unwrap_or(0);
            let top = u16::try_from(ticks.saturating_sub(1)).unwrap_or(u16::MAX);
            let compare = u32::from(top) * u32::from(volume.min(100)) / 200;
            self.config.top = top;
            self.config.compare_a = u16::try_from(compare).unwrap_or(top);
            self.pwm.set_config(&self.config);
        }

        fn silence(&mut self) {
            self.config.compare_a = 0;
            self.pwm.set_config(&self.config);
        }
    }

    /// Plays jingles on the buzzer from a background task.
    pub struct Jukebox<'a>(&'a JukeboxNotifier);

    /// Signal carrying the next [`MelodyCommand`] to the [`Jukebox`] task.
    pub type JukeboxNotifier = Signal<CriticalSectionRawMutex, MelodyCommand>;

    impl Jukebox<'_> {
        /// Spawns the melody task.
        ///
        /// # Errors
        ///
        /// Returns an error if the task cannot be spawned.
        #[must_use = "Must be used to manage the spawned task"]
        pub fn new(
            buzzer: Buzzer<'static>,
            jingles: Jingles,
            notifier: &'static JukeboxNotifier,
            spawner: Spawner,
        ) -> Result<Self> {
            let token = device_loop(buzzer, jingles, notifier)?;
            spawner.spawn(token);
            Ok(Self(notifier))
        }

        #[must_use]
        pub const fn notifier() -> JukeboxNotifier {
            Signal::new()
        }

        pub fn send(&self, command: MelodyCommand) {
            self.0.signal(command);
        }
    }

    #[embassy_executor::task]
    async fn device_loop(
        mut buzzer: Buzzer<'static>,
        mut jingles: Jingles,
        notifier: &'static JukeboxNotifier,
    ) -> ! {
        let mut playing: Option<Jingle> = None;
        let mut ticker = Ticker::every(MELODY_TICK);
        loop {
            match select(notifier.wait(), ticker.next()).await {
                Either::First(MelodyCommand::Play(jingle)) => {
                    info!("Playing {:?}", jingle);
                    if let Some(previous) = playing {
                        jingles.player_mut(previous).restart();
                    }
                    jingles.player_mut(jingle).restart();
                    playing = Some(jingle);
                    ticker.reset();
                }
                Either::First(MelodyCommand::Stop) => {
                    if let Some(previous) = playing.take() {
                        jingles.player_mut(previous).restart();
                    }
                    buzzer.silence();
                }
                Either::Second(()) => {
                    if let Some(jingle) = playing {
                        let player = jingles.player_mut(jingle);
                        if !player.tick(&mut buzzer) {
                            player.restart();
                            playing = None;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(feature = "pico1")]
pub use device::{Buzzer, Jukebox, JukeboxNotifier};
