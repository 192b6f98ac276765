//! Host-level tests for melody parsing, pitches, the player, and the jingle sets.

mod common;

use common::{RecordingTone, ToneEvent};
use pomodoro_kit::melody::{MAX_NOTES, Note, Pitch, TICKS_PER_BEAT};
use pomodoro_kit::{Error, Jingle, JingleSet, Melody, MelodyPlayer};

fn pitch(name: &str) -> Pitch {
    Pitch::parse(name).expect("valid note name")
}

/// Ticks `player` until it reports the end, returning how many ticks said `true`.
fn play_to_end(player: &mut MelodyPlayer, tone: &mut RecordingTone) -> usize {
    let mut ticks = 0;
    while player.tick(tone) {
        ticks += 1;
        assert!(ticks < 10_000, "melody never ended");
    }
    ticks
}

#[test]
fn note_names_map_to_midi_numbers() {
    assert_eq!(pitch("A4").midi(), 69);
    assert_eq!(pitch("C4").midi(), 60);
    assert_eq!(pitch("c4").midi(), 60);
    assert_eq!(pitch("C#5").midi(), 73);
    assert_eq!(pitch("Bb3").midi(), 58);
    assert_eq!(pitch("Cb0").midi(), 11);
    assert_eq!(pitch("G9").midi(), 127);
}

#[test]
fn bad_note_names_are_rejected() {
    for name in ["", "H4", "A", "A10", "C#", "#4", "A-1", "B#9", "Ab#4", "A4 "] {
        assert_eq!(Pitch::parse(name), None, "{name:?}");
    }
}

#[test]
fn frequencies_follow_equal_temperament() {
    assert_eq!(pitch("A4").frequency_hz(), 440);
    assert_eq!(pitch("A5").frequency_hz(), 880);
    assert_eq!(pitch("A6").frequency_hz(), 1_760);
    assert_eq!(pitch("C4").frequency_hz(), 262);
    assert_eq!(pitch("C8").frequency_hz(), 4_186);
    assert_eq!(pitch("G9").frequency_hz(), 12_544);
}

#[test]
fn parse_sorts_notes_and_rounds_the_end_up_to_a_bar() {
    let melody = Melody::parse("2 A6 3 17;6 E6 1 17;9 G6 4 17;0 E6 1 17").expect("valid melody");
    let starts: Vec<u32> = melody.notes().iter().map(|note| note.start).collect();
    assert_eq!(starts, [0, 2, 6, 9]);
    assert_eq!(
        melody.notes()[1],
        Note {
            start: 2,
            pitch: pitch("A6"),
            duration: 3,
            volume: 17,
        }
    );
    assert_eq!(melody.end(), 16);
}

#[test]
fn parse_rounds_fractional_fields() {
    let melody = Melody::parse("0.5 C4 0.25 49.5;1.4 D4 1.2 10").expect("valid melody");
    let notes = melody.notes();
    assert_eq!((notes[0].start, notes[0].duration, notes[0].volume), (1, 1, 50));
    assert_eq!((notes[1].start, notes[1].duration, notes[1].volume), (1, 2, 10));
}

#[test]
fn parse_skips_empty_entries_and_clamps_volume() {
    let melody = Melody::parse(" 0 A4 1 300 ; ;").expect("valid melody");
    assert_eq!(melody.notes().len(), 1);
    assert_eq!(melody.notes()[0].volume, u8::MAX);
    assert_eq!(melody.end(), 8);
}

#[test]
fn parse_reports_the_bad_entry() {
    assert!(matches!(Melody::parse("1 C4 1"), Err(Error::MelodySyntax(0))));
    assert!(matches!(Melody::parse("x C4 1 1"), Err(Error::MelodySyntax(0))));
    assert!(matches!(
        Melody::parse("0 C4 1 10;1 C4 1 10 extra"),
        Err(Error::MelodySyntax(1))
    ));
    assert!(matches!(
        Melody::parse("0 C4 1 10;1 H4 1 10"),
        Err(Error::UnknownNote(1))
    ));
}

#[test]
fn parse_rejects_too_many_notes() {
    let text = vec!["0 C4 1 10"; MAX_NOTES + 1].join(";");
    assert!(matches!(
        Melody::parse(&text),
        Err(Error::MelodyTooLong(MAX_NOTES))
    ));
    let text = vec!["0 C4 1 10"; MAX_NOTES].join(";");
    assert!(Melody::parse(&text).is_ok());
}

#[test]
fn empty_melody_ends_at_once() {
    let mut player = MelodyPlayer::new(Melody::parse("").expect("valid melody"));
    let mut tone = RecordingTone::default();
    assert!(!player.tick(&mut tone));
    assert_eq!(tone.events(), [ToneEvent::Silence]);
}

#[test]
fn player_sounds_each_note_for_its_beats_then_ends_once() {
    let melody = Melody::parse("0 A4 1 50").expect("valid melody");
    let mut player = MelodyPlayer::new(melody);
    let mut tone = RecordingTone::default();

    let ticks = play_to_end(&mut player, &mut tone);
    assert_eq!(ticks, (8 * TICKS_PER_BEAT) as usize);

    let events = tone.events();
    let a4 = ToneEvent::Play {
        frequency_hz: 440,
        volume: 50,
    };
    assert_eq!(events[..3], [a4; 3]);
    assert!(events[3..].iter().all(|event| *event == ToneEvent::Silence));

    // Stays ended until restarted.
    assert!(!player.tick(&mut tone));
    assert!(!player.tick(&mut tone));
}

#[test]
fn notes_sounding_together_take_turns() {
    let melody = Melody::parse("0 E4 1 30;0 C4 1 30").expect("valid melody");
    let mut player = MelodyPlayer::new(melody);
    let mut tone = RecordingTone::default();
    for _ in 0..TICKS_PER_BEAT {
        assert!(player.tick(&mut tone));
    }
    let c4 = ToneEvent::Play {
        frequency_hz: pitch("C4").frequency_hz(),
        volume: 30,
    };
    let e4 = ToneEvent::Play {
        frequency_hz: pitch("E4").frequency_hz(),
        volume: 30,
    };
    assert_eq!(tone.events(), [c4, e4, c4]);
}

#[test]
fn restart_replays_the_same_tones() {
    let melody = Melody::parse(JingleSet::DEFAULT.intro).expect("valid melody");
    let mut player = MelodyPlayer::new(melody);
    let mut tone = RecordingTone::default();

    let first_ticks = play_to_end(&mut player, &mut tone);
    let first = tone.events();
    tone.clear();

    player.restart();
    let second_ticks = play_to_end(&mut player, &mut tone);
    assert_eq!(first_ticks, second_ticks);
    assert_eq!(first, tone.events());
    assert_eq!(first_ticks, (16 * TICKS_PER_BEAT) as usize);
}

#[test]
fn restart_mid_melody_starts_over() {
    let melody = Melody::parse("0 C4 1 10;1 D4 1 10").expect("valid melody");
    let mut player = MelodyPlayer::new(melody);
    let mut tone = RecordingTone::default();
    for _ in 0..4 {
        player.tick(&mut tone);
    }
    tone.clear();
    player.restart();
    player.tick(&mut tone);
    assert_eq!(
        tone.events(),
        [ToneEvent::Play {
            frequency_hz: pitch("C4").frequency_hz(),
            volume: 10,
        }]
    );
}

#[test]
fn looping_player_wraps_and_replays_the_same_tones() {
    let melody = Melody::parse("0 C4 1 10;1 D4 1 10;1 F4 1 10").expect("valid melody");
    let pass = (melody.end() * TICKS_PER_BEAT) as usize;
    let mut player = MelodyPlayer::new(melody).looping();
    assert!(player.is_looping());
    let mut tone = RecordingTone::default();

    for _ in 0..pass * 3 {
        assert!(player.tick(&mut tone));
    }
    let events = tone.events();
    assert_eq!(events.len(), pass * 3);
    assert_eq!(events[..pass], events[pass..pass * 2]);
    assert_eq!(events[..pass], events[pass * 2..]);
    assert_eq!(
        events[pass],
        ToneEvent::Play {
            frequency_hz: pitch("C4").frequency_hz(),
            volume: 10,
        }
    );
}

#[test]
fn looping_empty_melody_still_ends() {
    let mut player = MelodyPlayer::new(Melody::parse("").expect("valid melody")).looping();
    let mut tone = RecordingTone::default();
    assert!(!player.tick(&mut tone));
    assert_eq!(tone.events(), [ToneEvent::Silence]);
}

#[test]
fn jumpers_pick_the_first_fitted_set() {
    assert_eq!(JingleSet::select([false, false, false]), JingleSet::DEFAULT);
    assert_eq!(JingleSet::select([true, true, true]), JingleSet::ALTERNATES[0]);
    assert_eq!(JingleSet::select([false, true, true]), JingleSet::ALTERNATES[1]);
    assert_eq!(JingleSet::select([false, false, true]), JingleSet::ALTERNATES[2]);
}

#[test]
fn every_jingle_parses_and_plays() {
    for set in core::iter::once(JingleSet::DEFAULT).chain(JingleSet::ALTERNATES) {
        let mut jingles = set.parse().expect("valid jingle set");
        for jingle in [Jingle::Intro, Jingle::Work, Jingle::Rest] {
            let melody = Melody::parse(set.text(jingle)).expect("valid melody");
            assert!(!melody.notes().is_empty());
            assert!(!jingles.player_mut(jingle).is_looping());
            assert_eq!(jingles.player_mut(jingle).melody(), &melody);

            let mut tone = RecordingTone::default();
            let ticks = play_to_end(jingles.player_mut(jingle), &mut tone);
            assert_eq!(ticks, (melody.end() * TICKS_PER_BEAT) as usize);
        }
    }
}
