use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use klava::config::{Config, ConfigStore, FileConfigStore};
use klava::generator::{Alphabet, AlphabetPreset};
use klava::{App, Outcome, SessionError, TypingSession};
use rand::{rngs::StdRng, SeedableRng};

fn started(length: usize, preset: AlphabetPreset, at: Instant) -> TypingSession {
    let mut session = TypingSession::new();
    let mut rng = StdRng::seed_from_u64(11);
    session
        .start_at(length, &preset.alphabet(), &mut rng, at)
        .unwrap();
    session
}

#[test]
fn sixty_chars_in_a_minute_is_sixty_cpm() {
    let t0 = Instant::now();
    let mut session = started(60, AlphabetPreset::Alphanumeric, t0);

    for c in session.target().to_vec() {
        assert_eq!(session.submit(c), Outcome::Correct);
    }

    let report = session.final_report_at(t0 + Duration::from_secs(60));
    assert!(report.completed);
    assert_eq!(report.speed, 60.0);
    assert_eq!(report.fail_count, 0);
    assert_eq!(report.elapsed_formatted(), "01:00");
    assert_eq!(
        report.headline(),
        "Nice! Your speed: 60.00 chars/min. Mistakes: 0"
    );
}

#[test]
fn mistakes_count_but_do_not_advance() {
    let t0 = Instant::now();
    let mut session = started(3, AlphabetPreset::Digits, t0);
    let first = session.expected().unwrap();
    let wrong = if first == 'a' { 'b' } else { 'a' };

    assert_eq!(session.submit(wrong), Outcome::Incorrect);
    assert_eq!(session.submit(wrong), Outcome::Incorrect);
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.submit(first), Outcome::Correct);

    let report = session.final_report_at(t0 + Duration::from_secs(30));
    assert!(!report.completed);
    assert_eq!(report.fail_count, 2);
    assert_eq!(report.typed, 1);
    assert_eq!(report.speed, 2.0);
    assert_eq!(
        report.headline(),
        "Stopped: 1/3 chars at 2.00 chars/min. Mistakes: 2"
    );
}

#[test]
fn invalid_start_leaves_session_untouched() {
    let t0 = Instant::now();
    let mut session = started(4, AlphabetPreset::Lowercase, t0);
    let before = session.clone();
    let mut rng = StdRng::seed_from_u64(1);

    let err = session.start_at(0, &AlphabetPreset::Digits.alphabet(), &mut rng, t0);
    assert_matches!(err, Err(SessionError::InvalidConfig(_)));
    assert_eq!(session, before);

    assert_matches!(
        Alphabet::new(std::iter::empty()),
        Err(SessionError::InvalidConfig(_))
    );
}

#[test]
fn chosen_length_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileConfigStore::with_path(dir.path().join("config.json"));

    let mut app = App::new(store.load(), Some(5));
    app.adjust_difficulty(-5, Instant::now());
    store.save(&app.config).unwrap();

    let app = App::new(store.load(), Some(5));
    assert_eq!(app.difficulty, 15);
    assert_eq!(app.config, Config { length: 15, ..Config::default() });
}
