use aftermath::dialog::{DialogKey, DialogSystem, Scene};

// ── Script lookup ─────────────────────────────────────────────────────────────

#[test]
fn known_keys_start_playback() {
    let mut dialog = DialogSystem::new();
    assert!(dialog.start(DialogKey::Beat(1)));
    assert!(dialog.active());
    assert!(dialog.current_line().is_some());
}

#[test]
fn unknown_beats_refuse_to_start() {
    let mut dialog = DialogSystem::new();
    assert!(!dialog.start(DialogKey::Beat(99)));
    assert!(!dialog.active());
    assert!(dialog.current_line().is_none());
}

#[test]
fn scenes_are_flagged_as_cutscenes_and_beats_are_not() {
    let mut dialog = DialogSystem::new();
    dialog.start(DialogKey::Scene(Scene::Intro));
    assert!(dialog.is_cutscene());

    dialog.start(DialogKey::Beat(4));
    assert!(!dialog.is_cutscene());
}

#[test]
fn every_campaign_beat_has_a_script() {
    let mut dialog = DialogSystem::new();
    for beat in 1..=15 {
        assert!(dialog.start(DialogKey::Beat(beat)), "beat {} missing", beat);
    }
}

// ── Playback ──────────────────────────────────────────────────────────────────

#[test]
fn lines_auto_advance_when_their_timer_runs_out() {
    let mut dialog = DialogSystem::new();
    dialog.start(DialogKey::Beat(1)); // two lines
    let first = dialog.current_line();

    for _ in 0..dialog.time_left() {
        dialog.update();
    }
    let second = dialog.current_line();
    assert!(second.is_some());
    assert_ne!(first, second);

    for _ in 0..dialog.time_left() {
        dialog.update();
    }
    assert!(!dialog.active());
}

#[test]
fn manual_advance_skips_ahead() {
    let mut dialog = DialogSystem::new();
    dialog.start(DialogKey::Scene(Scene::Intro)); // three lines

    dialog.advance_line();
    dialog.advance_line();
    assert!(dialog.active());
    dialog.advance_line();
    assert!(!dialog.active());
}

#[test]
fn advancing_resets_the_line_timer() {
    let mut dialog = DialogSystem::new();
    dialog.start(DialogKey::Beat(1));
    dialog.update();
    dialog.update();
    let before = dialog.time_left();

    dialog.advance_line();
    assert!(dialog.time_left() > before);
}
