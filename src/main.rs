use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use aftermath::display;
use aftermath::player::CharacterKind;
use aftermath::session::{GameState, Session};

/// Simulation tick length ≈ 60 FPS.
const FRAME: Duration = Duration::from_millis(16);
/// Slow-motion stretches real time per tick without touching tick logic.
const SLOW_FACTOR: u32 = 3;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so this window is always refreshed
/// before expiry while the key is actually down.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

/// Held-movement intent for this frame, diagonals normalized.
fn movement_intent(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> (f32, f32) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    if is_held(key_frame, KeyCode::Char('w'), frame) || is_held(key_frame, KeyCode::Up, frame) {
        dy = -1.0;
    }
    if is_held(key_frame, KeyCode::Char('s'), frame) || is_held(key_frame, KeyCode::Down, frame) {
        dy = 1.0;
    }
    if is_held(key_frame, KeyCode::Char('a'), frame) || is_held(key_frame, KeyCode::Left, frame) {
        dx = -1.0;
    }
    if is_held(key_frame, KeyCode::Char('d'), frame) || is_held(key_frame, KeyCode::Right, frame) {
        dx = 1.0;
    }
    if dx != 0.0 && dy != 0.0 {
        dx *= 0.7071;
        dy *= 0.7071;
    }
    (dx, dy)
}

/// One-shot key actions, routed by the current game state.
/// Returns `true` to quit the program.
fn handle_key(session: &mut Session, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let mut rng = thread_rng();

    if code == KeyCode::Esc {
        return true;
    }
    if let KeyCode::Char(c) = code {
        if c == 'c' && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
    }

    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match session.state {
        GameState::Menu => {
            let pick = match code {
                KeyCode::Char('1') => Some(CharacterKind::Veteran),
                KeyCode::Char('2') => Some(CharacterKind::Investigator),
                KeyCode::Char('3') => Some(CharacterKind::Successor),
                KeyCode::Char('4') => Some(CharacterKind::Executioner),
                KeyCode::Char('5') => Some(CharacterKind::Soldier),
                _ => None,
            };
            if let Some(kind) = pick {
                session.select_character(kind, &mut rng);
            }
        }
        GameState::Playing => match code {
            KeyCode::Char('e') => session.use_ability(&mut rng),
            KeyCode::Char('q') => session.switch_weapon(-1),
            KeyCode::Char('f') => session.switch_weapon(1),
            KeyCode::Char('r') => session.reload(),
            KeyCode::Char(' ') => session.attack(),
            KeyCode::Char('x') => session.execute(),
            _ => {}
        },
        GameState::Dialog | GameState::Cutscene => {
            if code == KeyCode::Char(' ') {
                session.advance_dialog();
            }
        }
        GameState::GameOver => match code {
            KeyCode::Char('r') => session.restart_level(&mut rng),
            KeyCode::Char('m') => session.to_menu(),
            _ => {}
        },
        GameState::LevelComplete => match code {
            KeyCode::Char('r') => session.advance_level(&mut rng),
            KeyCode::Char('m') => session.to_menu(),
            _ => {}
        },
    }
    false
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event per key.  Each frame we read which movement keys are
/// still "fresh" and feed the combined intent to the session, so holding
/// two directions (or moving while attacking) works on any terminal.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut session = Session::new();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        if handle_key(&mut session, code, modifiers) {
                            return Ok(());
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => session.attack(),
                    MouseEventKind::Down(MouseButton::Right) => session.execute(),
                    _ => {}
                },
                _ => {}
            }
        }

        let intent = movement_intent(&key_frame, frame);
        session.tick(intent, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &session, width, height)?;

        // Slow motion drops the outer pacing rate, not the tick logic.
        let target = if session.slow_motion {
            FRAME * SLOW_FACTOR
        } else {
            FRAME
        };
        let elapsed = frame_start.elapsed();
        if elapsed < target {
            thread::sleep(target - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
