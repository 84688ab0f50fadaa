//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; this module only translates
//! state into terminal commands.  World pixels map onto character cells
//! at 16 px per column and 32 px per row, offset by the camera.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::enemy::{Enemy, EnemyKind, EnemyState};
use crate::geometry::TILE;
use crate::player::{CharacterKind, PlayerState};
use crate::session::{GameState, Session, TOTAL_LEVELS};

/// World pixels per terminal column / row.
const SCALE_X: f32 = 16.0;
const SCALE_Y: f32 = 32.0;
/// First row of the world view; rows above hold the HUD.
const WORLD_TOP: u16 = 3;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkGrey;
const C_EXIT: Color = Color::Green;
const C_PICKUP: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_DOWN: Color = Color::DarkRed;
const C_PROJECTILE: Color = Color::Cyan;
const C_GRENADE: Color = Color::DarkYellow;
const C_BLOOD: Color = Color::DarkRed;
const C_MARKED: Color = Color::Magenta;
const C_MESSAGE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `width` × `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.state {
        GameState::Menu => draw_menu(out, width, height)?,
        GameState::Playing => {
            draw_world(out, session, width, height)?;
            draw_hud(out, session, width, height)?;
        }
        GameState::Dialog => {
            draw_world(out, session, width, height)?;
            draw_hud(out, session, width, height)?;
            draw_dialog_box(out, session, width, height)?;
        }
        GameState::Cutscene => draw_cutscene(out, session, width, height)?,
        GameState::GameOver => {
            draw_world(out, session, width, height)?;
            draw_overlay(
                out,
                width,
                height,
                "G A M E   O V E R",
                Color::Red,
                session,
                "R - Retry Level  M - Menu",
            )?;
        }
        GameState::LevelComplete => {
            draw_world(out, session, width, height)?;
            draw_overlay(
                out,
                width,
                height,
                "LEVEL COMPLETE",
                Color::Green,
                session,
                "R - Next Level  M - Menu",
            )?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World view ────────────────────────────────────────────────────────────────

/// Map a world position to a terminal cell, if it is on screen.
fn to_cell(
    session: &Session,
    x: f32,
    y: f32,
    width: u16,
    height: u16,
) -> Option<(u16, u16)> {
    let col = ((x - session.camera.0) / SCALE_X).floor() as i32;
    let row = ((y - session.camera.1) / SCALE_Y).floor() as i32 + WORLD_TOP as i32;
    if col >= 0 && (col as u16) < width && row >= WORLD_TOP as i32 && row < height as i32 - 1 {
        Some((col as u16, row as u16))
    } else {
        None
    }
}

fn draw_world<W: Write>(
    out: &mut W,
    session: &Session,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some(level) = session.level.as_ref() else {
        return Ok(());
    };

    // Walls — cover every cell a wall rectangle spans.
    out.queue(style::SetForegroundColor(C_WALL))?;
    for wall in &level.walls {
        let mut wx = wall.x;
        while wx < wall.x + wall.w {
            let mut wy = wall.y;
            while wy < wall.y + wall.h {
                if let Some((col, row)) = to_cell(session, wx, wy, width, height) {
                    out.queue(cursor::MoveTo(col, row))?;
                    out.queue(Print("▓"))?;
                }
                wy += SCALE_Y;
            }
            wx += SCALE_X;
        }
    }

    // Exit tile.
    out.queue(style::SetForegroundColor(C_EXIT))?;
    if let Some((col, row)) = to_cell(
        session,
        level.exit_point.0 + TILE / 2.0,
        level.exit_point.1 + TILE / 2.0,
        width,
        height,
    ) {
        out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
        out.queue(Print("EXIT"))?;
    }

    // Pickups.
    out.queue(style::SetForegroundColor(C_PICKUP))?;
    for pickup in &level.pickups {
        if let Some((col, row)) = to_cell(session, pickup.x, pickup.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("?"))?;
        }
    }

    // Blood.
    out.queue(style::SetForegroundColor(C_BLOOD))?;
    for particle in &session.particles {
        if let Some((col, row)) = to_cell(session, particle.x, particle.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("."))?;
        }
    }

    // Enemies.
    let marked = session.player.as_ref().and_then(|p| p.marked_enemy);
    for enemy in &level.enemies {
        draw_enemy(out, session, enemy, marked, width, height)?;
    }

    // Projectiles and grenades.
    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for projectile in &session.projectiles {
        if let Some((col, row)) = to_cell(session, projectile.x, projectile.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("•"))?;
        }
    }
    out.queue(style::SetForegroundColor(C_GRENADE))?;
    for grenade in &session.grenades {
        if let Some((col, row)) = to_cell(session, grenade.x, grenade.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("o"))?;
        }
    }

    // Player.
    if let Some(player) = session.player.as_ref() {
        let (color, glyph) = if player.state == PlayerState::Downed {
            (C_PLAYER_DOWN, "%")
        } else {
            (C_PLAYER, "@")
        };
        out.queue(style::SetForegroundColor(color))?;
        if let Some((col, row)) = to_cell(session, player.x, player.y, width, height) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
    }

    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    session: &Session,
    enemy: &Enemy,
    marked: Option<u32>,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some((col, row)) = to_cell(session, enemy.x, enemy.y, width, height) else {
        return Ok(());
    };

    let (color, glyph) = if enemy.state == EnemyState::Stunned {
        (Color::Grey, "x")
    } else if marked == Some(enemy.id) {
        (C_MARKED, enemy_glyph(enemy.kind))
    } else {
        (enemy_color(enemy.kind), enemy_glyph(enemy.kind))
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn enemy_glyph(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Guard => "G",
        EnemyKind::Heavy => "H",
        EnemyKind::Fast => "F",
        EnemyKind::Sniper => "S",
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Guard => Color::Red,
        EnemyKind::Heavy => Color::Magenta,
        EnemyKind::Fast => Color::Yellow,
        EnemyKind::Sniper => Color::Green,
    }
}

// ── HUD (rows 0-2) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    session: &Session,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some(player) = session.player.as_ref() else {
        return Ok(());
    };

    let weapon = player.weapon();
    let ammo = if weapon.is_ranged {
        format!("{}/{}", weapon.ammo, weapon.max_ammo)
    } else {
        "melee".to_string()
    };
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!(
        "HP {}/{}  {} [{}]  SCORE {:>6}  COMBO x{}  LEGACY {}",
        player.health,
        player.max_health,
        weapon.kind.name(),
        ammo,
        player.score,
        player.combo,
        player.legacy_points,
    )))?;

    let ability = if player.ability_cooldown > 0 {
        format!("RECHARGING {}s", player.ability_cooldown / 60 + 1)
    } else {
        "READY".to_string()
    };
    let status = match player.state {
        PlayerState::Downed => format!("  DOWN {}s", player.downed_timer / 60 + 1),
        _ => String::new(),
    };
    out.queue(cursor::MoveTo(1, 1))?;
    out.queue(style::SetForegroundColor(Color::Grey))?;
    out.queue(Print(format!(
        "LEVEL {}/{}  {}  ABILITY {}{}",
        session.level_index,
        TOTAL_LEVELS,
        player.character.name(),
        ability,
        status,
    )))?;

    // Status message — centred on row 2.
    if session.message_timer > 0 {
        let col = (width / 2).saturating_sub(session.message.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, 2))?;
        out.queue(style::SetForegroundColor(C_MESSAGE))?;
        out.queue(Print(session.message))?;
    }

    // Controls hint — last row.
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD move  SPACE/click attack  X/right-click execute  E ability  Q/F weapon  R reload  ESC quit",
    ))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    let title = "A F T E R M A T H";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(title))?;

    let subtitle = "29 FATES, 5 KILLERS, 1 TRUTH";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(subtitle.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(subtitle))?;

    let roster: &[(&str, CharacterKind, &str, Color)] = &[
        ("1", CharacterKind::Veteran, "time dilation", Color::Blue),
        ("2", CharacterKind::Investigator, "mark enemy", Color::Green),
        ("3", CharacterKind::Successor, "berserk", Color::Red),
        ("4", CharacterKind::Executioner, "execution", Color::Magenta),
        ("5", CharacterKind::Soldier, "grenades", Color::DarkYellow),
    ];
    for (i, (key, kind, ability, color)) in roster.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(16), cy.saturating_sub(3) + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<14}", kind.name())))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(format!(" — {}", ability)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(16), cy + 4))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("Press 1-5 to pick a killer   ESC quits"))?;
    Ok(())
}

// ── Dialog / cutscene ─────────────────────────────────────────────────────────

fn draw_dialog_box<W: Write>(
    out: &mut W,
    session: &Session,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some(line) = session.dialog.current_line() else {
        return Ok(());
    };
    let row = height.saturating_sub(4);
    out.queue(cursor::MoveTo(2, row))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(width.saturating_sub(6) as usize))))?;
    out.queue(cursor::MoveTo(2, row + 1))?;
    out.queue(Print(format!("│ {:<width$}│", line, width = width.saturating_sub(7) as usize)))?;
    out.queue(cursor::MoveTo(2, row + 2))?;
    out.queue(Print(format!("└{}┘", "─".repeat(width.saturating_sub(6) as usize))))?;
    Ok(())
}

fn draw_cutscene<W: Write>(
    out: &mut W,
    session: &Session,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let Some(line) = session.dialog.current_line() else {
        return Ok(());
    };
    let cy = height / 2;
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(line.chars().count() as u16 / 2),
        cy,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(line))?;

    let hint = "Press SPACE to continue";
    out.queue(cursor::MoveTo(
        (width / 2).saturating_sub(hint.chars().count() as u16 / 2),
        cy + 2,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── End-state overlays ────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    headline: &str,
    color: Color,
    session: &Session,
    hint: &str,
) -> std::io::Result<()> {
    let score = session.player.as_ref().map(|p| p.score).unwrap_or(0);
    let score_line = format!("Score: {}", score);
    let level_line = format!("Level {}/{}", session.level_index, TOTAL_LEVELS);
    let lines: &[(&str, Color)] = &[
        (headline, color),
        (&score_line, Color::Yellow),
        (&level_line, Color::White),
        (hint, Color::Yellow),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, line_color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*line_color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
