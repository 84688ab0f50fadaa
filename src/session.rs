//! Game session: the state machine sequencing menu, gameplay, dialog,
//! cutscenes and the win/lose screens, plus the per-frame simulation tick
//! that advances every entity exactly once.
//!
//! The session exclusively owns the current player and level; the level
//! is replaced wholesale on every transition.

use rand::Rng;

use crate::dialog::{DialogKey, DialogSystem, Scene};
use crate::enemy::EnemyState;
use crate::level::Level;
use crate::player::{AbilityEffect, AbilityKind, CharacterKind, Player, PlayerState};
use crate::projectiles::{self, BloodParticle, Grenade, Projectile};

/// 25 campaign levels plus the 4 bonus soldier levels.
pub const TOTAL_LEVELS: u32 = 29;
/// World-pixel viewport the camera centres on the player.
pub const VIEW_W: f32 = 1024.0;
pub const VIEW_H: f32 = 768.0;
/// Ticks a status message stays on the HUD.
const MESSAGE_TICKS: u32 = 120;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
    Dialog,
    Cutscene,
    GameOver,
    LevelComplete,
}

/// First and last level index of a character's campaign block.
pub fn character_block(kind: CharacterKind) -> (u32, u32) {
    match kind {
        CharacterKind::Veteran => (1, 5),
        CharacterKind::Investigator => (6, 10),
        CharacterKind::Successor => (11, 15),
        CharacterKind::Executioner => (16, 20),
        CharacterKind::Soldier => (21, 24),
    }
}

/// Which character a level index belongs to; `None` for the shared
/// epilogue block (25..=29), which is played as whoever got there.
pub fn character_for_level(index: u32) -> Option<CharacterKind> {
    const ROSTER: [CharacterKind; 5] = [
        CharacterKind::Veteran,
        CharacterKind::Investigator,
        CharacterKind::Successor,
        CharacterKind::Executioner,
        CharacterKind::Soldier,
    ];
    ROSTER.iter().copied().find(|kind| {
        let (first, last) = character_block(*kind);
        (first..=last).contains(&index)
    })
}

/// Story-beat dialog key played after completing level `index`.
fn beat_for_level(index: u32) -> u32 {
    (index - 1) % 3 + 1 + (index - 1) / 5 * 3
}

pub struct Session {
    pub state: GameState,
    pub level_index: u32,
    pub player: Option<Player>,
    pub level: Option<Level>,
    pub projectiles: Vec<Projectile>,
    pub grenades: Vec<Grenade>,
    pub particles: Vec<BloodParticle>,
    pub camera: (f32, f32),
    pub message: &'static str,
    pub message_timer: u32,
    pub dialog: DialogSystem,
    /// Set by the slow-time ability; the frame loop stretches real time
    /// per tick while this holds, the per-tick logic is unchanged.
    pub slow_motion: bool,
}

impl Session {
    pub fn new() -> Self {
        Session {
            state: GameState::Menu,
            level_index: 1,
            player: None,
            level: None,
            projectiles: Vec::new(),
            grenades: Vec::new(),
            particles: Vec::new(),
            camera: (0.0, 0.0),
            message: "",
            message_timer: 0,
            dialog: DialogSystem::new(),
            slow_motion: false,
        }
    }

    fn show_message(&mut self, message: &'static str) {
        self.message = message;
        self.message_timer = MESSAGE_TICKS;
    }

    fn clear_transients(&mut self) {
        self.projectiles.clear();
        self.grenades.clear();
        self.particles.clear();
        self.slow_motion = false;
    }

    // ── Campaign transitions ──────────────────────────────────────────────────

    /// Menu selection: start a fresh campaign block as `kind`.
    pub fn select_character(&mut self, kind: CharacterKind, rng: &mut impl Rng) {
        let player = Player::new(kind);
        self.level_index = character_block(kind).0;
        self.level = Some(Level::new(self.level_index, kind, player.legacy_points, rng));
        self.player = Some(player);
        self.clear_transients();
        self.state = GameState::Playing;

        // Each block opens on a cutscene.
        let scene = if kind == CharacterKind::Soldier {
            Scene::SoldierIntro
        } else {
            Scene::Intro
        };
        if self.dialog.start(DialogKey::Scene(scene)) {
            self.state = GameState::Cutscene;
        }
    }

    /// Replay the current level from scratch after a game over.
    pub fn restart_level(&mut self, rng: &mut impl Rng) {
        if self.state != GameState::GameOver {
            return;
        }
        let (Some(player), Some(level)) = (self.player.as_mut(), self.level.as_mut()) else {
            return;
        };
        player.reset();
        let character = character_for_level(self.level_index).unwrap_or(player.character);
        *level = Level::new(self.level_index, character, player.legacy_points, rng);
        self.clear_transients();
        self.state = GameState::Playing;
    }

    /// Move on from a completed level; past the campaign end, back to menu.
    pub fn advance_level(&mut self, rng: &mut impl Rng) {
        if self.state != GameState::LevelComplete {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };

        if self.level_index >= TOTAL_LEVELS {
            self.state = GameState::Menu;
            return;
        }
        self.level_index += 1;
        self.state = GameState::Playing;

        // Milestone cutscenes.
        if self.level_index == 11 && self.dialog.start(DialogKey::Scene(Scene::MidGame)) {
            self.state = GameState::Cutscene;
        } else if self.level_index == 25 && self.dialog.start(DialogKey::Scene(Scene::Finale)) {
            self.state = GameState::Cutscene;
        }

        let character = character_for_level(self.level_index).unwrap_or(player.character);
        let level = Level::new(self.level_index, character, player.legacy_points, rng);
        player.x = level.spawn_point.0;
        player.y = level.spawn_point.1;
        self.level = Some(level);
        self.clear_transients();
    }

    pub fn to_menu(&mut self) {
        if matches!(self.state, GameState::GameOver | GameState::LevelComplete) {
            self.state = GameState::Menu;
        }
    }

    // ── Player actions (discrete input events) ────────────────────────────────

    pub fn attack(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let (Some(player), Some(level)) = (self.player.as_mut(), self.level.as_mut()) else {
            return;
        };
        if let Some(projectile) = player.attack(&mut level.enemies) {
            self.projectiles.push(projectile);
        }
    }

    pub fn execute(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let (Some(player), Some(level)) = (self.player.as_mut(), self.level.as_mut()) else {
            return;
        };
        if player.execute_enemy(&mut level.enemies) {
            self.show_message("EXECUTED");
        }
    }

    pub fn use_ability(&mut self, rng: &mut impl Rng) {
        if self.state != GameState::Playing {
            return;
        }
        let (Some(player), Some(level)) = (self.player.as_mut(), self.level.as_mut()) else {
            return;
        };
        match player.use_ability(&mut level.enemies, rng) {
            Some(AbilityEffect::Message(text)) => {
                if player.character.ability() == AbilityKind::SlowTime {
                    self.slow_motion = true;
                }
                self.show_message(text);
            }
            Some(AbilityEffect::Thrown(grenade)) => self.grenades.push(grenade),
            None => {}
        }
    }

    pub fn switch_weapon(&mut self, direction: i32) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(player) = self.player.as_mut() {
            player.switch_weapon(direction);
        }
    }

    pub fn reload(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(player) = self.player.as_mut() else {
            return;
        };
        let weapon = player.weapon_mut();
        if weapon.is_ranged && weapon.ammo < weapon.max_ammo {
            weapon.reload();
            self.show_message("WEAPON RELOADED");
        }
    }

    /// Skip to the next dialog line (space during dialog/cutscene).
    pub fn advance_dialog(&mut self) {
        if !matches!(self.state, GameState::Dialog | GameState::Cutscene) {
            return;
        }
        self.dialog.advance_line();
        if !self.dialog.active() {
            self.end_dialog();
        }
    }

    fn end_dialog(&mut self) {
        // Story beats play on level completion, so they resolve to the
        // completion screen; cutscenes resolve back into gameplay.
        self.state = if self.dialog.is_cutscene() {
            GameState::Playing
        } else {
            GameState::LevelComplete
        };
    }

    // ── Simulation tick ───────────────────────────────────────────────────────

    /// Advance one frame.  `intent` is the held-movement vector, already
    /// normalized for diagonals by the input layer.
    pub fn tick(&mut self, intent: (f32, f32), rng: &mut impl Rng) {
        match self.state {
            GameState::Playing => self.tick_playing(intent, rng),
            GameState::Dialog | GameState::Cutscene => {
                self.dialog.update();
                if !self.dialog.active() {
                    self.end_dialog();
                }
            }
            _ => {}
        }
    }

    fn tick_playing(&mut self, intent: (f32, f32), rng: &mut impl Rng) {
        let (Some(player), Some(level)) = (self.player.as_mut(), self.level.as_mut()) else {
            return;
        };

        // Player movement and countdowns.
        player.move_by(intent.0, intent.1, &level.walls);
        if let Some(text) = player.update() {
            self.message = text;
            self.message_timer = MESSAGE_TICKS;
        }

        // Enemy AI; collect whatever they fire.
        for enemy in level.enemies.iter_mut() {
            if let Some(projectile) = enemy.update(player, &level.walls, rng) {
                self.projectiles.push(projectile);
            }
        }

        // Prune the dead: a blood burst per corpse, and the mark is
        // invalidated when its enemy goes away.
        let mut bursts = Vec::new();
        level.enemies.retain(|enemy| {
            if enemy.state == EnemyState::Dead {
                bursts.push(enemy.hitbox().center());
                if player.marked_enemy == Some(enemy.id) {
                    player.marked_enemy = None;
                }
                false
            } else {
                true
            }
        });
        for (cx, cy) in bursts {
            self.particles.extend(projectiles::blood_burst(cx, cy, rng));
        }

        // Projectiles, grenades, particles.
        for projectile in &mut self.projectiles {
            projectile.update(&level.walls, &mut level.enemies);
        }
        self.projectiles.retain(|p| p.active);

        let mut detonated = false;
        for grenade in &mut self.grenades {
            if grenade.update(&level.walls, &mut level.enemies) {
                detonated = true;
            }
        }
        self.grenades.retain(|g| !g.exploded);
        if detonated {
            self.message = "GRENADE DETONATED";
            self.message_timer = MESSAGE_TICKS;
        }

        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.expired());

        // Weapon pickups.
        let player_box = player.hitbox();
        let mut pickup_message = None;
        level.pickups.retain(|pickup| {
            if pickup.hitbox().intersects(&player_box) {
                pickup_message = Some(if player.add_weapon(pickup.kind) {
                    "NEW WEAPON ACQUIRED"
                } else {
                    "AMMO REFILLED"
                });
                false
            } else {
                true
            }
        });
        if let Some(text) = pickup_message {
            self.message = text;
            self.message_timer = MESSAGE_TICKS;
        }

        // Completion, routed through a story beat when one is scripted.
        if level.is_complete(player) {
            self.state = GameState::LevelComplete;
            if self.dialog.start(DialogKey::Beat(beat_for_level(self.level_index))) {
                self.state = GameState::Dialog;
            }
        }

        // Loss: dead outright, or downed with hostiles still up.
        if player.state == PlayerState::Dead
            || (player.state == PlayerState::Downed && level.any_enemy_alive())
        {
            self.state = GameState::GameOver;
        }

        // Camera tracks the player.
        self.camera = (player.x - VIEW_W / 2.0, player.y - VIEW_H / 2.0);

        if self.message_timer > 0 {
            self.message_timer -= 1;
        }

        // Slow motion lapses with its backing ability duration.
        if self.slow_motion && player.ability_duration == 0 {
            self.slow_motion = false;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
