//! Player state machine: movement, melee/ranged attacks, executes,
//! weapon inventory and the per-character mask ability.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::enemy::{Enemy, EnemyState};
use crate::geometry::{self, Rect};
use crate::projectiles::{Grenade, Projectile};
use crate::weapons::{Weapon, WeaponKind};

/// Ticks an enemy stays down after a melee hit.
pub const STUN_TICKS: u32 = 180;
/// Ticks the combo counter survives without a fresh hit.
const COMBO_DECAY: u32 = 60;
/// Ticks spent crawling before getting back up.
pub const DOWNED_TICKS: u32 = 300;
/// Score for a melee knock-down, multiplied by the running combo.
const STUN_SCORE: u32 = 10;
const EXECUTE_SCORE_MELEE: u32 = 50;
const EXECUTE_SCORE_RANGED: u32 = 75;
/// Reach of the execute-nearest mask ability.
const ABILITY_EXECUTE_RADIUS: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharacterKind {
    Veteran,
    Investigator,
    Successor,
    Executioner,
    Soldier,
}

impl CharacterKind {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterKind::Veteran => "VETERAN",
            CharacterKind::Investigator => "INVESTIGATOR",
            CharacterKind::Successor => "SUCCESSOR",
            CharacterKind::Executioner => "EXECUTIONER",
            CharacterKind::Soldier => "SOLDIER",
        }
    }

    pub fn ability(&self) -> AbilityKind {
        match self {
            CharacterKind::Veteran => AbilityKind::SlowTime,
            CharacterKind::Investigator => AbilityKind::MarkEnemy,
            CharacterKind::Successor => AbilityKind::Berserk,
            CharacterKind::Executioner => AbilityKind::ExecuteNearest,
            CharacterKind::Soldier => AbilityKind::Grenade,
        }
    }

    fn stats(&self) -> (f32, i32) {
        // (speed, max health)
        match self {
            CharacterKind::Veteran => (4.0, 3),
            CharacterKind::Investigator => (3.5, 2),
            CharacterKind::Successor => (4.5, 2),
            CharacterKind::Executioner => (3.8, 3),
            CharacterKind::Soldier => (4.2, 4),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityKind {
    SlowTime,
    MarkEnemy,
    Berserk,
    ExecuteNearest,
    Grenade,
}

/// What using an ability produced, beyond setting its cooldown.
#[derive(Clone, Debug)]
pub enum AbilityEffect {
    /// Status text for the HUD; no spawned entity.
    Message(&'static str),
    /// A live grenade to hand to the session.
    Thrown(Grenade),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Alive,
    Downed,
    Dead,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub character: CharacterKind,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub state: PlayerState,
    pub downed_timer: u32,
    /// Unit-ish facing; updated on every non-zero movement intent.
    pub facing: (f32, f32),
    pub weapons: Vec<Weapon>,
    pub current_weapon: usize,
    pub combo: u32,
    pub combo_timer: u32,
    pub score: u32,
    /// Meta-progression counter; scales future level difficulty.
    pub legacy_points: u32,
    pub ability_cooldown: u32,
    pub ability_duration: u32,
    /// Id of the marked enemy, cleared when that enemy is removed.
    pub marked_enemy: Option<u32>,
    /// Probability the mercy roll downgrades incoming damage to 1.
    /// Tests pin this to 0.0 or 1.0 for determinism.
    pub mercy_chance: f64,
}

impl Player {
    pub fn new(character: CharacterKind) -> Self {
        let (speed, max_health) = character.stats();
        let mut player = Player {
            character,
            x: 0.0,
            y: 0.0,
            speed,
            health: max_health,
            max_health,
            state: PlayerState::Alive,
            downed_timer: 0,
            facing: (1.0, 0.0),
            weapons: Vec::new(),
            current_weapon: 0,
            combo: 0,
            combo_timer: 0,
            score: 0,
            legacy_points: 0,
            ability_cooldown: 0,
            ability_duration: 0,
            marked_enemy: None,
            mercy_chance: 0.3,
        };
        player.reset();
        player
    }

    /// Back to a level start: bare hands, full health, all progress
    /// counters cleared.  Used for game start and level restarts.
    pub fn reset(&mut self) {
        self.x = 100.0;
        self.y = 100.0;
        self.health = self.max_health;
        self.state = PlayerState::Alive;
        self.downed_timer = 0;
        self.facing = (1.0, 0.0);
        self.weapons = vec![Weapon::new(WeaponKind::Fists)];
        self.current_weapon = 0;
        self.combo = 0;
        self.combo_timer = 0;
        self.score = 0;
        self.legacy_points = 0;
        self.ability_cooldown = 0;
        self.ability_duration = 0;
        self.marked_enemy = None;
    }

    pub fn hitbox(&self) -> Rect {
        geometry::entity_rect(self.x, self.y)
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.current_weapon]
    }

    /// Move along the intent vector, rejecting the whole step on any wall
    /// overlap (no axis sliding).  Facing updates on non-zero intent.
    /// No-op unless Alive.
    pub fn move_by(&mut self, dx: f32, dy: f32, walls: &[Rect]) {
        if self.state != PlayerState::Alive {
            return;
        }

        let new_x = self.x + dx * self.speed;
        let new_y = self.y + dy * self.speed;
        let future = geometry::entity_rect(new_x, new_y);
        if !walls.iter().any(|w| future.intersects(w)) {
            self.x = new_x;
            self.y = new_y;
        }
        if dx != 0.0 || dy != 0.0 {
            self.facing = (dx, dy);
        }
    }

    /// Attack with the current weapon.  Ranged weapons return a projectile;
    /// melee weapons knock down every Alive enemy caught in the sweep.
    /// No-op unless Alive and the weapon is eligible.
    pub fn attack(&mut self, enemies: &mut [Enemy]) -> Option<Projectile> {
        if self.state != PlayerState::Alive {
            return None;
        }
        if !self.weapon_mut().attack() {
            return None;
        }

        let weapon = self.weapon().clone();
        if weapon.is_ranged {
            let (cx, cy) = self.hitbox().center();
            return Some(Projectile::new(
                cx,
                cy,
                self.facing.0,
                self.facing.1,
                weapon.damage,
                weapon.range,
                weapon.kind,
            ));
        }

        // Melee sweep: a square of the weapon's reach, extended forward.
        let sweep = Rect::new(
            self.x + self.facing.0 * weapon.range,
            self.y + self.facing.1 * weapon.range,
            weapon.range,
            weapon.range,
        );
        for enemy in enemies.iter_mut() {
            if enemy.state == EnemyState::Alive && sweep.intersects(&enemy.hitbox()) {
                enemy.stun(STUN_TICKS);
                self.combo += 1;
                self.combo_timer = COMBO_DECAY;
                self.score += STUN_SCORE * self.combo;
                self.legacy_points += 1;
            }
        }
        None
    }

    /// Finish the first stunned enemy in a short sweep ahead of the player.
    /// Ranged executes (the "headshot") score higher than melee ones.
    /// No-op unless Alive.
    pub fn execute_enemy(&mut self, enemies: &mut [Enemy]) -> bool {
        if self.state != PlayerState::Alive {
            return false;
        }

        let sweep = Rect::new(
            self.x + self.facing.0 * 50.0,
            self.y + self.facing.1 * 50.0,
            60.0,
            60.0,
        );
        let ranged = self.weapon().is_ranged;
        for enemy in enemies.iter_mut() {
            if enemy.state == EnemyState::Stunned && sweep.intersects(&enemy.hitbox()) {
                enemy.kill();
                self.score += if ranged {
                    EXECUTE_SCORE_RANGED
                } else {
                    EXECUTE_SCORE_MELEE
                };
                return true;
            }
        }
        false
    }

    /// Trigger the character's mask ability.  No-op while on cooldown or
    /// not Alive; abilities that need a target also no-op when none exists
    /// (and leave the cooldown untouched).
    pub fn use_ability(
        &mut self,
        enemies: &mut [Enemy],
        rng: &mut impl Rng,
    ) -> Option<AbilityEffect> {
        if self.state != PlayerState::Alive || self.ability_cooldown > 0 {
            return None;
        }

        match self.character.ability() {
            AbilityKind::SlowTime => {
                self.ability_duration = 180;
                self.ability_cooldown = 600;
                Some(AbilityEffect::Message("TIME DILATION ACTIVE"))
            }
            AbilityKind::MarkEnemy => {
                let alive: Vec<u32> = enemies
                    .iter()
                    .filter(|e| e.state == EnemyState::Alive)
                    .map(|e| e.id)
                    .collect();
                let id = *alive.choose(rng)?;
                self.marked_enemy = Some(id);
                self.ability_cooldown = 300;
                Some(AbilityEffect::Message("ENEMY MARKED"))
            }
            AbilityKind::Berserk => {
                self.ability_duration = 120;
                self.ability_cooldown = 480;
                Some(AbilityEffect::Message("BERSERK MODE"))
            }
            AbilityKind::ExecuteNearest => {
                let (px, py) = (self.x, self.y);
                let target = enemies
                    .iter_mut()
                    .filter(|e| e.state == EnemyState::Alive)
                    .map(|e| {
                        let d = geometry::distance(e.x, e.y, px, py);
                        (d, e)
                    })
                    .filter(|(d, _)| *d < ABILITY_EXECUTE_RADIUS)
                    .min_by(|a, b| a.0.total_cmp(&b.0))?
                    .1;
                target.kill();
                self.ability_cooldown = 300;
                Some(AbilityEffect::Message("TARGET EXECUTED"))
            }
            AbilityKind::Grenade => {
                self.ability_cooldown = 600;
                let (cx, cy) = self.hitbox().center();
                Some(AbilityEffect::Thrown(Grenade::new(
                    cx,
                    cy,
                    self.facing.0,
                    self.facing.1,
                )))
            }
        }
    }

    /// Take a hit.  The mercy roll downgrades the damage to a single
    /// health point; dropping to 0 or below enters Downed with the
    /// recovery timer running and health pinned to 1.  No-op unless Alive.
    pub fn take_damage(&mut self, amount: i32, rng: &mut impl Rng) {
        if self.state != PlayerState::Alive {
            return;
        }

        if rng.gen_bool(self.mercy_chance) {
            self.health -= 1;
        } else {
            self.health -= amount;
        }

        if self.health <= 0 {
            self.state = PlayerState::Downed;
            self.downed_timer = DOWNED_TICKS;
            self.health = 1;
        }
    }

    /// One simulation tick: countdowns only.  Returns a status message
    /// when the player gets back up.
    pub fn update(&mut self) -> Option<&'static str> {
        let mut recovered = None;
        if self.state == PlayerState::Downed {
            self.downed_timer = self.downed_timer.saturating_sub(1);
            if self.downed_timer == 0 {
                self.state = PlayerState::Alive;
                recovered = Some("BACK ON YOUR FEET");
            }
        }

        for weapon in &mut self.weapons {
            weapon.tick();
        }
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);
        self.ability_duration = self.ability_duration.saturating_sub(1);

        if self.combo_timer > 0 {
            self.combo_timer -= 1;
        } else {
            self.combo = 0;
        }
        recovered
    }

    /// Cycle the active weapon.  No-op unless Alive.
    pub fn switch_weapon(&mut self, direction: i32) {
        if self.state != PlayerState::Alive {
            return;
        }
        let len = self.weapons.len() as i32;
        self.current_weapon = (self.current_weapon as i32 + direction).rem_euclid(len) as usize;
    }

    /// Pick up a weapon.  Owning it already refills its ammo instead;
    /// returns `true` only when the weapon is newly added.
    pub fn add_weapon(&mut self, kind: WeaponKind) -> bool {
        if self.state != PlayerState::Alive {
            return false;
        }
        for weapon in &mut self.weapons {
            if weapon.kind == kind {
                weapon.ammo = weapon.max_ammo;
                return false;
            }
        }
        self.weapons.push(Weapon::new(kind));
        true
    }
}
