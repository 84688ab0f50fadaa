//! Enemy AI: a per-instance state machine over {Alive, Stunned, Dead}.
//!
//! Stunned is entered only by a player melee hit and times out back to
//! Alive; Dead is terminal.  Pursuit is a straight line toward the player
//! with whole-move wall rejection — no pathfinding.

use rand::Rng;

use crate::geometry::{self, Rect};
use crate::player::{Player, PlayerState};
use crate::projectiles::Projectile;
use crate::weapons::{Weapon, WeaponKind, LETHAL};

/// Cooldown after an enemy lands a melee strike.
const MELEE_COOLDOWN: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Guard,
    Heavy,
    Fast,
    Sniper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Alive,
    Stunned,
    Dead,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Stable identifier; non-owning references (the player's mark) hold
    /// this instead of an index so removal stays safe.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub health: i32,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub state: EnemyState,
    pub stun_timer: u32,
    pub attack_cooldown: u32,
    pub weapon: Option<Weapon>,
}

impl Enemy {
    pub fn new(id: u32, x: f32, y: f32, kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let (health, speed, detection_range, attack_range) = match kind {
            EnemyKind::Guard => (1, 2.0, 150.0, 50.0),
            EnemyKind::Heavy => (2, 1.5, 150.0, 50.0),
            EnemyKind::Fast => (1, 3.5, 150.0, 50.0),
            EnemyKind::Sniper => (1, 2.0, 300.0, 250.0),
        };
        // Snipers always carry a gun; the rest are armed on a coin flip.
        let armed = kind == EnemyKind::Sniper || rng.gen_bool(0.5);
        let weapon = armed.then(|| {
            let kinds = [WeaponKind::Pistol, WeaponKind::Knife, WeaponKind::Club];
            Weapon::new(kinds[rng.gen_range(0..kinds.len())])
        });
        Enemy {
            id,
            x,
            y,
            kind,
            health,
            speed,
            detection_range,
            attack_range,
            state: EnemyState::Alive,
            stun_timer: 0,
            attack_cooldown: 0,
            weapon,
        }
    }

    pub fn hitbox(&self) -> Rect {
        geometry::entity_rect(self.x, self.y)
    }

    /// Knock the enemy down for `ticks`.  Only Alive enemies can be stunned.
    pub fn stun(&mut self, ticks: u32) {
        if self.state == EnemyState::Alive {
            self.state = EnemyState::Stunned;
            self.stun_timer = ticks;
        }
    }

    /// Unconditional kill (execute, grenade blast).
    pub fn kill(&mut self) {
        self.health = 0;
        self.state = EnemyState::Dead;
    }

    /// Apply damage; returns `true` iff this hit killed the enemy.
    /// No-op unless Alive.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.state != EnemyState::Alive {
            return false;
        }
        self.health -= damage;
        if self.health <= 0 {
            self.state = EnemyState::Dead;
            return true;
        }
        false
    }

    /// One AI tick.  May return a projectile fired at the player.
    pub fn update(
        &mut self,
        player: &mut Player,
        walls: &[Rect],
        rng: &mut impl Rng,
    ) -> Option<Projectile> {
        match self.state {
            EnemyState::Dead => return None,
            EnemyState::Stunned => {
                self.stun_timer = self.stun_timer.saturating_sub(1);
                if self.stun_timer == 0 {
                    self.state = EnemyState::Alive;
                }
                return None;
            }
            EnemyState::Alive => {}
        }

        let mut fired = None;
        let dx = player.x - self.x;
        let dy = player.y - self.y;
        let dist = geometry::distance(self.x, self.y, player.x, player.y);

        if dist < self.detection_range && player.state == PlayerState::Alive {
            let (nx, ny) = if dist > 0.0 {
                (dx / dist, dy / dist)
            } else {
                (0.0, 0.0)
            };

            if self.kind == EnemyKind::Sniper {
                // Snipers hold position and fire from range.
                if dist < self.attack_range && self.attack_cooldown == 0 {
                    fired = self.fire(nx, ny);
                }
            } else {
                let new_x = self.x + nx * self.speed;
                let new_y = self.y + ny * self.speed;
                let future = geometry::entity_rect(new_x, new_y);
                if !walls.iter().any(|w| future.intersects(w)) {
                    self.x = new_x;
                    self.y = new_y;
                }

                if dist < self.attack_range && self.attack_cooldown == 0 {
                    if self.weapon.as_ref().map_or(false, |w| w.is_ranged) {
                        fired = self.fire(nx, ny);
                    } else {
                        player.take_damage(LETHAL, rng);
                        self.attack_cooldown = MELEE_COOLDOWN;
                    }
                }
            }
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        if let Some(weapon) = self.weapon.as_mut() {
            weapon.tick();
        }
        fired
    }

    /// Fire the carried ranged weapon along `(dx, dy)`, if eligible.
    fn fire(&mut self, dx: f32, dy: f32) -> Option<Projectile> {
        let (cx, cy) = self.hitbox().center();
        let weapon = self.weapon.as_mut()?;
        if !weapon.is_ranged || !weapon.attack() {
            return None;
        }
        self.attack_cooldown = weapon.cooldown_ticks;
        Some(Projectile::new(
            cx,
            cy,
            dx,
            dy,
            weapon.damage,
            weapon.range,
            weapon.kind,
        ))
    }
}
