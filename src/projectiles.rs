//! Ballistic and timed entities: bullets, grenades and the cosmetic
//! blood particles emitted when an enemy dies.

use rand::Rng;

use crate::enemy::{Enemy, EnemyState};
use crate::geometry::{self, Rect};
use crate::weapons::WeaponKind;

/// Pixels a bullet advances per tick, along the shooter's facing.
const PROJECTILE_SPEED: f32 = 15.0;
/// Pixels a grenade advances per tick.
const GRENADE_SPEED: f32 = 5.0;
/// Ticks until a grenade detonates on its own.
const GRENADE_FUSE: u32 = 90;
/// Every enemy whose center is closer than this to the blast dies.
pub const BLAST_RADIUS: f32 = 150.0;

/// What a projectile struck this tick, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileHit {
    Wall,
    /// Id of the enemy that absorbed the bullet.
    Enemy(u32),
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub damage: i32,
    pub range: f32,
    pub traveled: f32,
    /// Kind of the weapon that fired this — presentation only.
    pub kind: WeaponKind,
    pub active: bool,
}

impl Projectile {
    /// Spawn at `(x, y)` travelling along the unit-ish direction `(dx, dy)`.
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, damage: i32, range: f32, kind: WeaponKind) -> Self {
        Projectile {
            x,
            y,
            vx: dx * PROJECTILE_SPEED,
            vy: dy * PROJECTILE_SPEED,
            damage,
            range,
            traveled: 0.0,
            kind,
            active: true,
        }
    }

    fn hitbox(&self) -> Rect {
        Rect::new(self.x - 3.0, self.y - 3.0, 6.0, 6.0)
    }

    /// Advance one tick.  Deactivates on a wall hit, on striking the first
    /// ALIVE enemy (applying damage), or silently once the configured range
    /// is exhausted.
    pub fn update(&mut self, walls: &[Rect], enemies: &mut [Enemy]) -> Option<ProjectileHit> {
        if !self.active {
            return None;
        }

        self.x += self.vx;
        self.y += self.vy;
        self.traveled += (self.vx * self.vx + self.vy * self.vy).sqrt();

        let hitbox = self.hitbox();
        for wall in walls {
            if hitbox.intersects(wall) {
                self.active = false;
                return Some(ProjectileHit::Wall);
            }
        }

        for enemy in enemies.iter_mut() {
            if enemy.state == EnemyState::Alive && hitbox.intersects(&enemy.hitbox()) {
                enemy.take_damage(self.damage);
                self.active = false;
                return Some(ProjectileHit::Enemy(enemy.id));
            }
        }

        if self.traveled >= self.range {
            self.active = false;
        }
        None
    }
}

#[derive(Clone, Debug)]
pub struct Grenade {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub fuse: u32,
    pub exploded: bool,
}

impl Grenade {
    pub fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Grenade {
            x,
            y,
            vx: dx * GRENADE_SPEED,
            vy: dy * GRENADE_SPEED,
            fuse: GRENADE_FUSE,
            exploded: false,
        }
    }

    fn hitbox(&self) -> Rect {
        Rect::new(self.x - 8.0, self.y - 8.0, 16.0, 16.0)
    }

    /// Advance one tick; returns `true` once the grenade has resolved
    /// (detonated on wall contact or fuse expiry) and can be pruned.
    pub fn update(&mut self, walls: &[Rect], enemies: &mut [Enemy]) -> bool {
        if self.exploded {
            return true;
        }

        self.x += self.vx;
        self.y += self.vy;
        self.fuse = self.fuse.saturating_sub(1);

        let hitbox = self.hitbox();
        if walls.iter().any(|w| hitbox.intersects(w)) || self.fuse == 0 {
            self.explode(enemies);
            return true;
        }
        false
    }

    /// Kill every enemy within the blast radius, stunned or not.
    pub fn explode(&mut self, enemies: &mut [Enemy]) {
        self.exploded = true;
        for enemy in enemies.iter_mut() {
            let (ex, ey) = enemy.hitbox().center();
            if geometry::distance(ex, ey, self.x, self.y) < BLAST_RADIUS {
                enemy.kill();
            }
        }
    }
}

// ── Blood particles ───────────────────────────────────────────────────────────

/// Particles emitted per enemy death.
const BURST_COUNT: usize = 20;

/// Purely cosmetic: no collision, pruned by age.
#[derive(Clone, Debug)]
pub struct BloodParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: u32,
}

impl BloodParticle {
    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
    }

    pub fn expired(&self) -> bool {
        self.life == 0
    }
}

/// Fixed-count burst centred on a death location.
pub fn blood_burst(cx: f32, cy: f32, rng: &mut impl Rng) -> Vec<BloodParticle> {
    (0..BURST_COUNT)
        .map(|_| BloodParticle {
            x: cx,
            y: cy,
            vx: rng.gen_range(-8.0..8.0),
            vy: rng.gen_range(-8.0..8.0),
            life: rng.gen_range(30..60),
        })
        .collect()
}
