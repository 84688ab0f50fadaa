//! Procedural level assembly: border walls, one of six obstacle layouts
//! chosen by level index, then enemy and pickup population scaled by the
//! player's legacy points.  All randomness flows through the injected RNG
//! so a seeded generator reproduces a layout exactly.

use rand::Rng;

use crate::enemy::{Enemy, EnemyKind, EnemyState};
use crate::geometry::{self, Rect, ENTITY_SIZE, TILE};
use crate::player::{CharacterKind, Player};
use crate::weapons::WeaponKind;

pub const ARENA_W: f32 = 1024.0;
pub const ARENA_H: f32 = 768.0;

/// Pickup order for levels past the first; the catalog is dealt from the
/// front, one of each kind.
const PICKUP_CATALOG: [WeaponKind; 7] = [
    WeaponKind::Knife,
    WeaponKind::Club,
    WeaponKind::Pistol,
    WeaponKind::Shotgun,
    WeaponKind::RapidFire,
    WeaponKind::Blade,
    WeaponKind::BattleRifle,
];

/// Archetype draw pool: 50% guard, 20% heavy, 20% fast, 10% sniper.
const ENEMY_POOL: [EnemyKind; 10] = [
    EnemyKind::Guard,
    EnemyKind::Guard,
    EnemyKind::Guard,
    EnemyKind::Guard,
    EnemyKind::Guard,
    EnemyKind::Heavy,
    EnemyKind::Heavy,
    EnemyKind::Fast,
    EnemyKind::Fast,
    EnemyKind::Sniper,
];

#[derive(Clone, Debug)]
pub struct WeaponPickup {
    pub x: f32,
    pub y: f32,
    pub kind: WeaponKind,
}

impl WeaponPickup {
    pub fn hitbox(&self) -> Rect {
        geometry::entity_rect(self.x, self.y)
    }
}

#[derive(Clone, Debug)]
pub struct Level {
    pub index: u32,
    pub character: CharacterKind,
    /// Snapshot of the player's legacy points at generation time.
    pub legacy_points: u32,
    pub walls: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<WeaponPickup>,
    pub spawn_point: (f32, f32),
    pub exit_point: (f32, f32),
    next_enemy_id: u32,
}

impl Level {
    pub fn new(index: u32, character: CharacterKind, legacy_points: u32, rng: &mut impl Rng) -> Self {
        let mut level = Level {
            index,
            character,
            legacy_points,
            walls: Vec::new(),
            enemies: Vec::new(),
            pickups: Vec::new(),
            spawn_point: (100.0, 100.0),
            exit_point: (900.0, 600.0),
            next_enemy_id: 0,
        };
        level.generate(rng);
        level
    }

    /// Rebuild the level from scratch: border, layout, enemies, pickups.
    pub fn generate(&mut self, rng: &mut impl Rng) {
        self.walls.clear();
        self.enemies.clear();
        self.pickups.clear();
        self.next_enemy_id = 0;

        // Full border, one tile thick.
        let mut x = 0.0;
        while x < ARENA_W {
            self.walls.push(Rect::new(x, 0.0, TILE, TILE));
            self.walls.push(Rect::new(x, ARENA_H - TILE, TILE, TILE));
            x += TILE;
        }
        let mut y = TILE;
        while y < ARENA_H - TILE {
            self.walls.push(Rect::new(0.0, y, TILE, TILE));
            self.walls.push(Rect::new(ARENA_W - TILE, y, TILE, TILE));
            y += TILE;
        }

        match (self.index as usize + 5) % 6 {
            0 => self.layout_office(rng),
            1 => self.layout_urban(rng),
            2 => self.layout_club(rng),
            3 => self.layout_warehouse(),
            4 => self.layout_suburban(rng),
            _ => self.layout_military(),
        }

        // Enemy count grows with the level index and with legacy carried
        // over from earlier runs, capped at +8.
        let base = 3 + self.index / 3;
        let count = base + (self.legacy_points / 15).min(8);
        for _ in 0..count {
            let (x, y) = self.find_valid_position(rng);
            let kind = ENEMY_POOL[rng.gen_range(0..ENEMY_POOL.len())];
            let id = self.next_enemy_id;
            self.next_enemy_id += 1;
            self.enemies.push(Enemy::new(id, x, y, kind, rng));
        }

        if self.index > 1 {
            let count = ((1 + self.index / 4) as usize).min(PICKUP_CATALOG.len());
            for kind in PICKUP_CATALOG.iter().take(count) {
                let (x, y) = self.find_valid_position(rng);
                self.pickups.push(WeaponPickup { x, y, kind: *kind });
            }
        }
    }

    /// Rejection-sample a spot whose entity box touches no wall.
    fn find_valid_position(&self, rng: &mut impl Rng) -> (f32, f32) {
        loop {
            let x = rng.gen_range(100.0..ARENA_W - 100.0);
            let y = rng.gen_range(100.0..ARENA_H - 100.0);
            let probe = Rect::new(x, y, ENTITY_SIZE, ENTITY_SIZE);
            if !self.walls.iter().any(|w| probe.intersects(w)) {
                return (x, y);
            }
        }
    }

    // ── Layout generators ─────────────────────────────────────────────────────

    /// Office floor: a grid of cubicles, most with a desk inside.
    fn layout_office(&mut self, rng: &mut impl Rng) {
        let mut x = 200.0;
        while x < 700.0 {
            let mut y = 150.0;
            while y < 550.0 {
                self.walls.push(Rect::new(x, y, 100.0, 80.0));
                if rng.gen::<f32>() > 0.3 {
                    self.walls.push(Rect::new(x + 20.0, y + 60.0, 60.0, 20.0));
                }
                y += 120.0;
            }
            x += 150.0;
        }
    }

    /// City block: hollow buildings with randomly boarded windows.
    fn layout_urban(&mut self, rng: &mut impl Rng) {
        let buildings = [
            (150.0, 150.0, 200.0, 300.0),
            (500.0, 200.0, 180.0, 250.0),
            (300.0, 400.0, 250.0, 200.0),
            (700.0, 100.0, 150.0, 200.0),
        ];
        for (bx, by, w, h) in buildings {
            self.hollow_box(bx, by, w, h);
            let cols = (w / TILE) as i32;
            let rows = (h / TILE) as i32;
            for i in 1..cols - 1 {
                for j in 1..rows - 1 {
                    if rng.gen::<f32>() > 0.5 {
                        self.walls.push(Rect::new(
                            bx + i as f32 * TILE + 10.0,
                            by + j as f32 * TILE + 10.0,
                            TILE - 20.0,
                            TILE - 20.0,
                        ));
                    }
                }
            }
        }
    }

    /// Nightclub: bar, stage, pillars and a cluttered dance floor.
    fn layout_club(&mut self, rng: &mut impl Rng) {
        self.walls.push(Rect::new(200.0, 150.0, 400.0, 50.0)); // bar
        self.walls.push(Rect::new(200.0, 400.0, 400.0, 50.0)); // stage

        for x in [150.0, 650.0] {
            for y in [200.0, 300.0, 500.0] {
                self.walls.push(Rect::new(x, y, 40.0, 40.0));
            }
        }

        let mut x = 300.0;
        while x < 600.0 {
            let mut y = 250.0;
            while y < 350.0 {
                if rng.gen::<f32>() > 0.7 {
                    self.walls.push(Rect::new(x, y, 30.0, 30.0));
                }
                y += 50.0;
            }
            x += 50.0;
        }
    }

    /// Warehouse: long aisles of racking and shelving.
    fn layout_warehouse(&mut self) {
        let mut x = 200.0;
        while x < 800.0 {
            self.walls.push(Rect::new(x, 200.0, 50.0, 400.0));
            x += 200.0;
        }
        let mut y = 250.0;
        while y < 600.0 {
            self.walls.push(Rect::new(250.0, y, 300.0, 20.0));
            y += 100.0;
        }
    }

    /// Suburb: small hollow houses, each with a door gap marker.
    fn layout_suburban(&mut self, rng: &mut impl Rng) {
        let houses = [
            (200.0, 200.0, 150.0, 120.0),
            (500.0, 250.0, 140.0, 110.0),
            (300.0, 450.0, 160.0, 130.0),
            (650.0, 350.0, 130.0, 100.0),
        ];
        for (hx, hy, w, h) in houses {
            self.hollow_box(hx, hy, w, h);
            let cols = (w / TILE) as i32;
            let door = rng.gen_range(1..(cols - 1).max(2));
            self.walls
                .push(Rect::new(hx + door as f32 * TILE, hy + h - TILE, TILE, 20.0));
        }
    }

    /// Compound: barracks, watchtowers and rows of barricades.
    fn layout_military(&mut self) {
        self.walls.push(Rect::new(300.0, 200.0, 200.0, 150.0)); // barracks
        self.walls.push(Rect::new(150.0, 150.0, 50.0, 80.0)); // west tower
        self.walls.push(Rect::new(750.0, 150.0, 50.0, 80.0)); // east tower

        let mut x = 200.0;
        while x < 700.0 {
            self.walls.push(Rect::new(x, 400.0, 60.0, 20.0));
            self.walls.push(Rect::new(x, 500.0, 60.0, 20.0));
            x += 100.0;
        }
    }

    /// Tile a rectangular perimeter, leaving the interior open.
    fn hollow_box(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let mut i = 0.0;
        while i < w {
            let mut j = 0.0;
            while j < h {
                if i == 0.0 || i >= w - TILE || j == 0.0 || j >= h - TILE {
                    self.walls.push(Rect::new(x + i, y + j, TILE, TILE));
                }
                j += TILE;
            }
            i += TILE;
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn exit_rect(&self) -> Rect {
        Rect::new(self.exit_point.0, self.exit_point.1, TILE, TILE)
    }

    pub fn any_enemy_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.state == EnemyState::Alive)
    }

    /// Complete iff the player overlaps the exit tile and no enemy is
    /// still Alive.
    pub fn is_complete(&self, player: &Player) -> bool {
        self.exit_rect().intersects(&player.hitbox()) && !self.any_enemy_alive()
    }
}
