use aftermath::enemy::EnemyState;
use aftermath::geometry::{Rect, ENTITY_SIZE, TILE};
use aftermath::level::{Level, ARENA_H, ARENA_W};
use aftermath::player::{CharacterKind, Player};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Generation ────────────────────────────────────────────────────────────────

#[test]
fn same_seed_reproduces_the_same_level() {
    let a = Level::new(3, CharacterKind::Veteran, 10, &mut seeded_rng());
    let b = Level::new(3, CharacterKind::Veteran, 10, &mut seeded_rng());

    assert_eq!(a.walls, b.walls);
    assert_eq!(a.enemies.len(), b.enemies.len());
    for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
        assert_eq!((ea.x, ea.y), (eb.x, eb.y));
        assert_eq!(ea.kind, eb.kind);
    }
    assert_eq!(a.pickups.len(), b.pickups.len());
}

#[test]
fn arena_border_is_fully_walled() {
    let level = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    for rect in [
        Rect::new(0.0, 0.0, TILE, TILE),
        Rect::new(0.0, ARENA_H - TILE, TILE, TILE),
        Rect::new(ARENA_W - TILE, 0.0, TILE, TILE),
    ] {
        assert!(
            level.walls.contains(&rect),
            "missing border tile at ({}, {})",
            rect.x,
            rect.y
        );
    }
}

#[test]
fn enemy_count_scales_with_level_index() {
    let first = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    assert_eq!(first.enemies.len(), 3);

    let ninth = Level::new(9, CharacterKind::Investigator, 0, &mut seeded_rng());
    assert_eq!(ninth.enemies.len(), 6);
}

#[test]
fn legacy_points_add_enemies_up_to_a_cap() {
    let some = Level::new(1, CharacterKind::Veteran, 30, &mut seeded_rng());
    assert_eq!(some.enemies.len(), 3 + 2);

    let capped = Level::new(1, CharacterKind::Veteran, 10_000, &mut seeded_rng());
    assert_eq!(capped.enemies.len(), 3 + 8);
}

#[test]
fn spawned_entities_never_overlap_walls() {
    let level = Level::new(7, CharacterKind::Investigator, 50, &mut seeded_rng());
    for enemy in &level.enemies {
        let hitbox = enemy.hitbox();
        assert!(
            !level.walls.iter().any(|w| hitbox.intersects(w)),
            "enemy spawned inside a wall at ({}, {})",
            enemy.x,
            enemy.y
        );
    }
    for pickup in &level.pickups {
        let probe = Rect::new(pickup.x, pickup.y, ENTITY_SIZE, ENTITY_SIZE);
        assert!(!level.walls.iter().any(|w| probe.intersects(w)));
    }
}

#[test]
fn first_level_has_no_pickups() {
    let level = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    assert!(level.pickups.is_empty());
}

#[test]
fn pickup_count_grows_with_the_index() {
    let fifth = Level::new(5, CharacterKind::Veteran, 0, &mut seeded_rng());
    assert_eq!(fifth.pickups.len(), 2);

    // Deep into the campaign the whole catalog is dealt
    let late = Level::new(24, CharacterKind::Soldier, 0, &mut seeded_rng());
    assert_eq!(late.pickups.len(), 7);
}

#[test]
fn enemy_ids_are_unique() {
    let level = Level::new(10, CharacterKind::Investigator, 100, &mut seeded_rng());
    let mut ids: Vec<u32> = level.enemies.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), level.enemies.len());
}

// ── Completion ────────────────────────────────────────────────────────────────

#[test]
fn level_is_not_complete_away_from_the_exit() {
    let mut level = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    let player = Player::new(CharacterKind::Veteran); // at spawn
    for enemy in &mut level.enemies {
        enemy.kill();
    }
    assert!(!level.is_complete(&player));
}

#[test]
fn level_is_not_complete_while_an_enemy_lives() {
    let level = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    let mut player = Player::new(CharacterKind::Veteran);
    player.x = level.exit_point.0;
    player.y = level.exit_point.1;
    assert!(level.any_enemy_alive());
    assert!(!level.is_complete(&player));
}

#[test]
fn level_completes_at_the_exit_once_everyone_is_down() {
    let mut level = Level::new(1, CharacterKind::Veteran, 0, &mut seeded_rng());
    let mut player = Player::new(CharacterKind::Veteran);
    player.x = level.exit_point.0;
    player.y = level.exit_point.1;
    for enemy in &mut level.enemies {
        enemy.kill();
    }
    assert_eq!(
        level.enemies.iter().filter(|e| e.state == EnemyState::Dead).count(),
        level.enemies.len()
    );
    assert!(level.is_complete(&player));
}
