use aftermath::enemy::{Enemy, EnemyKind, EnemyState};
use aftermath::geometry::Rect;
use aftermath::player::{AbilityEffect, CharacterKind, Player, PlayerState, DOWNED_TICKS};
use aftermath::weapons::WeaponKind;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn guard(id: u32, x: f32, y: f32) -> Enemy {
    let mut enemy = Enemy::new(id, x, y, EnemyKind::Guard, &mut seeded_rng());
    enemy.weapon = None;
    enemy
}

// ── Character roster ──────────────────────────────────────────────────────────

#[test]
fn characters_start_with_their_own_stats() {
    let veteran = Player::new(CharacterKind::Veteran);
    assert_eq!((veteran.speed, veteran.max_health), (4.0, 3));

    let soldier = Player::new(CharacterKind::Soldier);
    assert_eq!((soldier.speed, soldier.max_health), (4.2, 4));

    let successor = Player::new(CharacterKind::Successor);
    assert_eq!((successor.speed, successor.max_health), (4.5, 2));
}

#[test]
fn fresh_player_carries_only_fists() {
    let player = Player::new(CharacterKind::Veteran);
    assert_eq!(player.weapons.len(), 1);
    assert_eq!(player.weapon().kind, WeaponKind::Fists);
    assert_eq!(player.state, PlayerState::Alive);
    assert_eq!(player.health, player.max_health);
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[test]
fn movement_scales_by_speed_and_updates_facing() {
    let mut player = Player::new(CharacterKind::Veteran); // at (100, 100)
    player.move_by(0.0, 1.0, &[]);
    assert_eq!((player.x, player.y), (100.0, 104.0));
    assert_eq!(player.facing, (0.0, 1.0));
}

#[test]
fn movement_into_a_wall_is_rejected_whole() {
    let mut player = Player::new(CharacterKind::Veteran);
    let walls = [Rect::new(140.0, 90.0, 64.0, 64.0)];

    player.move_by(1.0, 0.0, &walls);
    assert_eq!((player.x, player.y), (100.0, 100.0));
    // Facing still tracks the attempted direction
    assert_eq!(player.facing, (1.0, 0.0));

    player.move_by(-1.0, 0.0, &walls);
    assert_eq!(player.x, 96.0);
}

#[test]
fn downed_player_cannot_move() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.state = PlayerState::Downed;
    player.move_by(1.0, 0.0, &[]);
    assert_eq!((player.x, player.y), (100.0, 100.0));
}

// ── Damage and the mercy roll ─────────────────────────────────────────────────

#[test]
fn lethal_hit_downs_the_player_when_mercy_never_rolls() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    player.mercy_chance = 0.0;

    player.take_damage(999, &mut rng);
    assert_eq!(player.state, PlayerState::Downed);
    assert_eq!(player.health, 1);
    assert_eq!(player.downed_timer, DOWNED_TICKS);
}

#[test]
fn three_single_point_hits_down_a_veteran() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran); // 3 health
    player.mercy_chance = 0.0;

    player.take_damage(1, &mut rng);
    player.take_damage(1, &mut rng);
    assert_eq!(player.state, PlayerState::Alive);

    player.take_damage(1, &mut rng);
    assert_eq!(player.state, PlayerState::Downed);
    assert_eq!(player.health, 1);
}

#[test]
fn mercy_roll_downgrades_every_hit_to_one_point() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    player.mercy_chance = 1.0;

    player.take_damage(999, &mut rng);
    assert_eq!(player.health, 2);
    player.take_damage(999, &mut rng);
    assert_eq!(player.health, 1);
    assert_eq!(player.state, PlayerState::Alive);

    player.take_damage(999, &mut rng);
    assert_eq!(player.state, PlayerState::Downed);
}

#[test]
fn downed_player_takes_no_further_damage() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    player.mercy_chance = 0.0;

    player.take_damage(999, &mut rng);
    let timer = player.downed_timer;
    player.take_damage(999, &mut rng);
    assert_eq!(player.state, PlayerState::Downed);
    assert_eq!(player.downed_timer, timer);
}

#[test]
fn downed_player_gets_back_up_after_the_timer() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    player.mercy_chance = 0.0;
    player.take_damage(999, &mut rng);

    let mut recovered = None;
    for _ in 0..DOWNED_TICKS {
        recovered = player.update();
    }
    assert_eq!(recovered, Some("BACK ON YOUR FEET"));
    assert_eq!(player.state, PlayerState::Alive);
    assert_eq!(player.health, 1);
}

// ── Melee, combo and executes ─────────────────────────────────────────────────

#[test]
fn melee_sweep_stuns_every_enemy_it_covers() {
    let mut player = Player::new(CharacterKind::Veteran); // fists, range 35
    player.facing = (1.0, 0.0);
    let mut enemies = vec![guard(0, 140.0, 100.0), guard(1, 150.0, 110.0)];

    let projectile = player.attack(&mut enemies);
    assert!(projectile.is_none());
    assert_eq!(enemies[0].state, EnemyState::Stunned);
    assert_eq!(enemies[1].state, EnemyState::Stunned);

    // Combo scored per enemy: 10 * 1 + 10 * 2
    assert_eq!(player.combo, 2);
    assert_eq!(player.score, 30);
    assert_eq!(player.legacy_points, 2);
}

#[test]
fn melee_sweep_ignores_already_stunned_enemies() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.facing = (1.0, 0.0);
    let mut enemies = vec![guard(0, 140.0, 100.0)];
    enemies[0].stun(500);

    player.attack(&mut enemies);
    assert_eq!(player.combo, 0);
    assert_eq!(player.score, 0);
}

#[test]
fn combo_decays_without_a_fresh_hit() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.facing = (1.0, 0.0);
    let mut enemies = vec![guard(0, 140.0, 100.0)];
    player.attack(&mut enemies);
    assert_eq!(player.combo, 1);

    for _ in 0..61 {
        player.update();
    }
    assert_eq!(player.combo, 0);
}

#[test]
fn execute_finishes_a_stunned_enemy_ahead() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.facing = (1.0, 0.0);
    let mut enemies = vec![guard(3, 160.0, 110.0)];
    enemies[0].stun(500);

    assert!(player.execute_enemy(&mut enemies));
    assert_eq!(enemies[0].state, EnemyState::Dead);
    assert_eq!(player.score, 50);
}

#[test]
fn ranged_execute_scores_higher() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.facing = (1.0, 0.0);
    player.add_weapon(WeaponKind::Pistol);
    player.current_weapon = 1;
    let mut enemies = vec![guard(3, 160.0, 110.0)];
    enemies[0].stun(500);

    assert!(player.execute_enemy(&mut enemies));
    assert_eq!(player.score, 75);
}

#[test]
fn execute_refuses_enemies_that_are_not_stunned() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.facing = (1.0, 0.0);
    let mut enemies = vec![guard(3, 160.0, 110.0)];

    assert!(!player.execute_enemy(&mut enemies));
    assert_eq!(enemies[0].state, EnemyState::Alive);
}

// ── Weapon inventory ──────────────────────────────────────────────────────────

#[test]
fn picking_up_a_new_weapon_adds_it() {
    let mut player = Player::new(CharacterKind::Veteran);
    assert!(player.add_weapon(WeaponKind::Shotgun));
    assert_eq!(player.weapons.len(), 2);
}

#[test]
fn picking_up_a_duplicate_refills_its_ammo() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.add_weapon(WeaponKind::Pistol);
    player.weapons[1].ammo = 2;

    assert!(!player.add_weapon(WeaponKind::Pistol));
    assert_eq!(player.weapons.len(), 2);
    assert_eq!(player.weapons[1].ammo, player.weapons[1].max_ammo);
}

#[test]
fn weapon_switching_wraps_in_both_directions() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.add_weapon(WeaponKind::Knife);
    player.add_weapon(WeaponKind::Pistol);

    player.switch_weapon(-1);
    assert_eq!(player.current_weapon, 2);
    player.switch_weapon(1);
    assert_eq!(player.current_weapon, 0);
    player.switch_weapon(1);
    assert_eq!(player.current_weapon, 1);
}

#[test]
fn ranged_attack_spawns_a_projectile_along_facing() {
    let mut player = Player::new(CharacterKind::Veteran);
    player.add_weapon(WeaponKind::Pistol);
    player.current_weapon = 1;
    player.facing = (0.0, -1.0);

    let mut enemies: Vec<Enemy> = Vec::new();
    let projectile = player.attack(&mut enemies).expect("pistol should fire");
    assert!(projectile.vy < 0.0);
    assert_eq!(player.weapon().ammo, 11);
}

// ── Mask abilities ────────────────────────────────────────────────────────────

#[test]
fn slow_time_sets_duration_and_cooldown() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    let mut enemies: Vec<Enemy> = Vec::new();

    match player.use_ability(&mut enemies, &mut rng) {
        Some(AbilityEffect::Message(text)) => assert_eq!(text, "TIME DILATION ACTIVE"),
        other => panic!("unexpected effect: {:?}", other),
    }
    assert_eq!(player.ability_duration, 180);
    assert_eq!(player.ability_cooldown, 600);

    // On cooldown: a second use is refused
    assert!(player.use_ability(&mut enemies, &mut rng).is_none());
}

#[test]
fn mark_enemy_picks_an_alive_target() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Investigator);
    let mut enemies = vec![guard(9, 400.0, 400.0)];
    enemies.push(guard(10, 500.0, 500.0));
    enemies[1].kill();

    assert!(player.use_ability(&mut enemies, &mut rng).is_some());
    assert_eq!(player.marked_enemy, Some(9));
    assert_eq!(player.ability_cooldown, 300);
}

#[test]
fn mark_enemy_without_targets_keeps_the_cooldown_free() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Investigator);
    let mut enemies: Vec<Enemy> = Vec::new();

    assert!(player.use_ability(&mut enemies, &mut rng).is_none());
    assert_eq!(player.ability_cooldown, 0);
}

#[test]
fn execute_nearest_kills_the_closest_enemy_in_radius() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Executioner); // at (100, 100)
    let mut enemies = vec![guard(0, 180.0, 100.0), guard(1, 130.0, 100.0)];

    assert!(player.use_ability(&mut enemies, &mut rng).is_some());
    assert_eq!(enemies[0].state, EnemyState::Alive);
    assert_eq!(enemies[1].state, EnemyState::Dead);
}

#[test]
fn execute_nearest_out_of_radius_is_a_no_op() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Executioner);
    let mut enemies = vec![guard(0, 300.0, 300.0)];

    assert!(player.use_ability(&mut enemies, &mut rng).is_none());
    assert_eq!(enemies[0].state, EnemyState::Alive);
    assert_eq!(player.ability_cooldown, 0);
}

#[test]
fn grenade_ability_throws_along_facing() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Soldier);
    player.facing = (1.0, 0.0);
    let mut enemies: Vec<Enemy> = Vec::new();

    match player.use_ability(&mut enemies, &mut rng) {
        Some(AbilityEffect::Thrown(grenade)) => assert!(grenade.vx > 0.0),
        other => panic!("unexpected effect: {:?}", other),
    }
    assert_eq!(player.ability_cooldown, 600);
}

#[test]
fn abilities_are_refused_while_downed() {
    let mut rng = seeded_rng();
    let mut player = Player::new(CharacterKind::Veteran);
    player.state = PlayerState::Downed;
    let mut enemies: Vec<Enemy> = Vec::new();

    assert!(player.use_ability(&mut enemies, &mut rng).is_none());
}
