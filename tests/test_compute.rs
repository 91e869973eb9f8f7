use dino_runner::compute::*;
use dino_runner::constants::*;
use dino_runner::entities::*;
use dino_runner::input::{apply_trigger, Trigger};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state(variant: Variant) -> Session {
    Session {
        variant,
        status: Status::Playing,
        player: Player {
            grounded: true,
            ..Player::default()
        },
        obstacles: Vec::new(),
        clouds: Vec::new(),
        power_ups: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        speed: INITIAL_SPEED,
        ammo: 0,
        frame: 0,
        high_score: 0,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// An obstacle sitting on the player (player box is x 50..90, y 150..194).
fn obstacle_on_player() -> Obstacle {
    Obstacle { x: 60.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 }
}

// ── Score helpers ─────────────────────────────────────────────────────────────

#[test]
fn displayed_score_is_raw_over_ten() {
    assert_eq!(displayed_score(0), 0);
    assert_eq!(displayed_score(9), 0);
    assert_eq!(displayed_score(10), 1);
    assert_eq!(displayed_score(2019), 201);
}

#[test]
fn format_score_pads_to_five_digits() {
    assert_eq!(format_score(0), "00000");
    assert_eq!(format_score(42), "00042");
    assert_eq!(format_score(99999), "99999");
    assert_eq!(format_score(123456), "123456");
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_is_idle_with_clouds() {
    let s = init_state(Variant::Classic, 17, &mut seeded_rng());
    assert_eq!(s.status, Status::Idle);
    assert!(!s.is_running());
    assert!(!s.is_over());
    assert_eq!(s.clouds.len(), CLOUD_COUNT);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.speed, INITIAL_SPEED);
    assert_eq!(s.high_score, 17);
    assert_eq!(s.player, Player::default());
}

// ── tick — idle and game over ─────────────────────────────────────────────────

#[test]
fn tick_idle_only_moves_clouds() {
    let s = init_state(Variant::Shooter, 0, &mut seeded_rng());
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert!(events.is_empty());
    assert_eq!(s2.frame, 0);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.player, s.player);
    for (before, after) in s.clouds.iter().zip(&s2.clouds) {
        assert_eq!(after.x, before.x - CLOUD_SPEED);
    }
}

#[test]
fn tick_game_over_freezes_round() {
    let mut s = make_state(Variant::Classic);
    s.status = Status::GameOver;
    s.score = 321;
    s.obstacles.push(obstacle_on_player());
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.score, 321);
    assert_eq!(s2.obstacles, s.obstacles);
}

// ── tick — score and difficulty ───────────────────────────────────────────────

#[test]
fn tick_increments_frame_and_score() {
    let s = make_state(Variant::Classic);
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 1);
    assert_eq!(s2.score, 1);
}

#[test]
fn speed_steps_every_two_hundred_ticks() {
    let mut s = make_state(Variant::Classic);
    s.score = 198;
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.speed, INITIAL_SPEED);
    let (s3, _) = tick(&s2, &mut seeded_rng());
    assert_eq!(s3.score, 200);
    assert_eq!(s3.speed, INITIAL_SPEED + SPEED_STEP);
}

#[test]
fn two_thousand_clear_frames_from_idle() {
    let mut rng = seeded_rng();
    let s = init_state(Variant::Classic, 0, &mut rng);
    let (mut s, events) = apply_trigger(&s, Trigger::Jump);
    assert_eq!(events, vec![GameEvent::Started]);
    assert_eq!(s.status, Status::Playing);
    assert_eq!(s.score, 0);

    for _ in 0..2000 {
        let (next, _) = tick(&s, &mut rng);
        s = next;
        s.obstacles.clear();
    }

    assert_eq!(s.status, Status::Playing);
    assert_eq!(s.score, 2000);
    assert_eq!(format_score(displayed_score(s.score)), "00200");
    assert_eq!(s.speed, 8.0);
}

// ── tick — obstacles ──────────────────────────────────────────────────────────

#[test]
fn obstacle_keeps_spawn_speed() {
    let mut s = make_state(Variant::Classic);
    s.obstacles.push(Obstacle { x: 500.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    s.speed = 6.5;
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.obstacles[0].x, 497.0);
}

#[test]
fn obstacle_spawns_on_interval() {
    let mut s = make_state(Variant::Classic);
    s.frame = OBSTACLE_SPAWN_INTERVAL - 1;
    s.speed = 4.0;
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
    // Spawned at the right edge with the current speed, then moved once.
    assert_eq!(s2.obstacles[0].speed, 4.0);
    assert_eq!(s2.obstacles[0].x, CANVAS_WIDTH - 4.0);
}

#[test]
fn no_obstacle_spawn_off_interval() {
    let mut s = make_state(Variant::Classic);
    s.frame = 1;
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
}

#[test]
fn obstacle_spawn_respects_spacing() {
    let mut s = make_state(Variant::Classic);
    s.frame = OBSTACLE_SPAWN_INTERVAL - 1;
    s.obstacles.push(Obstacle { x: 700.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.obstacles.len(), 1);
}

#[test]
fn spawned_obstacles_never_closer_than_spacing() {
    let mut rng = seeded_rng();
    let mut s = make_state(Variant::Classic);
    for _ in 0..5000 {
        let before = s.obstacles.len();
        let (next, _) = tick(&s, &mut rng);
        s = next;
        if s.obstacles.len() > before && s.obstacles.len() >= 2 {
            let prev = &s.obstacles[s.obstacles.len() - 2];
            // Position at the spawn instant, before this frame's move.
            let prev_x = prev.x + prev.speed;
            assert!(CANVAS_WIDTH - prev_x > OBSTACLE_MIN_SPACING);
        }
        // Keep the player out of harm's way.
        s.obstacles.retain(|o| o.x > 300.0);
    }
}

#[test]
fn obstacle_pruned_off_screen() {
    let mut s = make_state(Variant::Classic);
    s.obstacles.push(Obstacle { x: -18.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
}

// ── tick — collision: obstacle ↔ player ───────────────────────────────────────

#[test]
fn obstacle_touching_player_ends_round() {
    let mut s = make_state(Variant::Classic);
    s.score = 57;
    // After moving 3 units its left edge sits one unit inside the player.
    s.obstacles.push(Obstacle { x: 92.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, Status::GameOver);
    assert!(!s2.is_running());
    assert!(s2.is_over());
    assert_eq!(s2.score, 57); // no score on the crash frame
    assert!(events.contains(&GameEvent::GameOver { score: 5 }));
}

#[test]
fn obstacle_sharing_only_an_edge_is_not_a_hit() {
    let mut s = make_state(Variant::Classic);
    // Ends at x = 90 after moving, exactly the player's right edge.
    s.obstacles.push(Obstacle { x: 93.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, Status::Playing);
}

#[test]
fn jumping_player_clears_obstacle() {
    let mut s = make_state(Variant::Classic);
    s.player.y = 60.0; // high in the air
    s.obstacles.push(obstacle_on_player());
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, Status::Playing);
}

// ── tick — high score ─────────────────────────────────────────────────────────

#[test]
fn high_score_updates_when_strictly_beaten() {
    let mut s = make_state(Variant::Classic);
    s.high_score = 5;
    s.score = 60;
    s.obstacles.push(obstacle_on_player());
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.high_score, 6);
    assert!(events.contains(&GameEvent::NewHighScore(6)));
}

#[test]
fn high_score_unchanged_on_tie() {
    let mut s = make_state(Variant::Classic);
    s.high_score = 5;
    s.score = 59;
    s.obstacles.push(obstacle_on_player());
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.high_score, 5);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::NewHighScore(_))));
}

// ── tick — power-ups ──────────────────────────────────────────────────────────

#[test]
fn power_up_collected_grants_ammo() {
    let mut s = make_state(Variant::Shooter);
    s.power_ups.push(PowerUp {
        x: 60.0,
        y: 160.0,
        width: 20.0,
        height: 20.0,
        speed: 2.4,
        collected: false,
    });
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.ammo, AMMO_PER_POWER_UP);
    assert!(s2.power_ups.is_empty());
    assert_eq!(events, vec![GameEvent::PowerUpCollected]);
}

#[test]
fn power_up_out_of_reach_keeps_moving() {
    let mut s = make_state(Variant::Shooter);
    s.power_ups.push(PowerUp {
        x: 400.0,
        y: 110.0,
        width: 20.0,
        height: 20.0,
        speed: 2.4,
        collected: false,
    });
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.ammo, 0);
    assert_eq!(s2.power_ups.len(), 1);
    assert_eq!(s2.power_ups[0].x, 397.6);
}

#[test]
fn power_up_spawns_only_in_shooter() {
    // Power-up drops are random; over enough triggers at least one lands.
    let mut rng = seeded_rng();
    let mut spawned = 0;
    for _ in 0..40 {
        let mut s = make_state(Variant::Shooter);
        s.frame = POWER_UP_SPAWN_INTERVAL - 1;
        let (s2, _) = tick(&s, &mut rng);
        spawned += s2.power_ups.len();
    }
    assert!(spawned > 0);

    for _ in 0..40 {
        let mut s = make_state(Variant::Classic);
        s.frame = POWER_UP_SPAWN_INTERVAL - 1;
        let (s2, _) = tick(&s, &mut rng);
        assert!(s2.power_ups.is_empty());
    }
}

// ── tick — bullets ────────────────────────────────────────────────────────────

#[test]
fn bullet_destroys_obstacle_and_itself() {
    let mut s = make_state(Variant::Shooter);
    s.bullets.push(Bullet::new(300.0, 170.0));
    s.obstacles.push(Obstacle { x: 310.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert!(s2.bullets.is_empty());
    assert!(s2.obstacles.is_empty());
    assert_eq!(events, vec![GameEvent::ObstacleDestroyed]);
}

#[test]
fn obstacle_absorbs_only_one_bullet() {
    let mut s = make_state(Variant::Shooter);
    s.bullets.push(Bullet::new(300.0, 170.0));
    s.bullets.push(Bullet::new(302.0, 160.0));
    s.obstacles.push(Obstacle { x: 310.0, y: GROUND_Y, width: 20.0, height: 40.0, speed: 3.0 });
    let (s2, events) = tick(&s, &mut seeded_rng());
    assert!(s2.obstacles.is_empty());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 310.0);
    assert_eq!(events.len(), 1);
}

#[test]
fn bullet_pruned_past_right_edge() {
    let mut s = make_state(Variant::Shooter);
    s.bullets.push(Bullet::new(795.0, 170.0));
    s.bullets.push(Bullet::new(500.0, 170.0));
    let (s2, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 508.0);
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[test]
fn shoot_without_ammo_does_nothing() {
    let s = make_state(Variant::Shooter);
    let (s2, events) = shoot(&s);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.ammo, 0);
    assert!(events.is_empty());
}

#[test]
fn collect_then_shoot() {
    let mut s = make_state(Variant::Shooter);
    let (s2, _) = apply_trigger(&s, Trigger::Shoot);
    assert!(s2.bullets.is_empty());

    s.power_ups.push(PowerUp {
        x: 60.0,
        y: 160.0,
        width: 20.0,
        height: 20.0,
        speed: 2.4,
        collected: false,
    });
    let (s, _) = tick(&s, &mut seeded_rng());
    assert_eq!(s.ammo, 3);

    let (s, events) = apply_trigger(&s, Trigger::Shoot);
    assert_eq!(events, vec![GameEvent::Shot]);
    assert_eq!(s.ammo, 2);
    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets[0];
    assert_eq!(b.x, s.player.x + s.player.width);
    assert_eq!(b.y, s.player.y + s.player.height / 2.0);
}

#[test]
fn shoot_ignored_in_classic() {
    let mut s = make_state(Variant::Classic);
    s.ammo = 5;
    let (s2, _) = shoot(&s);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.ammo, 5);
}

#[test]
fn jump_only_while_playing() {
    let mut s = make_state(Variant::Classic);
    s.status = Status::Idle;
    let (s2, events) = jump(&s);
    assert!(events.is_empty());
    assert_eq!(s2.player.dy, 0.0);

    s.status = Status::Playing;
    let (s3, events) = jump(&s);
    assert_eq!(events, vec![GameEvent::Jumped]);
    assert_eq!(s3.player.dy, JUMP_POWER);
}

#[test]
fn start_only_from_idle() {
    let s = make_state(Variant::Classic); // playing
    let (s2, events) = start(&s);
    assert!(events.is_empty());
    assert_eq!(s2.status, Status::Playing);
}

#[test]
fn reset_game_keeps_status() {
    let mut s = make_state(Variant::Shooter);
    s.status = Status::GameOver;
    s.score = 900;
    let s2 = reset_game(&s);
    assert_eq!(s2.status, Status::GameOver);
    assert_eq!(s2.score, 0);
}

#[test]
fn restart_clears_the_round() {
    let mut rng = seeded_rng();
    let mut s = init_state(Variant::Shooter, 12, &mut rng);
    s.status = Status::GameOver;
    s.score = 1234;
    s.speed = 6.0;
    s.ammo = 4;
    s.frame = 999;
    s.player.y = 120.0;
    s.player.dy = 3.0;
    s.obstacles.push(obstacle_on_player());
    s.bullets.push(Bullet::new(200.0, 170.0));
    s.power_ups.push(PowerUp::new(6.0, &mut rng));

    let (s2, events) = apply_trigger(&s, Trigger::Jump);
    assert_eq!(events, vec![GameEvent::Restarted]);
    assert_eq!(s2.status, Status::Playing);
    assert!(s2.obstacles.is_empty());
    assert!(s2.bullets.is_empty());
    assert!(s2.power_ups.is_empty());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.speed, INITIAL_SPEED);
    assert_eq!(s2.ammo, 0);
    assert_eq!(s2.frame, 0);
    assert_eq!(s2.player, Player::default());
    // Scenery and the best score survive.
    assert_eq!(s2.clouds, s.clouds);
    assert_eq!(s2.high_score, 12);
}

#[test]
fn transitions_do_not_mutate_original() {
    let mut s = make_state(Variant::Shooter);
    s.ammo = 1;
    let _ = shoot(&s);
    let _ = jump(&s);
    let _ = tick(&s, &mut seeded_rng());
    assert_eq!(s.ammo, 1);
    assert!(s.bullets.is_empty());
    assert_eq!(s.player.dy, 0.0);
    assert_eq!(s.frame, 0);
}
