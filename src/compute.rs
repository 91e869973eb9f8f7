/// Pure game-logic functions: the game-state controller.
///
/// Every public function takes an immutable reference to the current
/// `Session` (and, where needed, an RNG handle) and returns a brand-new
/// `Session` together with the `GameEvent`s the transition raised.  Side
/// effects are limited to the injected RNG.

use rand::Rng;

use crate::collision::overlaps;
use crate::constants::*;
use crate::entities::{
    Bullet, Cloud, Entity, GameEvent, Player, Session, Status, Variant,
};
use crate::spawner::{spawn_obstacle, spawn_power_up};

// ── Score helpers ────────────────────────────────────────────────────────────

/// Points shown to the player for a raw score.
pub fn displayed_score(raw: u32) -> u32 {
    raw / SCORE_DIVISOR
}

/// Zero-padded five-digit score, e.g. `00042`.
pub fn format_score(points: u32) -> String {
    format!("{:05}", points)
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The state at load time: idle, with a fresh set of clouds.
pub fn init_state(variant: Variant, high_score: u32, rng: &mut impl Rng) -> Session {
    Session {
        variant,
        status: Status::Idle,
        player: Player::default(),
        obstacles: Vec::new(),
        clouds: (0..CLOUD_COUNT).map(|_| Cloud::new(rng)).collect(),
        power_ups: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        speed: INITIAL_SPEED,
        ammo: 0,
        frame: 0,
        high_score,
    }
}

/// Back to the initial round values. Clouds, the best score and the status
/// are left alone; use [`restart`] to reset and resume play in one step.
pub fn reset_game(state: &Session) -> Session {
    Session {
        player: Player::default(),
        obstacles: Vec::new(),
        power_ups: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        speed: INITIAL_SPEED,
        ammo: 0,
        frame: 0,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Idle → Playing.
pub fn start(state: &Session) -> (Session, Vec<GameEvent>) {
    if state.status != Status::Idle {
        return (state.clone(), Vec::new());
    }
    tracing::info!(variant = ?state.variant, "starting game");
    let next = Session {
        status: Status::Playing,
        ..state.clone()
    };
    (next, vec![GameEvent::Started])
}

/// GameOver → Playing, resetting the round first.
pub fn restart(state: &Session) -> (Session, Vec<GameEvent>) {
    if state.status != Status::GameOver {
        return (state.clone(), Vec::new());
    }
    tracing::info!("restarting game");
    let next = Session {
        status: Status::Playing,
        ..reset_game(state)
    };
    (next, vec![GameEvent::Restarted])
}

pub fn jump(state: &Session) -> (Session, Vec<GameEvent>) {
    if !state.is_running() {
        return (state.clone(), Vec::new());
    }
    let mut next = state.clone();
    if next.player.jump() {
        (next, vec![GameEvent::Jumped])
    } else {
        (next, Vec::new())
    }
}

/// Fire one bullet from the player's mouth, spending one unit of ammo.
pub fn shoot(state: &Session) -> (Session, Vec<GameEvent>) {
    if state.variant != Variant::Shooter || !state.is_running() || state.is_over() {
        return (state.clone(), Vec::new());
    }
    if state.ammo == 0 {
        tracing::debug!("no ammo; collect power-ups to shoot");
        return (state.clone(), Vec::new());
    }

    let player = &state.player;
    let bullet = Bullet::new(player.x + player.width, player.y + player.height / 2.0);
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    let next = Session {
        bullets,
        ammo: state.ammo - 1,
        ..state.clone()
    };
    tracing::debug!(ammo = next.ammo, "bullet fired");
    (next, vec![GameEvent::Shot])
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &Session, rng: &mut impl Rng) -> (Session, Vec<GameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();

    // ── 1. Clouds drift in every state ───────────────────────────────────────
    for cloud in &mut next.clouds {
        cloud.update();
        cloud.wrap(rng);
    }

    if !next.is_running() {
        return (next, events);
    }

    // ── 2. Player physics ────────────────────────────────────────────────────
    next.player.update();
    let player_box = next.player.bounds();

    // ── 3. Spawning ──────────────────────────────────────────────────────────
    next.frame += 1;
    if next.frame % OBSTACLE_SPAWN_INTERVAL == 0 {
        if let Some(obstacle) = spawn_obstacle(&next.obstacles, next.speed, rng) {
            next.obstacles.push(obstacle);
        }
    }
    if next.variant == Variant::Shooter && next.frame % POWER_UP_SPAWN_INTERVAL == 0 {
        if let Some(power_up) = spawn_power_up(next.speed, rng) {
            next.power_ups.push(power_up);
        }
    }

    // ── 4. Power-ups ↔ player ────────────────────────────────────────────────
    for power_up in &mut next.power_ups {
        power_up.update();
        if power_up.check_collision(&player_box) {
            power_up.collected = true;
            next.ammo += AMMO_PER_POWER_UP;
            tracing::debug!(ammo = next.ammo, "power-up collected");
            events.push(GameEvent::PowerUpCollected);
        }
    }
    next.power_ups.retain(|p| !p.collected && !p.is_off_screen());

    // ── 5. Bullets ↔ obstacles ───────────────────────────────────────────────
    // Each obstacle absorbs at most one bullet.
    let mut destroyed: Vec<usize> = Vec::new();
    for bullet in &mut next.bullets {
        bullet.update();
        let hit = next
            .obstacles
            .iter()
            .enumerate()
            .find(|(i, obstacle)| !destroyed.contains(i) && bullet.check_collision(&obstacle.bounds()))
            .map(|(i, _)| i);
        if let Some(i) = hit {
            bullet.active = false;
            destroyed.push(i);
            tracing::debug!("obstacle destroyed");
            events.push(GameEvent::ObstacleDestroyed);
        }
    }
    next.bullets.retain(|b| b.active && !b.is_off_screen());
    next.obstacles = std::mem::take(&mut next.obstacles)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !destroyed.contains(i))
        .map(|(_, o)| o)
        .collect();

    // ── 6. Obstacles ↔ player ────────────────────────────────────────────────
    let mut crashed = false;
    for obstacle in &mut next.obstacles {
        obstacle.update();
        if overlaps(&player_box, &obstacle.bounds()) {
            crashed = true;
        }
    }
    next.obstacles.retain(|o| !o.is_off_screen());

    if crashed {
        let score = displayed_score(next.score);
        next.status = Status::GameOver;
        tracing::info!(score, "game over");
        events.push(GameEvent::GameOver { score });
        if score > next.high_score {
            tracing::info!(previous = next.high_score, score, "new high score");
            next.high_score = score;
            events.push(GameEvent::NewHighScore(score));
        }
        return (next, events);
    }

    // ── 7. Score & difficulty ────────────────────────────────────────────────
    next.score += 1;
    if next.score % SPEED_STEP_INTERVAL == 0 {
        next.speed += SPEED_STEP;
        tracing::debug!(speed = next.speed, "speed increased");
    }

    (next, events)
}
