/// Tunables shared by the simulation and the renderer.
///
/// All distances are in logical surface units; the terminal front end scales
/// them to whatever grid it has.

// ── Surface ──────────────────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 200.0;

/// The player's top edge rests here when standing.
pub const GROUND_Y: f32 = 150.0;
/// Where the solid ground stroke is drawn (player feet: 150 + 44).
pub const GROUND_LINE_Y: f32 = 194.0;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_X: f32 = 50.0;
pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 44.0;
pub const JUMP_POWER: f32 = -12.0;
pub const GRAVITY: f32 = 0.6;

// ── Pacing ───────────────────────────────────────────────────────────────────

pub const INITIAL_SPEED: f32 = 3.0;
pub const SPEED_STEP: f32 = 0.5;
/// Raw-score ticks between speed increases.
pub const SPEED_STEP_INTERVAL: u32 = 200;
/// Raw score per displayed point.
pub const SCORE_DIVISOR: u32 = 10;

pub const OBSTACLE_SPAWN_INTERVAL: u64 = 100;
pub const POWER_UP_SPAWN_INTERVAL: u64 = 250;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.3;

// ── Entities ─────────────────────────────────────────────────────────────────

pub const OBSTACLE_WIDTH: f32 = 20.0;
pub const OBSTACLE_MIN_HEIGHT: f32 = 40.0;
pub const OBSTACLE_HEIGHT_JITTER: f32 = 20.0;
/// Minimum gap between the spawn edge and the newest obstacle.
pub const OBSTACLE_MIN_SPACING: f32 = 200.0;

pub const CLOUD_COUNT: usize = 3;
pub const CLOUD_SPEED: f32 = 1.0;
pub const CLOUD_HEIGHT: f32 = 20.0;

pub const POWER_UP_SIZE: f32 = 20.0;
pub const POWER_UP_SPEED_FACTOR: f32 = 0.8;
pub const AMMO_PER_POWER_UP: u32 = 3;

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 4.0;
pub const BULLET_SPEED: f32 = 8.0;

// ── Persistence ──────────────────────────────────────────────────────────────

pub const HIGH_SCORE_KEY: &str = "dinoHighScore";
