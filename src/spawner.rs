/// Creation of obstacles and power-ups.
///
/// Both functions only decide *whether* something appears; the controller
/// decides *when* to ask (every `OBSTACLE_SPAWN_INTERVAL` /
/// `POWER_UP_SPAWN_INTERVAL` frames).

use rand::Rng;

use crate::constants::{CANVAS_WIDTH, OBSTACLE_MIN_SPACING, POWER_UP_SPAWN_CHANCE};
use crate::entities::{Obstacle, PowerUp};

/// A new obstacle, unless the most recent one is still within
/// `OBSTACLE_MIN_SPACING` of the spawn edge.
pub fn spawn_obstacle(obstacles: &[Obstacle], speed: f32, rng: &mut impl Rng) -> Option<Obstacle> {
    match obstacles.last() {
        Some(last) if CANVAS_WIDTH - last.x <= OBSTACLE_MIN_SPACING => {
            tracing::debug!(last_x = last.x, "obstacle spawn skipped: too close");
            None
        }
        _ => Some(Obstacle::new(speed, rng)),
    }
}

/// A new power-up with probability `POWER_UP_SPAWN_CHANCE`.
pub fn spawn_power_up(speed: f32, rng: &mut impl Rng) -> Option<PowerUp> {
    if rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        Some(PowerUp::new(speed, rng))
    } else {
        None
    }
}
