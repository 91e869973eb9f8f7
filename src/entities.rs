/// All game entity types, plus the session state that owns them.
///
/// Entities carry their own per-frame movement rule and know how to describe
/// themselves to a [`Surface`]; everything that needs the whole session
/// (spawning, collisions, scoring) lives in `compute`.

use rand::Rng;

use crate::constants::*;
use crate::render::{palette, Surface, Sprite};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in logical surface units, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Capability shared by everything that moves across the surface.
pub trait Entity {
    /// Advance one frame.
    fn update(&mut self);
    fn bounds(&self) -> Rect;
    /// Describe the entity to `surface`. Never mutates game state.
    fn draw(&self, surface: &mut dyn Surface, frame: u64);
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity; negative is upward.
    pub dy: f32,
    pub jump_power: f32,
    pub grounded: bool,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            dy: 0.0,
            jump_power: JUMP_POWER,
            grounded: false,
            jumping: false,
        }
    }
}

impl Player {
    /// Start a jump. Returns `false` (and changes nothing) unless the player
    /// is standing on the ground and not already mid-jump.
    pub fn jump(&mut self) -> bool {
        if !self.grounded || self.jumping {
            tracing::debug!(grounded = self.grounded, jumping = self.jumping, "cannot jump");
            return false;
        }
        self.dy = self.jump_power;
        self.jumping = true;
        tracing::debug!(dy = self.dy, "jump");
        true
    }
}

impl Entity for Player {
    fn update(&mut self) {
        if self.y < GROUND_Y {
            self.dy += GRAVITY;
        }

        self.y += self.dy;

        // Never sink below the ground line; landing ends the jump.
        if self.y >= GROUND_Y {
            self.y = GROUND_Y;
            self.dy = 0.0;
            self.grounded = true;
            self.jumping = false;
        } else {
            self.grounded = false;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, surface: &mut dyn Surface, _frame: u64) {
        let rect = self.bounds();
        if !surface.blit(Sprite::Dino, rect) {
            surface.fill_rect(rect, palette::INK);
        }
    }
}

// ── Obstacle ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Game speed at the moment of spawning; never updated afterwards.
    pub speed: f32,
}

impl Obstacle {
    pub fn new(speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: CANVAS_WIDTH,
            y: GROUND_Y,
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_MIN_HEIGHT + rng.gen::<f32>() * OBSTACLE_HEIGHT_JITTER,
            speed,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

impl Entity for Obstacle {
    fn update(&mut self) {
        self.x -= self.speed;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, surface: &mut dyn Surface, _frame: u64) {
        let rect = self.bounds();
        if !surface.blit(Sprite::Palm, rect) {
            surface.fill_rect(rect, palette::INK);
        }
    }
}

// ── Cloud ────────────────────────────────────────────────────────────────────

/// Background decoration. Clouds are never destroyed; they wrap around.
#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Cloud {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            x: CANVAS_WIDTH + rng.gen::<f32>() * 200.0,
            y: random_cloud_y(rng),
            width: 40.0 + rng.gen::<f32>() * 20.0,
            height: CLOUD_HEIGHT,
            speed: CLOUD_SPEED,
        }
    }

    /// Move a cloud that has left the surface back to the right edge at a new
    /// height. Returns whether it wrapped.
    pub fn wrap(&mut self, rng: &mut impl Rng) -> bool {
        if self.x + self.width >= 0.0 {
            return false;
        }
        self.x = CANVAS_WIDTH;
        self.y = random_cloud_y(rng);
        true
    }
}

fn random_cloud_y(rng: &mut impl Rng) -> f32 {
    20.0 + rng.gen::<f32>() * 60.0
}

impl Entity for Cloud {
    fn update(&mut self) {
        self.x -= self.speed;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, surface: &mut dyn Surface, _frame: u64) {
        surface.fill_rect(self.bounds(), palette::CLOUD);
        // Puff on top
        surface.fill_rect(
            Rect::new(self.x + 10.0, self.y - 8.0, self.width - 20.0, self.height),
            palette::CLOUD,
        );
    }
}

// ── Power-up ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(game_speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: CANVAS_WIDTH + rng.gen::<f32>() * 400.0,
            y: 100.0 + rng.gen::<f32>() * 40.0,
            width: POWER_UP_SIZE,
            height: POWER_UP_SIZE,
            speed: game_speed * POWER_UP_SPEED_FACTOR,
            collected: false,
        }
    }

    /// A collected power-up never collides again.
    pub fn check_collision(&self, other: &Rect) -> bool {
        !self.collected && crate::collision::overlaps(&self.bounds(), other)
    }

    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

impl Entity for PowerUp {
    fn update(&mut self) {
        if !self.collected {
            self.x -= self.speed;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, surface: &mut dyn Surface, frame: u64) {
        if self.collected {
            return;
        }
        let (x, y) = (self.x, self.y);
        // Plus-shaped orb
        surface.fill_rect(Rect::new(x + 5.0, y, 10.0, 20.0), palette::GOLD);
        surface.fill_rect(Rect::new(x, y + 5.0, 20.0, 10.0), palette::GOLD);
        surface.fill_rect(Rect::new(x + 8.0, y + 8.0, 4.0, 4.0), palette::CORNSILK);

        if (frame / 10) % 2 == 0 {
            surface.fill_rect(Rect::new(x + 2.0, y + 10.0, 2.0, 2.0), palette::WHITE);
            surface.fill_rect(Rect::new(x + 16.0, y + 10.0, 2.0, 2.0), palette::WHITE);
        }
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub active: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
            speed: BULLET_SPEED,
            active: true,
        }
    }

    /// An inactive bullet never collides.
    pub fn check_collision(&self, other: &Rect) -> bool {
        self.active && crate::collision::overlaps(&self.bounds(), other)
    }

    pub fn is_off_screen(&self) -> bool {
        self.x > CANVAS_WIDTH
    }
}

impl Entity for Bullet {
    fn update(&mut self) {
        if self.active {
            self.x += self.speed;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    fn draw(&self, surface: &mut dyn Surface, _frame: u64) {
        if !self.active {
            return;
        }
        surface.fill_rect(self.bounds(), palette::ORANGE_RED);
        surface.fill_rect(Rect::new(self.x + 2.0, self.y + 1.0, 6.0, 2.0), palette::ORANGE);
    }
}

// ── Closed set of scrolling entities ─────────────────────────────────────────

/// Borrowed view over any scrolling entity, used for uniform draw dispatch.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Cloud(&'a Cloud),
    PowerUp(&'a PowerUp),
    Bullet(&'a Bullet),
    Obstacle(&'a Obstacle),
}

impl EntityRef<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Cloud(c) => c.bounds(),
            EntityRef::PowerUp(p) => p.bounds(),
            EntityRef::Bullet(b) => b.bounds(),
            EntityRef::Obstacle(o) => o.bounds(),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, frame: u64) {
        match self {
            EntityRef::Cloud(c) => c.draw(surface, frame),
            EntityRef::PowerUp(p) => p.draw(surface, frame),
            EntityRef::Bullet(b) => b.draw(surface, frame),
            EntityRef::Obstacle(o) => o.draw(surface, frame),
        }
    }
}

// ── Session state ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Title screen; only reachable at load.
    Idle,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Jump-only runner.
    Classic,
    /// Adds power-ups, ammo and bullets.
    Shooter,
}

/// Things that happened during a transition which the front end may want to
/// react to (sound cues, persistence). They never feed back into the loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Restarted,
    Jumped,
    Shot,
    PowerUpCollected,
    ObstacleDestroyed,
    /// Round ended; carries the displayed score.
    GameOver { score: u32 },
    /// The displayed score beat the stored best.
    NewHighScore(u32),
}

/// The entire game state. Cloneable so the controller's pure functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub variant: Variant,
    pub status: Status,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub power_ups: Vec<PowerUp>,
    pub bullets: Vec<Bullet>,
    /// Raw score: one tick per playing frame.
    pub score: u32,
    pub speed: f32,
    pub ammo: u32,
    pub frame: u64,
    /// Best displayed score seen so far.
    pub high_score: u32,
}

impl Session {
    pub fn is_running(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// Every scrolling entity in draw order.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        self.clouds
            .iter()
            .map(EntityRef::Cloud)
            .chain(self.power_ups.iter().map(EntityRef::PowerUp))
            .chain(self.bullets.iter().map(EntityRef::Bullet))
            .chain(self.obstacles.iter().map(EntityRef::Obstacle))
    }
}
