/// Drawing vocabulary shared by the game logic and the front end.
///
/// The logic describes a frame as rectangle fills, sprite blits and text on a
/// fixed-size logical [`Surface`]; the binary decides how that lands on a
/// terminal.

use crate::compute::format_score;
use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, GROUND_LINE_Y};
use crate::entities::{Entity, Rect, Session, Status, Variant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

pub mod palette {
    use super::Color;

    pub const INK: Color = Color(83, 83, 83);
    pub const CLOUD: Color = Color(211, 211, 211);
    pub const GOLD: Color = Color(255, 215, 0);
    pub const CORNSILK: Color = Color(255, 248, 220);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const ORANGE_RED: Color = Color(255, 69, 0);
    pub const ORANGE: Color = Color(255, 165, 0);
    pub const BACKGROUND: Color = Color(247, 247, 247);
}

/// Image assets an entity may ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Dino,
    Palm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Draw `sprite` stretched over `rect`. Returns `false` when the sprite is
    /// not available, in which case nothing was drawn.
    fn blit(&mut self, sprite: Sprite, rect: Rect) -> bool;
    fn text(&mut self, x: f32, y: f32, text: &str, color: Color, align: Align);
}

/// Render one complete frame of `state`.
pub fn draw_frame(surface: &mut dyn Surface, state: &Session) {
    surface.fill_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT), palette::BACKGROUND);

    for cloud in &state.clouds {
        cloud.draw(surface, state.frame);
    }
    draw_ground(surface, state);

    match state.status {
        Status::Idle => {
            state.player.draw(surface, state.frame);
            draw_banner(surface, &["Press SPACE to Start"]);
        }
        Status::GameOver => {
            state.player.draw(surface, state.frame);
            for obstacle in &state.obstacles {
                obstacle.draw(surface, state.frame);
            }
            draw_banner(surface, &["GAME OVER", "Press SPACE to restart"]);
        }
        Status::Playing => {
            state.player.draw(surface, state.frame);
            // Clouds are already down; the rest goes on top of the player.
            for entity in state.entities().skip(state.clouds.len()) {
                entity.draw(surface, state.frame);
            }
            if state.variant == Variant::Shooter {
                surface.text(20.0, 30.0, &format!("⚡ x {}", state.ammo), palette::GOLD, Align::Left);
            }
        }
    }
}

/// Score strip text: `HI 00120  00042`.
pub fn hud_line(state: &Session) -> String {
    format!(
        "HI {}  {}",
        format_score(state.high_score),
        format_score(crate::compute::displayed_score(state.score))
    )
}

fn draw_ground(surface: &mut dyn Surface, state: &Session) {
    surface.fill_rect(Rect::new(0.0, GROUND_LINE_Y - 1.0, CANVAS_WIDTH, 2.0), palette::INK);

    // Dashed strip scrolling with the game speed: 10 on, 10 off.
    let offset = (state.frame as f32 * state.speed) % 20.0;
    let mut x = -offset;
    while x < CANVAS_WIDTH {
        surface.fill_rect(Rect::new(x, GROUND_LINE_Y + 1.0, 10.0, 2.0), palette::INK);
        x += 20.0;
    }
}

fn draw_banner(surface: &mut dyn Surface, lines: &[&str]) {
    let cx = CANVAS_WIDTH / 2.0;
    let top = CANVAS_HEIGHT / 2.0 - 20.0 * (lines.len() as f32 - 1.0);
    for (i, line) in lines.iter().enumerate() {
        surface.text(cx, top + 40.0 * i as f32, line, palette::INK, Align::Center);
    }
}
