/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalSurface` implements the game's logical drawing surface on top of
/// a half-block pixel buffer (two pixels per terminal cell, stacked), scaled
/// from the logical canvas to whatever size the terminal has.  The top row is
/// the score strip and the bottom row holds the clickable on-screen controls.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use dino_runner::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use dino_runner::entities::{Rect, Session, Variant};
use dino_runner::input::Trigger;
use dino_runner::render::{self, palette, Align, Sprite, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Black;
const C_CONTROL: Color = Color::White;
const C_CONTROL_JUMP_BG: Color = Color::DarkGreen;
const C_CONTROL_SHOOT_BG: Color = Color::DarkRed;
const PALM_GREEN: render::Color = render::Color(46, 125, 50);

/// Rows reserved above and below the play field.
const HUD_ROWS: u16 = 1;
const CONTROL_ROWS: u16 = 1;

fn term_color(c: render::Color) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

struct Bitmap {
    rows: &'static [&'static str],
    color: render::Color,
}

impl Bitmap {
    fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    fn height(&self) -> usize {
        self.rows.len()
    }

    fn is_set(&self, x: usize, y: usize) -> bool {
        self.rows[y].as_bytes().get(x) == Some(&b'#')
    }
}

#[rustfmt::skip]
const DINO_ROWS: &[&str] = &[
    "     #####",
    "     # ###",
    "     #####",
    "     ###  ",
    "#   ####  ",
    "## ###### ",
    "#######   ",
    " ######   ",
    "  ####    ",
    "  #  #    ",
    "  ## ##   ",
];

#[rustfmt::skip]
const PALM_ROWS: &[&str] = &[
    "##   ##",
    " ## ## ",
    "#######",
    "   #   ",
    "   #   ",
    "  ##   ",
    "   #   ",
    "   ##  ",
    "   #   ",
    "  ###  ",
];

fn builtin_sprites() -> HashMap<Sprite, Bitmap> {
    HashMap::from([
        (Sprite::Dino, Bitmap { rows: DINO_ROWS, color: palette::INK }),
        (Sprite::Palm, Bitmap { rows: PALM_ROWS, color: PALM_GREEN }),
    ])
}

// ── Pixel buffer with half-block rendering ────────────────────────────────────

struct PixelBuf {
    w: usize,
    h: usize, // pixel height = field rows * 2
    px: Vec<render::Color>,
}

impl PixelBuf {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![palette::BACKGROUND; w * h],
        }
    }

    fn set(&mut self, x: i32, y: i32, c: render::Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> render::Color {
        self.px[y * self.w + x]
    }

    fn fill(&mut self, c: render::Color) {
        self.px.iter_mut().for_each(|p| *p = c);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: render::Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Queue the buffer starting at terminal row `top`.
    fn render<W: Write>(&self, out: &mut W, top: u16) -> std::io::Result<()> {
        let mut prev: Option<(render::Color, render::Color)> = None;

        for row in 0..self.h / 2 {
            out.queue(cursor::MoveTo(0, top + row as u16))?;
            for col in 0..self.w {
                let upper = self.get(col, row * 2);
                let lower = self.get(col, row * 2 + 1);
                if prev != Some((upper, lower)) {
                    out.queue(style::SetForegroundColor(term_color(upper)))?;
                    out.queue(style::SetBackgroundColor(term_color(lower)))?;
                    prev = Some((upper, lower));
                }
                out.queue(Print('\u{2580}'))?; // ▀
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

// ── Terminal surface ──────────────────────────────────────────────────────────

struct TextItem {
    col: u16,
    row: u16,
    text: String,
    color: render::Color,
}

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    buf: PixelBuf,
    texts: Vec<TextItem>,
    sprites: HashMap<Sprite, Bitmap>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16) -> Self {
        let field_rows = rows.saturating_sub(HUD_ROWS + CONTROL_ROWS).max(1);
        Self {
            cols,
            rows,
            buf: PixelBuf::new(cols as usize, field_rows as usize * 2),
            texts: Vec::new(),
            sprites: builtin_sprites(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        let sprites = std::mem::take(&mut self.sprites);
        *self = Self {
            sprites,
            ..Self::new(cols, rows)
        };
    }

    fn control_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    fn to_px_x(&self, x: f32) -> i32 {
        (x * self.buf.w as f32 / CANVAS_WIDTH).floor() as i32
    }

    fn to_px_y(&self, y: f32) -> i32 {
        (y * self.buf.h as f32 / CANVAS_HEIGHT).floor() as i32
    }

    /// Pixel-space rectangle; anything with area covers at least one pixel.
    fn to_px_rect(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let x0 = self.to_px_x(rect.x);
        let y0 = self.to_px_y(rect.y);
        let w = (self.to_px_x(rect.right()) - x0).max(1);
        let h = (self.to_px_y(rect.bottom()) - y0).max(1);
        (x0, y0, w, h)
    }

    /// Which trigger a left click at terminal cell `(col, row)` produces.
    /// Anywhere on the play field counts as a jump.
    pub fn trigger_at(&self, col: u16, row: u16, variant: Variant) -> Option<Trigger> {
        if row == self.control_row() {
            return controls(variant)
                .into_iter()
                .find(|c| col >= c.col && col < c.col + c.width())
                .map(|c| c.trigger);
        }
        if row >= HUD_ROWS {
            return Some(Trigger::Jump);
        }
        None
    }

    fn begin(&mut self) {
        self.buf.fill(palette::BACKGROUND);
        self.texts.clear();
    }

    fn present<W: Write>(&self, out: &mut W, state: &Session) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        draw_hud(out, self.cols, state)?;
        self.buf.render(out, HUD_ROWS)?;

        out.queue(style::SetBackgroundColor(term_color(palette::BACKGROUND)))?;
        for item in &self.texts {
            out.queue(cursor::MoveTo(item.col, item.row))?;
            out.queue(style::SetForegroundColor(term_color(item.color)))?;
            out.queue(Print(&item.text))?;
        }
        out.queue(style::ResetColor)?;

        draw_controls(out, self.control_row(), state.variant)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.control_row()))?;
        out.flush()
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, rect: Rect, color: render::Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (x, y, w, h) = self.to_px_rect(rect);
        self.buf.fill_rect(x, y, w, h, color);
    }

    fn blit(&mut self, sprite: Sprite, rect: Rect) -> bool {
        let (x0, y0, w, h) = self.to_px_rect(rect);
        let Some(bitmap) = self.sprites.get(&sprite) else {
            return false;
        };
        let (bw, bh) = (bitmap.width(), bitmap.height());
        if bw == 0 || bh == 0 {
            return false;
        }
        // Nearest-neighbour scale onto the destination rectangle.
        for dy in 0..h {
            for dx in 0..w {
                let sx = dx as usize * bw / w as usize;
                let sy = dy as usize * bh / h as usize;
                if bitmap.is_set(sx, sy) {
                    self.buf.set(x0 + dx, y0 + dy, bitmap.color);
                }
            }
        }
        true
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: render::Color, align: Align) {
        let col = (x * self.cols as f32 / CANVAS_WIDTH).max(0.0) as u16;
        let col = match align {
            Align::Left => col,
            Align::Center => col.saturating_sub(text.chars().count() as u16 / 2),
        };
        let row = HUD_ROWS + (self.to_px_y(y).max(0) as u16) / 2;
        self.texts.push(TextItem {
            col,
            row: row.min(self.control_row().saturating_sub(1)),
            text: text.to_string(),
            color,
        });
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    surface: &mut TerminalSurface,
    state: &Session,
) -> std::io::Result<()> {
    surface.begin();
    render::draw_frame(surface, state);
    surface.present(out, state)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, cols: u16, state: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("Q : Quit"))?;

    let score = render::hud_line(state);
    let x = cols.saturating_sub(score.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(style::SetBackgroundColor(Color::Grey))?;
    out.queue(Print(score))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── On-screen controls (last row) ─────────────────────────────────────────────

struct Control {
    trigger: Trigger,
    label: &'static str,
    col: u16,
    background: Color,
}

impl Control {
    fn width(&self) -> u16 {
        self.label.chars().count() as u16
    }
}

fn controls(variant: Variant) -> Vec<Control> {
    let jump = Control {
        trigger: Trigger::Jump,
        label: " JUMP ▲ (SPACE) ",
        col: 1,
        background: C_CONTROL_JUMP_BG,
    };
    let shoot_col = jump.col + jump.width() + 2;
    let mut all = vec![jump];
    if variant == Variant::Shooter {
        all.push(Control {
            trigger: Trigger::Shoot,
            label: " SHOOT ● (Z) ",
            col: shoot_col,
            background: C_CONTROL_SHOOT_BG,
        });
    }
    all
}

fn draw_controls<W: Write>(out: &mut W, row: u16, variant: Variant) -> std::io::Result<()> {
    for control in controls(variant) {
        out.queue(cursor::MoveTo(control.col, row))?;
        out.queue(style::SetForegroundColor(C_CONTROL))?;
        out.queue(style::SetBackgroundColor(control.background))?;
        out.queue(Print(control.label))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
