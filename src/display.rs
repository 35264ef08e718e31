//! Terminal rendering. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot.  No game
//! logic is performed; world coordinates are scaled onto whatever terminal
//! size the caller reports.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use flappy_cannon::config::GameConfig;
use flappy_cannon::entities::{Bird, Cannon, GameStatus, Pipe, Projectile, WorldSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_BEST: Color = Color::Cyan;
const C_BIRD: Color = Color::Yellow;
const C_PIPE: Color = Color::Green;
const C_CANNON: Color = Color::Grey;
const C_BARREL: Color = Color::Red;
const C_PROJECTILE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_TOAST: Color = Color::Magenta;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps world units onto the cells inside the border (columns 1..w-1,
/// rows 2..h-2).
struct Viewport {
    width: u16,
    height: u16,
    inner_w: u16,
    inner_h: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new((width, height): (u16, u16), config: &GameConfig) -> Self {
        let inner_w = width.saturating_sub(2);
        let inner_h = height.saturating_sub(4);
        Viewport {
            width,
            height,
            inner_w,
            inner_h,
            sx: inner_w as f32 / config.width,
            sy: inner_h as f32 / config.height,
        }
    }

    fn col(&self, x: f32) -> Option<u16> {
        let c = (x * self.sx).floor();
        (c >= 0.0 && c < self.inner_w as f32).then(|| 1 + c as u16)
    }

    fn row(&self, y: f32) -> Option<u16> {
        let r = (y * self.sy).floor();
        (r >= 0.0 && r < self.inner_h as f32).then(|| 2 + r as u16)
    }

    /// Visible columns covered by `[x, x + w)`, at least one wide.
    fn cols(&self, x: f32, w: f32) -> impl Iterator<Item = u16> {
        let lo = (x * self.sx).floor();
        let hi = ((x + w) * self.sx).ceil();
        let first = lo.max(0.0);
        let last = hi.max(lo + 1.0).min(self.inner_w as f32);
        let range = if last > first {
            first as u16..last as u16
        } else {
            0..0
        };
        range.map(|c| 1 + c)
    }

    /// World y at the centre of a screen row.
    fn world_y(&self, row: u16) -> f32 {
        (row.saturating_sub(2) as f32 + 0.5) / self.sy
    }

    fn rows(&self) -> std::ops::Range<u16> {
        2..2 + self.inner_h
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    world: &WorldSnapshot,
    config: &GameConfig,
    size: (u16, u16),
    toast: Option<&str>,
) -> std::io::Result<()> {
    let view = Viewport::new(size, config);
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, world)?;

    for pipe in &world.pipes {
        draw_pipe(out, &view, pipe, config)?;
    }
    for cannon in &world.cannons {
        draw_cannon(out, &view, cannon, &world.bird, config)?;
    }
    for projectile in &world.projectiles {
        draw_projectile(out, &view, projectile)?;
    }
    draw_bird(out, &view, &world.bird, config)?;

    match world.status {
        GameStatus::Waiting => {
            draw_banner(out, &view, "FLAPPY CANNON", "SPACE or ENTER to start")?;
        }
        GameStatus::GameOver => {
            let line = format!("Score {}   Best {}   R to restart", world.score, world.high_score);
            draw_banner(out, &view, "GAME OVER", &line)?;
        }
        GameStatus::Playing => {}
    }

    draw_footer(out, &view, toast)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in view.rows() {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &WorldSnapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", world.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(format!("   Best:{:>5}", world.high_score)))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_pipe<W: Write>(
    out: &mut W,
    view: &Viewport,
    pipe: &Pipe,
    config: &GameConfig,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_PIPE))?;
    for col in view.cols(pipe.x, config.pipe_width) {
        for row in view.rows() {
            let y = view.world_y(row);
            if y < pipe.gap_top || y > pipe.gap_bottom() {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("█"))?;
            }
        }
    }
    Ok(())
}

fn draw_bird<W: Write>(
    out: &mut W,
    view: &Viewport,
    bird: &Bird,
    config: &GameConfig,
) -> std::io::Result<()> {
    let Some(row) = view.row(bird.y + config.bird_size / 2.0) else {
        return Ok(());
    };
    let beak = match bird.tilt_degrees() {
        t if t < -15.0 => "/",
        t if t > 15.0 => "\\",
        _ => ">",
    };
    let cols: Vec<u16> = view.cols(bird.x, config.bird_size).collect();
    out.queue(style::SetForegroundColor(C_BIRD))?;
    for (i, &col) in cols.iter().enumerate() {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(if i + 1 == cols.len() { beak } else { "●" }))?;
    }
    Ok(())
}

/// Eight-way arrow closest to `degrees` (0° = right, clockwise).
fn barrel_glyph(degrees: f32) -> &'static str {
    const ARROWS: [&str; 8] = ["→", "↘", "↓", "↙", "←", "↖", "↑", "↗"];
    let octant = ((degrees / 45.0).round() as i32).rem_euclid(8) as usize;
    ARROWS[octant]
}

fn draw_cannon<W: Write>(
    out: &mut W,
    view: &Viewport,
    cannon: &Cannon,
    bird: &Bird,
    config: &GameConfig,
) -> std::io::Result<()> {
    let center = cannon.center(config);
    let Some(row) = view.row(center.y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_CANNON))?;
    for col in view.cols(cannon.x, config.cannon_width) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("■"))?;
    }
    if let Some(col) = view.col(center.x) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BARREL))?;
        out.queue(Print(barrel_glyph(cannon.aim_angle(bird.position(), config))))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    view: &Viewport,
    projectile: &Projectile,
) -> std::io::Result<()> {
    if let (Some(col), Some(row)) = (view.col(projectile.x), view.row(projectile.y)) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_PROJECTILE))?;
        out.queue(Print("•"))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    view: &Viewport,
    title: &str,
    subtitle: &str,
) -> std::io::Result<()> {
    let cx = view.width / 2;
    let cy = view.height / 2;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(subtitle.chars().count() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(subtitle))?;
    Ok(())
}

/// Bottom row: the current toast if there is one, otherwise the key help.
fn draw_footer<W: Write>(out: &mut W, view: &Viewport, toast: Option<&str>) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    match toast {
        Some(message) => {
            out.queue(style::SetForegroundColor(C_TOAST))?;
            out.queue(Print(message))?;
        }
        None => {
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print("SPACE : Flap   ENTER : Start   R : Reset   Q : Quit"))?;
        }
    }
    Ok(())
}
