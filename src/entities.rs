//! Game entity types. Plain data with a few geometric accessors.

use crate::config::GameConfig;
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Waiting,
    Playing,
    GameOver,
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Fixed for the whole session; obstacles move toward the bird instead.
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
}

impl Bird {
    /// Vertically centred and at rest.
    pub fn spawn(config: &GameConfig) -> Self {
        Bird {
            x: config.bird_x,
            y: config.height / 2.0,
            velocity_y: 0.0,
        }
    }

    pub fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.bird_size, config.bird_size)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Nose angle for renderers: climbing tilts up, falling tilts down,
    /// clamped to ±90°.
    pub fn tilt_degrees(&self) -> f32 {
        (self.velocity_y * 3.0).clamp(-90.0, 90.0)
    }
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Height of the upper solid section; the gap starts here.
    pub gap_top: f32,
    pub gap_size: f32,
    /// Set once, the first frame the bird has cleared this pipe.
    pub scored: bool,
}

impl Pipe {
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    pub fn right(&self, config: &GameConfig) -> f32 {
        self.x + config.pipe_width
    }

    /// Horizontal footprint spanning the full field height.
    pub fn column(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, 0.0, config.pipe_width, config.height)
    }
}

// ── Cannons ───────────────────────────────────────────────────────────────────

/// Which way the barrel points at rest.  Shots are aimed at the bird; the
/// facing only decides the direction of a shot with nothing to aim at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::new(-1.0, 0.0),
            Facing::Right => Vec2::new(1.0, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cannon {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    /// Timestamp (ms) of the last shot, or of the spawn if it has not fired.
    pub last_shot: f64,
}

impl Cannon {
    pub fn center(&self, config: &GameConfig) -> Vec2 {
        Vec2::new(
            self.x + config.cannon_width / 2.0,
            self.y + config.cannon_height / 2.0,
        )
    }

    /// Turret rotation toward `target` in degrees, 0° pointing right and
    /// positive angles turning clockwise (y grows downward).
    pub fn aim_angle(&self, target: Vec2, config: &GameConfig) -> f32 {
        let d = target - self.center(config);
        d.y.atan2(d.x).to_degrees()
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

impl Projectile {
    pub fn bounds(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.projectile_size, config.projectile_size)
    }
}

// ── Identifiers ───────────────────────────────────────────────────────────────

/// Next free id per entity kind.  Counters wrap instead of panicking; a
/// session never gets near `u64::MAX` spawns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntityIds {
    pub cannon: u64,
    pub projectile: u64,
}

impl EntityIds {
    pub fn next_cannon(&mut self) -> u64 {
        let id = self.cannon;
        self.cannon = self.cannon.wrapping_add(1);
        id
    }

    pub fn next_projectile(&mut self) -> u64 {
        let id = self.projectile;
        self.projectile = self.projectile.wrapping_add(1);
        id
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire world at one instant.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub status: GameStatus,
    pub bird: Bird,
    /// Oldest first; the last element is the most recently spawned pipe.
    pub pipes: Vec<Pipe>,
    /// Oldest first; the last element is the most recently spawned cannon.
    pub cannons: Vec<Cannon>,
    pub projectiles: Vec<Projectile>,
    pub score: u32,
    pub high_score: u32,
    pub ids: EntityIds,
    /// Effective timestamp of the last tick, `None` before the first one.
    pub last_tick: Option<f64>,
}

impl WorldSnapshot {
    /// A fresh waiting world carrying over a previously stored high score.
    pub fn new(config: &GameConfig, high_score: u32) -> Self {
        WorldSnapshot {
            status: GameStatus::Waiting,
            bird: Bird::spawn(config),
            pipes: Vec::new(),
            cannons: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            high_score,
            ids: EntityIds::default(),
            last_tick: None,
        }
    }
}
