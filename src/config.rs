//! Tuning constants for a session.
//!
//! A `GameConfig` is chosen once when a [`crate::frame::Game`] is built and
//! never changes afterwards.  `Default` reproduces the classic 800×500 field.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,

    pub bird_x: f32,
    pub bird_size: f32,
    /// Added to the bird's vertical velocity every frame.
    pub gravity: f32,
    /// Velocity assigned (not added) on a flap.  Negative is upward.
    pub jump_force: f32,

    /// Horizontal distance pipes and cannons travel per frame.
    pub scroll_speed: f32,
    pub pipe_width: f32,
    pub gap_size: f32,
    /// A new pipe appears once the last one is left of `width - pipe_spacing`.
    pub pipe_spacing: f32,
    /// Lowest allowed gap top.
    pub gap_top_margin: f32,
    /// Space kept free between the gap bottom and the floor at the top of the
    /// random range.
    pub gap_bottom_margin: f32,

    pub cannon_width: f32,
    pub cannon_height: f32,
    pub cannon_spacing: f32,
    /// Per-frame chance of a cannon spawning when spacing allows.
    pub cannon_spawn_chance: f64,
    /// Cannons are dropped once `x <= -cannon_retire_margin`.
    pub cannon_retire_margin: f32,
    /// Vertical margin kept clear of the ceiling and floor for cannon spawns.
    pub cannon_vertical_margin: f32,
    /// Milliseconds a cannon must wait between shots.
    pub shoot_interval: f64,

    pub projectile_speed: f32,
    pub projectile_size: f32,
    /// Projectiles survive until they are this far outside the field.
    pub projectile_margin: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 800.0,
            height: 500.0,
            bird_x: 100.0,
            bird_size: 30.0,
            gravity: 0.5,
            jump_force: -8.0,
            scroll_speed: 2.0,
            pipe_width: 60.0,
            gap_size: 150.0,
            pipe_spacing: 300.0,
            gap_top_margin: 50.0,
            gap_bottom_margin: 100.0,
            cannon_width: 40.0,
            cannon_height: 25.0,
            cannon_spacing: 200.0,
            cannon_spawn_chance: 0.003,
            cannon_retire_margin: 50.0,
            cannon_vertical_margin: 50.0,
            shoot_interval: 2000.0,
            projectile_speed: 4.0,
            projectile_size: 20.0,
            projectile_margin: 30.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("play area must be positive, got {width}x{height}")]
    EmptyField { width: f32, height: f32 },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("gap of {gap_size} leaves no room for a pipe in a field {height} tall")]
    GapDoesNotFit { gap_size: f32, height: f32 },
    #[error("cannon spawn chance {0} is outside [0, 1]")]
    SpawnChance(f64),
    #[error("bird of size {bird_size} does not fit in a field {height} tall")]
    BirdDoesNotFit { bird_size: f32, height: f32 },
}

impl GameConfig {
    /// Check that every random range used by the spawner is non-empty and
    /// that every random pipe keeps its gap inside the field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::EmptyField {
                width: self.width,
                height: self.height,
            });
        }
        let positive = [
            ("bird_size", self.bird_size),
            ("pipe_width", self.pipe_width),
            ("gap_size", self.gap_size),
            ("projectile_size", self.projectile_size),
            ("cannon_width", self.cannon_width),
            ("cannon_height", self.cannon_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.bird_size >= self.height {
            return Err(ConfigError::BirdDoesNotFit {
                bird_size: self.bird_size,
                height: self.height,
            });
        }
        if self.gap_top_margin < 0.0
            || self.gap_bottom_margin < 0.0
            || self.gap_top_min() > self.gap_top_max()
        {
            return Err(ConfigError::GapDoesNotFit {
                gap_size: self.gap_size,
                height: self.height,
            });
        }
        if 2.0 * self.cannon_vertical_margin >= self.height {
            return Err(ConfigError::EmptyField {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.cannon_spawn_chance) {
            return Err(ConfigError::SpawnChance(self.cannon_spawn_chance));
        }
        Ok(())
    }

    /// Lowest gap top a spawned pipe may use.
    pub fn gap_top_min(&self) -> f32 {
        self.gap_top_margin
    }

    /// Highest gap top a spawned pipe may use.
    pub fn gap_top_max(&self) -> f32 {
        self.height - self.gap_size - self.gap_bottom_margin
    }
}
