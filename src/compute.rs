//! Pure physics and spawner functions.
//!
//! Every public function takes immutable inputs (plus, where needed, an RNG
//! handle or an id counter owned by the caller) and returns brand-new values.
//! The config is assumed to have passed [`GameConfig::validate`]; the random
//! ranges below are only non-empty for a valid config.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bird, Cannon, EntityIds, Facing, Pipe, Projectile};
use crate::geometry::Vec2;

// ── Bird physics ─────────────────────────────────────────────────────────────

/// One frame of free fall: velocity first, then position.
pub fn apply_gravity(bird: &Bird, config: &GameConfig) -> Bird {
    let velocity_y = bird.velocity_y + config.gravity;
    Bird {
        y: bird.y + velocity_y,
        velocity_y,
        ..bird.clone()
    }
}

/// Replace the vertical velocity with the jump impulse.  Position is untouched
/// until the next frame integrates it.
pub fn flap(bird: &Bird, config: &GameConfig) -> Bird {
    Bird {
        velocity_y: config.jump_force,
        ..bird.clone()
    }
}

// ── Pipes ────────────────────────────────────────────────────────────────────

pub fn spawn_pipe(config: &GameConfig, rng: &mut impl Rng) -> Pipe {
    Pipe {
        x: config.width,
        gap_top: rng.gen_range(config.gap_top_min()..=config.gap_top_max()),
        gap_size: config.gap_size,
        scored: false,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PipeStep {
    pub pipes: Vec<Pipe>,
    /// Pipes the bird cleared for the first time this frame.
    pub newly_scored: u32,
}

/// Scroll, retire, spawn, then score.
pub fn advance_pipes(
    pipes: &[Pipe],
    bird: &Bird,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> PipeStep {
    let mut pipes: Vec<Pipe> = pipes
        .iter()
        .map(|p| Pipe {
            x: p.x - config.scroll_speed,
            ..p.clone()
        })
        .filter(|p| p.x > -config.pipe_width)
        .collect();

    let room_for_next = pipes
        .last()
        .map_or(true, |last| last.x < config.width - config.pipe_spacing);
    if room_for_next {
        pipes.push(spawn_pipe(config, rng));
    }

    // The bird counts as past a pipe once its x is beyond the trailing edge.
    let mut newly_scored = 0;
    for pipe in pipes.iter_mut() {
        if !pipe.scored && bird.x > pipe.right(config) {
            pipe.scored = true;
            newly_scored += 1;
        }
    }

    PipeStep {
        pipes,
        newly_scored,
    }
}

// ── Cannons ──────────────────────────────────────────────────────────────────

/// Velocity of a shot from `from` toward `target` at `speed`.  When the two
/// points coincide the shot leaves along `fallback` instead.
pub fn aim_velocity(from: Vec2, target: Vec2, fallback: Facing, speed: f32) -> Vec2 {
    (target - from)
        .normalize()
        .unwrap_or_else(|| fallback.unit())
        .scale(speed)
}

/// Fire `cannon` at `target` if its cooldown has elapsed.  Returns the
/// (possibly reloaded) cannon and the launched projectile, if any.
pub fn fire(
    cannon: &Cannon,
    target: Vec2,
    now: f64,
    ids: &mut EntityIds,
    config: &GameConfig,
) -> (Cannon, Option<Projectile>) {
    if now - cannon.last_shot <= config.shoot_interval {
        return (cannon.clone(), None);
    }
    let origin = cannon.center(config);
    let v = aim_velocity(origin, target, cannon.facing, config.projectile_speed);
    let projectile = Projectile {
        id: ids.next_projectile(),
        x: origin.x,
        y: origin.y,
        velocity_x: v.x,
        velocity_y: v.y,
    };
    let reloaded = Cannon {
        last_shot: now,
        ..cannon.clone()
    };
    (reloaded, Some(projectile))
}

pub fn spawn_cannon(
    now: f64,
    ids: &mut EntityIds,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Cannon {
    let margin = config.cannon_vertical_margin;
    let facing = if rng.gen_bool(0.5) {
        Facing::Left
    } else {
        Facing::Right
    };
    Cannon {
        id: ids.next_cannon(),
        x: config.width,
        y: rng.gen_range(margin..config.height - margin),
        facing,
        last_shot: now,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CannonStep {
    pub cannons: Vec<Cannon>,
    /// Projectiles fired this frame, still at their muzzle positions.
    pub launched: Vec<Projectile>,
}

/// Scroll, fire, retire, then maybe spawn.  Firing runs before retirement so a
/// cannon leaving the field still gets its last shot.
pub fn advance_cannons(
    cannons: &[Cannon],
    target: Vec2,
    now: f64,
    ids: &mut EntityIds,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> CannonStep {
    let mut launched = Vec::new();
    let mut cannons: Vec<Cannon> = cannons
        .iter()
        .map(|c| {
            let scrolled = Cannon {
                x: c.x - config.scroll_speed,
                ..c.clone()
            };
            let (cannon, shot) = fire(&scrolled, target, now, ids, config);
            launched.extend(shot);
            cannon
        })
        .filter(|c| c.x > -config.cannon_retire_margin)
        .collect();

    // Roll every frame so the RNG stream does not depend on spacing.
    let roll = rng.gen_bool(config.cannon_spawn_chance);
    let room_for_next = cannons
        .last()
        .map_or(true, |last| last.x < config.width - config.cannon_spacing);
    if roll && room_for_next {
        cannons.push(spawn_cannon(now, ids, config, rng));
    }

    CannonStep { cannons, launched }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Move every projectile along its launch velocity and drop those beyond the
/// off-screen margin.
pub fn advance_projectiles(projectiles: &[Projectile], config: &GameConfig) -> Vec<Projectile> {
    let m = config.projectile_margin;
    projectiles
        .iter()
        .map(|p| Projectile {
            x: p.x + p.velocity_x,
            y: p.y + p.velocity_y,
            ..p.clone()
        })
        .filter(|p| p.x > -m && p.x < config.width + m && p.y > -m && p.y < config.height + m)
        .collect()
}
