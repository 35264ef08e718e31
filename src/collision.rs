//! Hit tests between the bird and everything that can end a run.

use crate::config::GameConfig;
use crate::entities::{Bird, Pipe, Projectile};
use crate::geometry::Rect;

/// What the bird ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// Ceiling or floor.
    Boundary,
    Pipe,
    Projectile { id: u64 },
}

pub fn hits_boundary(bird: &Rect, config: &GameConfig) -> bool {
    bird.y < 0.0 || bird.bottom() > config.height
}

/// A bird overlapping the pipe column collides unless it sits entirely inside
/// the gap.
pub fn hits_pipe(bird: &Rect, pipe: &Pipe, config: &GameConfig) -> bool {
    bird.overlaps_horizontally(&pipe.column(config))
        && !bird.within_vertical(pipe.gap_top, pipe.gap_bottom())
}

pub fn hits_projectile(bird: &Rect, projectile: &Projectile, config: &GameConfig) -> bool {
    bird.overlaps(&projectile.bounds(config))
}

/// First hazard the bird touches, checked in order boundary → pipes →
/// projectiles.
pub fn check_collision(
    bird: &Bird,
    pipes: &[Pipe],
    projectiles: &[Projectile],
    config: &GameConfig,
) -> Option<Hazard> {
    let b = bird.bounds(config);
    if hits_boundary(&b, config) {
        return Some(Hazard::Boundary);
    }
    if pipes.iter().any(|p| hits_pipe(&b, p, config)) {
        return Some(Hazard::Pipe);
    }
    projectiles
        .iter()
        .find(|p| hits_projectile(&b, p, config))
        .map(|p| Hazard::Projectile { id: p.id })
}
