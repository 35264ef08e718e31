//! The per-frame driver.
//!
//! [`tick`] is the single authoritative update: a pure function from one
//! snapshot and a timestamp to the next snapshot.  [`Game`] wraps it with the
//! RNG, the persistence store and the notifier so a frontend only has to feed
//! it inputs and timestamps.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::collision::check_collision;
use crate::compute::{advance_cannons, advance_pipes, advance_projectiles, apply_gravity};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{GameStatus, WorldSnapshot};
use crate::notify::{new_high_score_message, Notifier};
use crate::state::{end_game, handle_input, GameEvent, Input, Outcome};
use crate::store::HighScoreStore;

/// Advance `world` to timestamp `now` (milliseconds).
///
/// Order: bird physics, pipes, cannons (which may launch projectiles),
/// projectiles, then collision against the prospective bird.  A hit ends the
/// run and discards that frame's bird update; everything else from the frame
/// is kept.  Outside `Playing` only the clock moves.
///
/// A `now` earlier than the previous tick (or NaN) is treated as the previous
/// tick, so elapsed time never goes negative.
pub fn tick(
    world: &WorldSnapshot,
    now: f64,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Outcome {
    let now = match world.last_tick {
        Some(last) if !(now >= last) => last,
        None if now.is_nan() => 0.0,
        _ => now,
    };
    if world.status != GameStatus::Playing {
        return Outcome {
            world: WorldSnapshot {
                last_tick: Some(now),
                ..world.clone()
            },
            events: Vec::new(),
        };
    }

    let mut events = Vec::new();
    let mut ids = world.ids.clone();

    // ── 1. Bird ──────────────────────────────────────────────────────────────
    let bird = apply_gravity(&world.bird, config);

    // ── 2. Pipes & scoring ───────────────────────────────────────────────────
    let pipe_step = advance_pipes(&world.pipes, &bird, config, rng);
    let mut score = world.score;
    for _ in 0..pipe_step.newly_scored {
        score = score.saturating_add(1);
        events.push(GameEvent::Scored { score });
    }

    // ── 3. Cannons ───────────────────────────────────────────────────────────
    let cannon_step = advance_cannons(
        &world.cannons,
        bird.position(),
        now,
        &mut ids,
        config,
        rng,
    );

    // ── 4. Projectiles (fresh shots move on their first frame too) ───────────
    let mut in_flight = world.projectiles.clone();
    in_flight.extend(cannon_step.launched);
    let projectiles = advance_projectiles(&in_flight, config);

    let next = WorldSnapshot {
        status: GameStatus::Playing,
        bird,
        pipes: pipe_step.pipes,
        cannons: cannon_step.cannons,
        projectiles,
        score,
        high_score: world.high_score,
        ids,
        last_tick: Some(now),
    };

    // ── 5. Collision ─────────────────────────────────────────────────────────
    let hit = check_collision(&next.bird, &next.pipes, &next.projectiles, config);
    match hit {
        Some(hazard) => {
            let rolled_back = WorldSnapshot {
                bird: world.bird.clone(),
                ..next
            };
            let mut over = end_game(&rolled_back, hazard);
            events.append(&mut over.events);
            Outcome {
                world: over.world,
                events,
            }
        }
        None => Outcome {
            world: next,
            events,
        },
    }
}

// ── Stateful driver ──────────────────────────────────────────────────────────

/// Owns the current snapshot and its collaborators.  One `advance` per
/// rendered frame; inputs may arrive between frames.
pub struct Game<S, N, R> {
    config: GameConfig,
    world: WorldSnapshot,
    store: S,
    notifier: N,
    rng: R,
}

impl<S, N, R> Game<S, N, R>
where
    S: HighScoreStore,
    N: Notifier,
    R: Rng,
{
    /// Start a session in `Waiting`, seeding the high score from `store`.
    /// A store that fails to load counts as having no high score.
    pub fn new(config: GameConfig, store: S, notifier: N, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = match store.load() {
            Ok(stored) => stored.unwrap_or(0),
            Err(err) => {
                warn!("could not load high score, starting from 0: {err}");
                0
            }
        };
        debug!(high_score, "session created");
        Ok(Game {
            world: WorldSnapshot::new(&config, high_score),
            config,
            store,
            notifier,
            rng,
        })
    }

    /// Resume from an existing snapshot without consulting the store.
    pub fn with_world(
        config: GameConfig,
        world: WorldSnapshot,
        store: S,
        notifier: N,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Game {
            config,
            world,
            store,
            notifier,
            rng,
        })
    }

    pub fn start(&mut self) -> Vec<GameEvent> {
        self.input(Input::Start)
    }

    pub fn jump(&mut self) -> Vec<GameEvent> {
        self.input(Input::Jump)
    }

    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.input(Input::Reset)
    }

    pub fn input(&mut self, input: Input) -> Vec<GameEvent> {
        let outcome = handle_input(&self.world, input, &self.config);
        self.commit(outcome)
    }

    /// Run one frame at `now` and return the resulting snapshot.
    pub fn advance(&mut self, now: f64) -> WorldSnapshot {
        self.advance_with_events(now).0
    }

    /// Like [`Game::advance`], also returning the frame's events.
    pub fn advance_with_events(&mut self, now: f64) -> (WorldSnapshot, Vec<GameEvent>) {
        let outcome = tick(&self.world, now, &self.config, &mut self.rng);
        let events = self.commit(outcome);
        (self.world.clone(), events)
    }

    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn commit(&mut self, outcome: Outcome) -> Vec<GameEvent> {
        self.world = outcome.world;
        for event in &outcome.events {
            match event {
                GameEvent::Started => debug!("run started"),
                GameEvent::Reset => debug!("world reset"),
                GameEvent::GameOver { score, hazard } => {
                    info!(score, ?hazard, "game over");
                }
                GameEvent::NewHighScore { score, previous } => {
                    info!(score, previous, "new high score");
                    if let Err(err) = self.store.save(*score) {
                        warn!("could not save high score {score}: {err}");
                    }
                    self.notifier.notify(&new_high_score_message(*score));
                }
                GameEvent::Flapped | GameEvent::Scored { .. } => {}
            }
        }
        outcome.events
    }
}
