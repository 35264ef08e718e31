//! Game state machine: Waiting → Playing → GameOver → (reset) → Waiting.
//!
//! Transitions are pure.  Side effects (saving the high score, telling the
//! player about it) are described by [`GameEvent`]s and carried out by the
//! driver in [`crate::frame`].

use crate::collision::Hazard;
use crate::compute::flap;
use crate::config::GameConfig;
use crate::entities::{Bird, GameStatus, WorldSnapshot};

/// Discrete player intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Start,
    Jump,
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Started,
    Flapped,
    /// A pipe was cleared; `score` is the new total.
    Scored { score: u32 },
    GameOver { score: u32, hazard: Hazard },
    /// Emitted together with `GameOver` when the run beat the stored best.
    NewHighScore { score: u32, previous: u32 },
    Reset,
}

/// A new world plus what happened on the way to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub world: WorldSnapshot,
    pub events: Vec<GameEvent>,
}

impl Outcome {
    pub fn unchanged(world: &WorldSnapshot) -> Self {
        Outcome {
            world: world.clone(),
            events: Vec::new(),
        }
    }
}

pub fn handle_input(world: &WorldSnapshot, input: Input, config: &GameConfig) -> Outcome {
    match (input, world.status) {
        (Input::Start | Input::Jump, GameStatus::Waiting) => start(world, config),
        (Input::Jump, GameStatus::Playing) => Outcome {
            world: WorldSnapshot {
                bird: flap(&world.bird, config),
                ..world.clone()
            },
            events: vec![GameEvent::Flapped],
        },
        (Input::Reset, _) => reset(world, config),
        // Start while playing, and anything but reset after game over.
        _ => Outcome::unchanged(world),
    }
}

/// Begin a run.  Entering play gives the bird its first flap.
fn start(world: &WorldSnapshot, config: &GameConfig) -> Outcome {
    Outcome {
        world: WorldSnapshot {
            status: GameStatus::Playing,
            bird: flap(&world.bird, config),
            ..world.clone()
        },
        events: vec![GameEvent::Started, GameEvent::Flapped],
    }
}

/// Clear the field and score.  The high score, id counters and clock carry
/// over so ids stay unique and time stays monotonic across runs.
fn reset(world: &WorldSnapshot, config: &GameConfig) -> Outcome {
    Outcome {
        world: WorldSnapshot {
            status: GameStatus::Waiting,
            bird: Bird::spawn(config),
            pipes: Vec::new(),
            cannons: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            ..world.clone()
        },
        events: vec![GameEvent::Reset],
    }
}

/// Enter `GameOver`, promoting the score to high score if it is strictly
/// better.
pub fn end_game(world: &WorldSnapshot, hazard: Hazard) -> Outcome {
    let mut events = vec![GameEvent::GameOver {
        score: world.score,
        hazard,
    }];
    let high_score = if world.score > world.high_score {
        events.push(GameEvent::NewHighScore {
            score: world.score,
            previous: world.high_score,
        });
        world.score
    } else {
        world.high_score
    };
    Outcome {
        world: WorldSnapshot {
            status: GameStatus::GameOver,
            high_score,
            ..world.clone()
        },
        events,
    }
}
