//! Cell: the colony's digesting agent.
//!
//! Each tick a cell senses the nearest undigested document within the
//! digestion radius, steps toward it (or wanders when there is none), and
//! pays its energy upkeep. Perception only reads shared state and returns
//! an [`Intent`]; the colony applies all intents afterwards so cells never
//! see each other's moves within the same tick.
//!
//! Biological analog: a phagocyte following a nutrient gradient, burning
//! energy as it goes and dividing once it is well fed.

use crate::config::ColonyConfig;
use crate::document_store::DocumentStore;
use hyphae_core::types::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::TAU;

/// A simulated cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub id: AgentId,
    pub position: Position,
    pub energy: f64,
    pub born_tick: Tick,
}

/// The outcome of one cell's perception phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Intent {
    pub agent: AgentId,
    /// Position after moving.
    pub position: Position,
    /// Energy after upkeep.
    pub energy: f64,
    /// Document sensed this tick, if any.
    pub target: Option<DocumentId>,
}

impl Intent {
    /// Cells whose energy fell to zero die this tick.
    pub fn survives(&self) -> bool {
        self.energy > 0.0
    }
}

impl Cell {
    pub fn new(id: AgentId, position: Position, energy: f64, born_tick: Tick) -> Self {
        Self {
            id,
            position,
            energy,
            born_tick,
        }
    }

    /// Ticks since birth.
    pub fn age(&self, now: Tick) -> Tick {
        now.saturating_sub(self.born_tick)
    }

    /// Sense, move and decay against a read-only view of the colony.
    pub fn perceive(&self, documents: &DocumentStore, config: &ColonyConfig, tick: Tick) -> Intent {
        let target = documents.nearest_food(&self.position, config.digestion_radius);

        let position = match target {
            Some((_, food)) => self.position.step_toward(&food, config.move_step),
            None => {
                let mut rng = walk_rng(config.seed, self.id, tick);
                let angle = rng.gen::<f64>() * TAU;
                self.position.offset(angle, config.move_step)
            }
        };

        Intent {
            agent: self.id,
            position,
            energy: self.energy - config.energy_decay,
            target: target.map(|(id, _)| id),
        }
    }
}

/// A generator private to one (agent, tick) pair.
///
/// Seeding per pair means adding or removing a cell never shifts the
/// random sequence of any other cell.
pub fn walk_rng(seed: u64, agent: AgentId, tick: Tick) -> SmallRng {
    let mixed = splitmix64(seed ^ splitmix64(agent.0 ^ splitmix64(tick)));
    SmallRng::seed_from_u64(mixed)
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
