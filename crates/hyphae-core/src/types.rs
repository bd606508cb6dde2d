//! Shared types used across the hyphae crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The current tick of the simulation.
pub type Tick = u64;

/// Identifier of an ingested document.
///
/// Assigned sequentially at ingestion, so ordering by id is ordering by
/// arrival. Ties in sensing are broken by the lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an agent (cell) in the colony.
///
/// Assigned sequentially at birth; the apply phase of a tick visits
/// agents in ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in the unbounded 2D plane the colony lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Move up to `max_step` toward `target`, stopping on it rather than
    /// overshooting.
    pub fn step_toward(&self, target: &Position, max_step: f64) -> Position {
        let distance = self.distance_to(target);
        if distance <= max_step || distance == 0.0 {
            return *target;
        }
        let scale = max_step / distance;
        Position::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }

    /// The point `distance` away along `angle` (radians).
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }

    /// Arithmetic mean of a set of positions; the origin when empty.
    pub fn centroid<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Position {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for p in positions {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        if n == 0 {
            Position::origin()
        } else {
            Position::new(sx / n as f64, sy / n as f64)
        }
    }
}

/// Data stored in a knowledge graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptNode {
    /// Unique key: the digested term.
    pub label: String,
    /// Accumulated digestion mass. Never decreases.
    pub weight: f64,
    pub created_tick: Tick,
}

/// Data stored on an undirected knowledge graph edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptEdge {
    /// Co-occurrence strength; +1 per digestion event containing both ends.
    pub weight: f64,
    pub created_tick: Tick,
    pub last_activated_tick: Tick,
}
