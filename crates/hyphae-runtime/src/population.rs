//! Agent population: the live cells plus a spatial index over them.
//!
//! Cells are kept in ascending id order: ids are handed out sequentially
//! and newborns are appended, so iteration order is the deterministic
//! apply order of a tick.

use crate::agent::{Cell, Intent};
use crate::config::ColonyConfig;
use crate::document_store::DocumentStore;
use crate::spatial::SpatialGrid;
use hyphae_core::types::*;
use std::collections::BTreeSet;
use std::f64::consts::TAU;

#[derive(Debug, Clone)]
pub struct Population {
    cells: Vec<Cell>,
    grid: SpatialGrid<AgentId>,
    next_id: u64,
    total_spawned: usize,
    total_died: usize,
}

impl Population {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: Vec::new(),
            grid: SpatialGrid::new(cell_size),
            next_id: 0,
            total_spawned: 0,
            total_died: 0,
        }
    }

    /// Spawn `count` cells evenly spaced on a ring around the origin.
    pub fn seed_ring(&mut self, count: usize, radius: f64, energy: f64, tick: Tick) {
        for i in 0..count {
            let angle = TAU * i as f64 / count as f64;
            self.spawn(Position::origin().offset(angle, radius), energy, tick);
        }
    }

    /// Add a cell and return its id.
    pub fn spawn(&mut self, position: Position, energy: f64, tick: Tick) -> AgentId {
        let id = self.allocate_id();
        self.cells.push(Cell::new(id, position, energy, tick));
        self.grid.insert(id, position);
        self.total_spawned += 1;
        id
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Perception phase: every cell reads the same start-of-tick state.
    pub fn perceive_all(&self, documents: &DocumentStore, config: &ColonyConfig, tick: Tick) -> Vec<Intent> {
        self.cells
            .iter()
            .map(|cell| cell.perceive(documents, config, tick))
            .collect()
    }

    /// Commit moves and upkeep. Returns the ids of cells that starved.
    pub fn apply_intents(&mut self, intents: &[Intent]) -> BTreeSet<AgentId> {
        let mut dead = BTreeSet::new();
        for (cell, intent) in self.cells.iter_mut().zip(intents) {
            debug_assert_eq!(cell.id, intent.agent);
            cell.position = intent.position;
            cell.energy = intent.energy.max(0.0);
            self.grid.insert(cell.id, cell.position);
            if !intent.survives() {
                dead.insert(cell.id);
            }
        }
        dead
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Cell> {
        // cells are sorted by id
        let idx = self.cells.binary_search_by(|c| c.id.cmp(&id)).ok()?;
        self.cells.get_mut(idx)
    }

    pub fn get(&self, id: AgentId) -> Option<&Cell> {
        let idx = self.cells.binary_search_by(|c| c.id.cmp(&id)).ok()?;
        self.cells.get(idx)
    }

    /// Divide every well-fed survivor, in id order, while the cap allows.
    ///
    /// The child takes half of the parent's energy and appears at the
    /// parent's position. Returns `(parent, child)` pairs.
    pub fn reproduce(
        &mut self,
        dead: &BTreeSet<AgentId>,
        threshold: f64,
        max_agents: usize,
        tick: Tick,
    ) -> Vec<(AgentId, AgentId)> {
        let mut live = self.cells.len() - dead.len();
        let mut newborns = Vec::new();
        let mut births = Vec::new();

        for i in 0..self.cells.len() {
            if live >= max_agents {
                break;
            }
            let cell = &self.cells[i];
            if dead.contains(&cell.id) || cell.energy <= threshold {
                continue;
            }
            let share = cell.energy / 2.0;
            let (parent, position) = (cell.id, cell.position);
            self.cells[i].energy = share;

            let child = self.allocate_id();
            newborns.push(Cell::new(child, position, share, tick));
            births.push((parent, child));
            live += 1;
        }

        for cell in newborns {
            self.grid.insert(cell.id, cell.position);
            self.cells.push(cell);
            self.total_spawned += 1;
        }
        births
    }

    /// Drop starved cells. Returns them for reporting.
    pub fn remove_dead(&mut self, dead: &BTreeSet<AgentId>) -> Vec<Cell> {
        if dead.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<Cell>, Vec<Cell>) =
            self.cells.drain(..).partition(|c| dead.contains(&c.id));
        self.cells = kept;
        for cell in &removed {
            self.grid.remove(cell.id);
        }
        self.total_died += removed.len();
        removed
    }

    /// Ids of cells within `radius` of `position`, ascending.
    pub fn near(&self, position: &Position, radius: f64) -> Vec<AgentId> {
        self.grid
            .within(position, radius)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn total_spawned(&self) -> usize {
        self.total_spawned
    }

    pub fn total_died(&self) -> usize {
        self.total_died
    }
}
