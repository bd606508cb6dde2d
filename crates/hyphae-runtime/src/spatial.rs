//! Spatial index: uniform grid for radius queries.
//!
//! Entities are bucketed into square cells whose side is at least the
//! query radius the colony uses (the digestion radius), so a radius
//! query only has to look at the 3x3 block of cells around the query
//! point. Insert, move, remove and query are O(1) amortized per entity.

use hyphae_core::types::Position;
use std::collections::{BTreeMap, HashMap};

type CellKey = (i64, i64);

/// A uniform grid keyed by a copyable, ordered id.
#[derive(Debug, Clone)]
pub struct SpatialGrid<K> {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<K>>,
    positions: BTreeMap<K, Position>,
}

impl<K: Copy + Ord> SpatialGrid<K> {
    /// A grid with the given cell side. Non-positive or non-finite
    /// sizes fall back to 1.0.
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            cells: HashMap::new(),
            positions: BTreeMap::new(),
        }
    }

    fn cell_of(&self, position: &Position) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.y / self.cell_size).floor() as i64,
        )
    }

    /// Insert `key` at `position`, moving it if already present.
    pub fn insert(&mut self, key: K, position: Position) {
        if let Some(old) = self.positions.insert(key, position) {
            let old_cell = self.cell_of(&old);
            if old_cell == self.cell_of(&position) {
                return;
            }
            self.detach(key, old_cell);
        }
        let cell = self.cell_of(&position);
        self.cells.entry(cell).or_default().push(key);
    }

    pub fn remove(&mut self, key: K) -> Option<Position> {
        let old = self.positions.remove(&key)?;
        let cell = self.cell_of(&old);
        self.detach(key, cell);
        Some(old)
    }

    fn detach(&mut self, key: K, cell: CellKey) {
        if let Some(bucket) = self.cells.get_mut(&cell) {
            bucket.retain(|k| *k != key);
            if bucket.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }

    pub fn position(&self, key: K) -> Option<Position> {
        self.positions.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All entities within `radius` of `center` (inclusive), with their
    /// distance, sorted by key.
    pub fn within(&self, center: &Position, radius: f64) -> Vec<(K, Position, f64)> {
        if radius.is_nan() || radius < 0.0 {
            return Vec::new();
        }
        let (cx, cy) = self.cell_of(center);
        let reach = (radius / self.cell_size).ceil().max(1.0);
        let span = (2.0 * reach + 1.0).powi(2);

        let buckets: Vec<&Vec<K>> = if span > self.cells.len() as f64 {
            // fewer occupied cells than the block covers
            let in_block = |(gx, gy): CellKey| {
                (i128::from(gx) - i128::from(cx)).abs() as f64 <= reach
                    && (i128::from(gy) - i128::from(cy)).abs() as f64 <= reach
            };
            self.cells
                .iter()
                .filter(|(key, _)| in_block(**key))
                .map(|(_, bucket)| bucket)
                .collect()
        } else {
            let reach = reach as i64;
            let mut buckets = Vec::new();
            for gx in cx.saturating_sub(reach)..=cx.saturating_add(reach) {
                for gy in cy.saturating_sub(reach)..=cy.saturating_add(reach) {
                    if let Some(bucket) = self.cells.get(&(gx, gy)) {
                        buckets.push(bucket);
                    }
                }
            }
            buckets
        };

        let mut found: Vec<(K, Position, f64)> = buckets
            .into_iter()
            .flatten()
            .filter_map(|key| {
                let pos = self.positions.get(key)?;
                let distance = pos.distance_to(center);
                (distance <= radius).then_some((*key, *pos, distance))
            })
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        found
    }

    /// The closest entity within `radius`; equal distances go to the
    /// lowest key.
    pub fn nearest(&self, center: &Position, radius: f64) -> Option<(K, Position)> {
        self.within(center, radius)
            .into_iter()
            .min_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.cmp(&b.0)))
            .map(|(key, pos, _)| (key, pos))
    }
}
