//! Document store: ingested documents and their digestion progress.
//!
//! Documents are never deleted. A fully digested document stays in the
//! store for provenance but leaves the spatial index, so agents no longer
//! sense it as food.

use crate::spatial::SpatialGrid;
use hyphae_core::error::{ArgumentError, HyphaeError, Result};
use hyphae_core::tokenize::term_frequencies;
use hyphae_core::types::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Progress within this distance of 1.0 counts as complete.
const COMPLETION_EPSILON: f64 = 1e-9;

/// Angle between successive automatically placed documents.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// A document placed in the colony's plane for agents to digest.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub position: Position,
    digestion_progress: f64,
    term_frequencies: BTreeMap<String, u32>,
    /// Terms by descending frequency, then lexical order.
    ranked_terms: Vec<String>,
    /// Index of the next unconsumed term in `ranked_terms`.
    term_cursor: usize,
}

/// What one digestion event took from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Bite {
    pub mass: f64,
    /// Consumed terms with their frequency in the document.
    pub terms: Vec<(String, u32)>,
    /// Whether this bite brought progress to 1.0.
    pub completed: bool,
}

impl Document {
    fn new(id: DocumentId, title: &str, content: &str, position: Position) -> Self {
        let term_frequencies = term_frequencies(content);
        let mut ranked: Vec<(&String, &u32)> = term_frequencies.iter().collect();
        // BTreeMap iteration is already lexical, so a stable sort on
        // frequency keeps lexical order among equals.
        ranked.sort_by(|a, b| b.1.cmp(a.1));
        let ranked_terms = ranked.into_iter().map(|(t, _)| t.clone()).collect();

        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            position,
            digestion_progress: 0.0,
            term_frequencies,
            ranked_terms,
            term_cursor: 0,
        }
    }

    /// Fraction of the document consumed so far, in [0, 1].
    pub fn digestion_progress(&self) -> f64 {
        self.digestion_progress
    }

    pub fn is_digested(&self) -> bool {
        self.digestion_progress >= 1.0
    }

    pub fn remaining_mass(&self) -> f64 {
        1.0 - self.digestion_progress
    }

    pub fn term_frequencies(&self) -> &BTreeMap<String, u32> {
        &self.term_frequencies
    }

    pub fn term_frequency(&self, term: &str) -> u32 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }

    /// Terms in the order digestion consumes them.
    pub fn ranked_terms(&self) -> &[String] {
        &self.ranked_terms
    }

    /// Consume up to `rate` of the remaining mass.
    ///
    /// The bite carries `ceil(mass * n_terms)` terms (at least two when
    /// available) from the consumption cursor; the bite that finishes
    /// the document carries every term left. Returns `None` once the
    /// document is fully digested.
    pub fn bite(&mut self, rate: f64) -> Option<Bite> {
        if self.is_digested() {
            return None;
        }
        let mass = rate.min(self.remaining_mass());
        let mut progress = self.digestion_progress + mass;
        let completed = 1.0 - progress <= COMPLETION_EPSILON;
        if completed {
            progress = 1.0;
        }
        self.digestion_progress = progress;

        let left = self.ranked_terms.len() - self.term_cursor;
        let take = if completed {
            left
        } else {
            let proportional = (mass * self.ranked_terms.len() as f64).ceil() as usize;
            proportional.max(2).min(left)
        };
        let terms = self.ranked_terms[self.term_cursor..self.term_cursor + take]
            .iter()
            .map(|t| (t.clone(), self.term_frequency(t)))
            .collect();
        self.term_cursor += take;

        Some(Bite {
            mass,
            terms,
            completed,
        })
    }
}

/// All ingested documents plus a spatial index of the undigested ones.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    documents: Vec<Document>,
    food: SpatialGrid<DocumentId>,
    digested: usize,
    spacing: f64,
}

impl DocumentStore {
    /// `cell_size` should be at least the sensing radius; `spacing` is
    /// the distance unit for automatic placement.
    pub fn new(cell_size: f64, spacing: f64) -> Self {
        Self {
            documents: Vec::new(),
            food: SpatialGrid::new(cell_size),
            digested: 0,
            spacing,
        }
    }

    /// Store a new document and return its id.
    ///
    /// Without an explicit position the document is placed near the
    /// centroid of the existing ones, spiralling outward by golden angle
    /// so successive documents never land on the same point.
    pub fn insert(&mut self, title: &str, content: &str, position: Option<Position>) -> Result<DocumentId> {
        let position = match position {
            Some(p) if !p.is_finite() => {
                return Err(HyphaeError::from(ArgumentError::NonFinitePosition { x: p.x, y: p.y }))
            }
            Some(p) => p,
            None => self.next_position(),
        };

        let id = DocumentId(self.documents.len() as u64);
        let document = Document::new(id, title, content, position);
        self.food.insert(id, position);
        self.documents.push(document);
        Ok(id)
    }

    fn next_position(&self) -> Position {
        let n = self.documents.len() as f64;
        let centroid = Position::centroid(self.documents.iter().map(|d| &d.position));
        centroid.offset(n * GOLDEN_ANGLE, self.spacing * n.sqrt())
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(id.0 as usize)
    }

    /// Take a bite out of a document, retiring it from the food grid once
    /// it completes.
    pub fn bite(&mut self, id: DocumentId, rate: f64) -> Option<Bite> {
        let document = self.documents.get_mut(id.0 as usize)?;
        let bite = document.bite(rate)?;
        if bite.completed {
            self.food.remove(id);
            self.digested += 1;
        }
        Some(bite)
    }

    /// The closest undigested document within `radius`.
    pub fn nearest_food(&self, position: &Position, radius: f64) -> Option<(DocumentId, Position)> {
        self.food.nearest(position, radius)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of documents with progress 1.0.
    pub fn digested_count(&self) -> usize {
        self.digested
    }
}
