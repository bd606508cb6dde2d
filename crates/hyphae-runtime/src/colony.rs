//! Colony: the engine's single owner and public boundary.
//!
//! The colony owns the document store, the knowledge graph, the lexical
//! index and the agent population. Nothing is shared outside it: every
//! instance is independent, and callers serialize mutation themselves.
//!
//! Each tick:
//! 1. Every cell perceives the start-of-tick state (sense, move, decay)
//! 2. Moves and upkeep are committed; starved cells are marked dead
//! 3. Surviving cells digest their sensed document, in ascending id
//! 4. Well-fed survivors divide, in ascending id, up to the cap
//! 5. Dead cells are removed and the tick counter advances
//!
//! Phase 1 reads only shared snapshots; phases 3 and 4 run on a single
//! mutation path in fixed order, so the outcome never depends on how
//! phase 1 is scheduled.

use crate::agent::Cell;
use crate::config::ColonyConfig;
use crate::digestion::{digest, DigestionEvent};
use crate::document_store::{Document, DocumentStore};
use crate::population::Population;
use crate::topology_impl::PetKnowledgeGraph;
use hyphae_core::error::{ArgumentError, HyphaeError, Result};
use hyphae_core::lexical::LexicalIndex;
use hyphae_core::topology::KnowledgeTopology;
use hyphae_core::types::*;
use hyphae_rag::{hybrid_query, HybridConfig, QueryResult};
use serde::Serialize;
use tracing::{debug, info, trace};

/// Event emitted by the colony during simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ColonyEvent {
    /// A cell moved to a new position.
    Moved { agent: AgentId, to: Position },
    /// A cell digested part of a document.
    Digested(DigestionEvent),
    /// A document reached full digestion.
    DocumentDigested { document: DocumentId },
    /// A cell divided.
    Born { parent: AgentId, child: AgentId },
    /// A cell ran out of energy.
    Died { agent: AgentId, age: Tick },
    /// A tick completed.
    TickComplete { tick: Tick, alive: usize, born: usize, died: usize },
}

/// Point-in-time statistics, derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColonyStats {
    pub tick: Tick,
    pub graph_nodes: usize,
    pub graph_edges: usize,
    pub documents_total: usize,
    pub documents_digested: usize,
    pub agents_alive: usize,
    pub agents_died: usize,
    pub total_spawned: usize,
}

/// A serializable snapshot of a graph node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSnapshot {
    pub label: String,
    pub weight: f64,
}

/// A serializable snapshot of a graph edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeSnapshot {
    pub from_label: String,
    pub to_label: String,
    pub weight: f64,
}

/// A serializable snapshot of a document's digestion state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub id: DocumentId,
    pub title: String,
    pub position: Position,
    pub digestion_progress: f64,
}

/// A serializable snapshot of a cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub position: Position,
    pub energy: f64,
    pub age: Tick,
}

/// A complete serializable snapshot of the colony at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColonySnapshot {
    pub tick: Tick,
    pub agents: Vec<AgentSnapshot>,
    pub documents: Vec<DocumentSnapshot>,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub stats: ColonyStats,
}

impl ColonySnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Owns every subsystem and runs the simulation.
#[derive(Debug, Clone)]
pub struct Colony {
    config: ColonyConfig,
    documents: DocumentStore,
    graph: PetKnowledgeGraph,
    index: LexicalIndex,
    population: Population,
    tick: Tick,
}

impl Colony {
    /// Create a colony, spawning `initial_agents` cells on a ring around
    /// the origin.
    pub fn new(config: ColonyConfig) -> Result<Self> {
        config.validate()?;
        let colony = Self::with_valid_config(config);
        info!(
            agents = colony.population.len(),
            max_agents = colony.config.max_agents,
            seed = colony.config.seed,
            "colony created"
        );
        Ok(colony)
    }

    fn with_valid_config(config: ColonyConfig) -> Self {
        let mut population = Population::new(config.digestion_radius);
        population.seed_ring(
            config.initial_agents,
            config.digestion_radius / 2.0,
            config.initial_energy,
            0,
        );
        Self {
            documents: DocumentStore::new(config.digestion_radius, config.document_spacing),
            graph: PetKnowledgeGraph::new(),
            index: LexicalIndex::new(),
            population,
            tick: 0,
            config,
        }
    }

    /// Ingest a document into the colony's plane.
    ///
    /// Without a position the document is placed near the centroid of
    /// the existing documents. Empty content is accepted; it simply
    /// yields no terms. Nothing reaches the lexical index until a cell
    /// digests the document.
    pub fn ingest_document(
        &mut self,
        title: &str,
        content: &str,
        position: Option<Position>,
    ) -> Result<DocumentId> {
        let id = self.documents.insert(title, content, position)?;
        if let Some(doc) = self.documents.get(id) {
            info!(
                document = %id,
                terms = doc.term_frequencies().len(),
                x = doc.position.x,
                y = doc.position.y,
                "document ingested"
            );
        }
        Ok(id)
    }

    /// Run a single simulation tick.
    pub fn tick(&mut self) -> Vec<ColonyEvent> {
        let now = self.tick;
        let mut events = Vec::new();

        // Phase 1: perception against the start-of-tick state
        let intents = self.population.perceive_all(&self.documents, &self.config, now);

        // Phase 2: commit moves and upkeep
        let dead = self.population.apply_intents(&intents);
        for intent in intents.iter().filter(|i| !dead.contains(&i.agent)) {
            events.push(ColonyEvent::Moved {
                agent: intent.agent,
                to: intent.position,
            });
        }

        // Phase 3: digestion, ascending agent id
        let mut digestions = 0;
        for intent in &intents {
            let Some(target) = intent.target else {
                continue;
            };
            if dead.contains(&intent.agent) {
                continue;
            }
            let Some(event) = digest(
                &mut self.documents,
                &mut self.graph,
                &mut self.index,
                intent.agent,
                target,
                self.config.digestion_rate,
                now,
            ) else {
                continue;
            };

            let gain = self.config.digestion_gain * event.mass;
            if let Some(cell) = self.population.get_mut(intent.agent) {
                cell.energy = (cell.energy + gain).min(self.config.max_energy);
            }
            trace!(
                agent = %event.agent,
                document = %event.document,
                mass = event.mass,
                terms = event.terms.len(),
                "digestion"
            );
            digestions += 1;

            let completed = event.completed.then_some(event.document);
            events.push(ColonyEvent::Digested(event));
            if let Some(document) = completed {
                trace!(document = %document, "document fully digested");
                events.push(ColonyEvent::DocumentDigested { document });
            }
        }

        // Phase 4: reproduction, ascending agent id
        let births = self.population.reproduce(
            &dead,
            self.config.reproduction_threshold,
            self.config.max_agents,
            now + 1,
        );
        for (parent, child) in &births {
            events.push(ColonyEvent::Born {
                parent: *parent,
                child: *child,
            });
        }

        // Phase 5: remove the dead, advance time
        let removed = self.population.remove_dead(&dead);
        for cell in &removed {
            events.push(ColonyEvent::Died {
                agent: cell.id,
                age: cell.age(now + 1),
            });
        }

        self.tick += 1;
        debug!(
            tick = self.tick,
            alive = self.population.len(),
            born = births.len(),
            died = removed.len(),
            digestions,
            "tick complete"
        );
        events.push(ColonyEvent::TickComplete {
            tick: self.tick,
            alive: self.population.len(),
            born: births.len(),
            died: removed.len(),
        });
        events
    }

    /// Run the simulation for `ticks` ticks.
    ///
    /// A negative count is rejected before anything runs.
    pub fn run(&mut self, ticks: i64) -> Result<()> {
        if ticks < 0 {
            return Err(ArgumentError::NegativeTicks(ticks).into());
        }
        for _ in 0..ticks {
            self.tick();
        }
        Ok(())
    }

    /// Rank graph concepts against free text.
    ///
    /// `alpha` defaults to the configured blend factor. Arguments are
    /// validated before any work; no match is an empty list.
    pub fn query(&self, text: &str, max_results: usize, alpha: Option<f64>) -> Result<Vec<QueryResult>> {
        let config = HybridConfig {
            alpha: alpha.unwrap_or(self.config.default_alpha),
            max_results,
        };
        hybrid_query(&self.graph, &self.index, text, &config)
    }

    /// Get colony statistics.
    pub fn stats(&self) -> ColonyStats {
        ColonyStats {
            tick: self.tick,
            graph_nodes: self.graph.node_count(),
            graph_edges: self.graph.edge_count(),
            documents_total: self.documents.len(),
            documents_digested: self.documents.digested_count(),
            agents_alive: self.population.len(),
            agents_died: self.population.total_died(),
            total_spawned: self.population.total_spawned(),
        }
    }

    /// Look up an ingested document.
    pub fn document(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(id)
            .ok_or_else(|| HyphaeError::document_not_found(id))
    }

    /// All documents in ingestion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Ids of cells within `radius` of `position`, ascending. An infinite
    /// radius matches every cell.
    pub fn agents_near(&self, position: Position, radius: f64) -> Result<Vec<AgentId>> {
        if !position.is_finite() {
            return Err(ArgumentError::NonFinitePosition {
                x: position.x,
                y: position.y,
            }
            .into());
        }
        if radius.is_nan() || radius < 0.0 {
            return Err(ArgumentError::InvalidRadius(radius).into());
        }
        Ok(self.population.near(&position, radius))
    }

    pub fn agents(&self) -> &[Cell] {
        self.population.cells()
    }

    pub fn graph(&self) -> &PetKnowledgeGraph {
        &self.graph
    }

    pub fn lexical_index(&self) -> &LexicalIndex {
        &self.index
    }

    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    /// Take a serializable snapshot of the colony's current state.
    pub fn snapshot(&self) -> ColonySnapshot {
        let agents = self
            .population
            .cells()
            .iter()
            .map(|c| AgentSnapshot {
                id: c.id,
                position: c.position,
                energy: c.energy,
                age: c.age(self.tick),
            })
            .collect();

        let documents = self
            .documents
            .iter()
            .map(|d| DocumentSnapshot {
                id: d.id,
                title: d.title.clone(),
                position: d.position,
                digestion_progress: d.digestion_progress(),
            })
            .collect();

        let nodes = self
            .graph
            .labels()
            .into_iter()
            .filter_map(|label| {
                let node = self.graph.node(label)?;
                Some(NodeSnapshot {
                    label: node.label.clone(),
                    weight: node.weight,
                })
            })
            .collect();

        let edges = self
            .graph
            .all_edges()
            .into_iter()
            .map(|(a, b, data)| EdgeSnapshot {
                from_label: a.to_string(),
                to_label: b.to_string(),
                weight: data.weight,
            })
            .collect();

        ColonySnapshot {
            tick: self.tick,
            agents,
            documents,
            nodes,
            edges,
            stats: self.stats(),
        }
    }
}

impl Default for Colony {
    fn default() -> Self {
        Self::with_valid_config(ColonyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn biology_colony() -> Colony {
        let mut colony = Colony::default();
        colony
            .ingest_document("Biology 101", "The cell membrane controls transport.", None)
            .unwrap();
        colony
    }

    #[test]
    fn new_colony_seeds_initial_agents() {
        let colony = Colony::new(ColonyConfig::default().with_initial_agents(3)).unwrap();
        let stats = colony.stats();
        assert_eq!(stats.agents_alive, 3);
        assert_eq!(stats.total_spawned, 3);
        assert_eq!(stats.tick, 0);
        assert_eq!(stats.graph_nodes, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = Colony::new(ColonyConfig::default().with_max_agents(0)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn ingestion_does_not_touch_lexical_index() {
        let colony = biology_colony();
        assert_eq!(colony.stats().documents_total, 1);
        assert_eq!(colony.lexical_index().document_count(), 0);
        assert_eq!(colony.lexical_index().document_frequency("cell"), 0);
    }

    #[test]
    fn tick_advances_simulation() {
        let mut colony = biology_colony();
        let events = colony.tick();
        assert_eq!(colony.stats().tick, 1);
        assert!(matches!(
            events.last(),
            Some(ColonyEvent::TickComplete { tick: 1, .. })
        ));
        assert!(events.iter().any(|e| matches!(e, ColonyEvent::Digested(_))));
        assert!(colony.lexical_index().document_frequency("cell") >= 1);
    }

    #[test]
    fn document_is_digested_and_stays_digested() {
        let mut colony = biology_colony();
        colony.run(10).unwrap();

        let stats = colony.stats();
        assert_eq!(stats.documents_digested, 1, "Document should be digested");
        assert!(stats.graph_nodes >= 4, "Should have concept nodes: got {}", stats.graph_nodes);
        assert!(stats.graph_edges > 0, "Should have edges: got {}", stats.graph_edges);

        let weight = colony.graph().node("cell").unwrap().weight;
        colony.run(10).unwrap();
        assert_eq!(colony.stats().documents_digested, 1);
        assert_eq!(colony.document(DocumentId(0)).unwrap().digestion_progress(), 1.0);
        assert_eq!(colony.graph().node("cell").unwrap().weight, weight);
    }

    #[test]
    fn empty_population_still_ticks() {
        let mut colony = Colony::new(ColonyConfig::default().with_initial_agents(0)).unwrap();
        colony.run(5).unwrap();
        let stats = colony.stats();
        assert_eq!(stats.tick, 5);
        assert_eq!(stats.agents_alive, 0);
    }

    #[test]
    fn negative_run_is_rejected_without_side_effects() {
        let mut colony = biology_colony();
        colony.run(3).unwrap();
        let before = colony.stats();
        let err = colony.run(-1).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(colony.stats(), before);
        colony.run(0).unwrap();
        assert_eq!(colony.stats(), before);
    }

    #[test]
    fn starving_cells_die_and_are_removed() {
        let config = ColonyConfig {
            initial_agents: 2,
            initial_energy: 0.25,
            energy_decay: 0.1,
            ..Default::default()
        };
        let mut colony = Colony::new(config).unwrap();

        colony.run(2).unwrap();
        assert_eq!(colony.stats().agents_alive, 2);
        let events = colony.tick();
        assert_eq!(colony.stats().agents_alive, 0);
        assert_eq!(colony.stats().agents_died, 2);
        let deaths = events
            .iter()
            .filter(|e| matches!(e, ColonyEvent::Died { .. }))
            .count();
        assert_eq!(deaths, 2);
        assert!(
            !events.iter().any(|e| matches!(e, ColonyEvent::Moved { .. })),
            "starved cells do not report a move"
        );
    }

    #[test]
    fn well_fed_cells_divide_up_to_the_cap() {
        let config = ColonyConfig {
            max_agents: 3,
            initial_agents: 2,
            initial_energy: 14.0,
            digestion_gain: 20.0,
            ..Default::default()
        };
        let mut colony = Colony::new(config).unwrap();
        for i in 0..6 {
            colony
                .ingest_document(&format!("doc {i}"), "cell membrane protein channel", None)
                .unwrap();
        }

        colony.run(30).unwrap();
        let stats = colony.stats();
        assert!(stats.total_spawned > 2, "someone should have divided");
        assert!(stats.agents_alive <= 3);
    }

    #[test]
    fn digestion_energy_is_capped_and_applied_in_id_order() {
        let config = ColonyConfig {
            initial_agents: 2,
            initial_energy: 19.0,
            energy_decay: 0.0,
            digestion_gain: 100.0,
            digestion_rate: 1.0,
            reproduction_threshold: 1000.0,
            ..Default::default()
        };
        let mut colony = Colony::new(config).unwrap();
        colony
            .ingest_document("Biology 101", "The cell membrane controls transport.", None)
            .unwrap();

        let events = colony.tick();
        let digesters: Vec<AgentId> = events
            .iter()
            .filter_map(|e| match e {
                ColonyEvent::Digested(d) => Some(d.agent),
                _ => None,
            })
            .collect();
        assert_eq!(digesters, vec![AgentId(0)], "the lowest id eats first and finishes it");

        let energies: Vec<f64> = colony.agents().iter().map(|c| c.energy).collect();
        assert_eq!(energies, vec![20.0, 19.0], "gain is capped at max_energy");
        assert_eq!(colony.stats().documents_digested, 1);
    }

    #[test]
    fn digestion_gain_scales_with_mass() {
        let config = ColonyConfig {
            initial_agents: 1,
            initial_energy: 5.0,
            energy_decay: 0.0,
            digestion_gain: 8.0,
            digestion_rate: 0.25,
            ..Default::default()
        };
        let mut colony = Colony::new(config).unwrap();
        colony.ingest_document("d", "cell membrane", None).unwrap();

        colony.tick();
        assert_eq!(colony.agents()[0].energy, 7.0, "5 + 8 * 0.25");
    }

    #[test]
    fn unknown_document_is_not_found() {
        let colony = biology_colony();
        assert!(colony.document(DocumentId(0)).is_ok());
        assert!(colony.document(DocumentId(5)).unwrap_err().is_not_found());
    }

    #[test]
    fn ingest_rejects_non_finite_position() {
        let mut colony = Colony::default();
        let err = colony
            .ingest_document("bad", "cell", Some(Position::new(f64::INFINITY, 0.0)))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(colony.stats().documents_total, 0);
    }

    #[test]
    fn agents_near_uses_spatial_index() {
        let colony = Colony::default();
        let all = colony.agents_near(Position::origin(), 10.0).unwrap();
        assert_eq!(all.len(), colony.agents().len());
        assert!(colony.agents_near(Position::new(500.0, 500.0), 1.0).unwrap().is_empty());
        assert!(colony.agents_near(Position::new(f64::NAN, 0.0), 1.0).is_err());
        assert_eq!(
            colony.agents_near(Position::origin(), f64::INFINITY).unwrap().len(),
            colony.agents().len()
        );
    }

    #[test]
    fn agents_near_rejects_malformed_radius() {
        let colony = Colony::default();
        for radius in [-1.0, f64::NAN, f64::NEG_INFINITY] {
            match colony.agents_near(Position::origin(), radius) {
                Err(HyphaeError::InvalidArgument(ArgumentError::InvalidRadius(_))) => {}
                other => panic!("radius {radius} should be rejected, got {other:?}"),
            }
        }
        assert!(colony.agents_near(Position::origin(), 0.0).is_ok());
    }

    #[test]
    fn snapshot_serializes() {
        let mut colony = biology_colony();
        colony.run(5).unwrap();
        let snapshot = colony.snapshot();
        assert_eq!(snapshot.stats, colony.stats());
        assert_eq!(snapshot.nodes.len(), snapshot.stats.graph_nodes);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"label\":\"cell\""));
    }
}
