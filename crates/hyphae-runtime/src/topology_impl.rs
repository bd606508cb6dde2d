//! Concrete implementation of the KnowledgeTopology trait using petgraph.
//!
//! Nodes and edges live in a petgraph `Graph`; a HashMap from label to
//! `NodeIndex` gives O(1) lookup by label. Nodes and edges are never
//! removed, so petgraph indices stay stable and iteration follows
//! creation order, which keeps snapshots deterministic.

use hyphae_core::topology::KnowledgeTopology;
use hyphae_core::types::*;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Undirected;
use std::collections::HashMap;

/// Petgraph-backed knowledge graph.
#[derive(Debug, Clone)]
pub struct PetKnowledgeGraph {
    graph: Graph<ConceptNode, ConceptEdge, Undirected>,
    label_index: HashMap<String, NodeIndex>,
}

impl PetKnowledgeGraph {
    pub fn new() -> Self {
        Self {
            graph: Graph::new_undirected(),
            label_index: HashMap::new(),
        }
    }

    /// Sum of all node weights.
    pub fn total_weight(&self) -> f64 {
        self.graph.node_weights().map(|n| n.weight).sum()
    }
}

impl Default for PetKnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeTopology for PetKnowledgeGraph {
    fn reinforce_node(&mut self, label: &str, weight: f64, tick: Tick) {
        if let Some(&idx) = self.label_index.get(label) {
            self.graph[idx].weight += weight;
            return;
        }
        let idx = self.graph.add_node(ConceptNode {
            label: label.to_string(),
            weight,
            created_tick: tick,
        });
        self.label_index.insert(label.to_string(), idx);
    }

    fn reinforce_edge(&mut self, a: &str, b: &str, weight: f64, tick: Tick) -> bool {
        if a == b {
            return false;
        }
        let (Some(&a_idx), Some(&b_idx)) = (self.label_index.get(a), self.label_index.get(b)) else {
            return false;
        };

        if let Some(edge_idx) = self.graph.find_edge(a_idx, b_idx) {
            let edge = &mut self.graph[edge_idx];
            edge.weight += weight;
            edge.last_activated_tick = tick;
        } else {
            self.graph.add_edge(
                a_idx,
                b_idx,
                ConceptEdge {
                    weight,
                    created_tick: tick,
                    last_activated_tick: tick,
                },
            );
        }
        true
    }

    fn node(&self, label: &str) -> Option<&ConceptNode> {
        self.label_index.get(label).map(|idx| &self.graph[*idx])
    }

    fn edge(&self, a: &str, b: &str) -> Option<&ConceptEdge> {
        let a_idx = self.label_index.get(a)?;
        let b_idx = self.label_index.get(b)?;
        let edge_idx = self.graph.find_edge(*a_idx, *b_idx)?;
        Some(&self.graph[edge_idx])
    }

    fn neighbors(&self, label: &str) -> Vec<(&str, &ConceptEdge)> {
        let Some(&idx) = self.label_index.get(label) else {
            return Vec::new();
        };

        self.graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (self.graph[other].label.as_str(), edge.weight())
            })
            .collect()
    }

    fn labels(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].label.as_str())
            .collect()
    }

    fn all_edges(&self) -> Vec<(&str, &str, &ConceptEdge)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].label.as_str(),
                    self.graph[edge.target()].label.as_str(),
                    edge.weight(),
                )
            })
            .collect()
    }

    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
