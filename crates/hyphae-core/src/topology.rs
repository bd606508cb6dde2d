//! Topology: the knowledge graph contract.
//!
//! Nodes are keyed by label and edges are undirected, so every lookup
//! takes labels rather than backend indices. The query engine reads the
//! graph only through this trait; the runtime supplies the concrete
//! backend and is the only writer.

use crate::types::*;

/// A label-keyed, undirected, weighted concept graph.
pub trait KnowledgeTopology {
    /// Add `weight` to the node for `label`, creating it at `tick` if
    /// it does not exist yet.
    fn reinforce_node(&mut self, label: &str, weight: f64, tick: Tick);

    /// Add `weight` to the edge between `a` and `b`, creating it on first
    /// co-occurrence. Self-edges and edges to unknown labels are ignored;
    /// returns whether an edge was touched.
    fn reinforce_edge(&mut self, a: &str, b: &str, weight: f64, tick: Tick) -> bool;

    /// Node data by label.
    fn node(&self, label: &str) -> Option<&ConceptNode>;

    /// Edge data between two labels, in either order.
    fn edge(&self, a: &str, b: &str) -> Option<&ConceptEdge>;

    /// Neighbouring labels with the connecting edge.
    fn neighbors(&self, label: &str) -> Vec<(&str, &ConceptEdge)>;

    /// All labels, in creation order.
    fn labels(&self) -> Vec<&str>;

    /// All edges as `(a, b, data)`, in creation order.
    fn all_edges(&self) -> Vec<(&str, &str, &ConceptEdge)>;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Weight of the edge between `a` and `b`, or 0 when absent.
    fn edge_weight(&self, a: &str, b: &str) -> f64 {
        self.edge(a, b).map_or(0.0, |e| e.weight)
    }

    fn contains(&self, label: &str) -> bool {
        self.node(label).is_some()
    }

    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
