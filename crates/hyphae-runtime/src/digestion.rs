//! Digestion: turning a bite of a document into graph knowledge.
//!
//! One digestion event:
//! 1. takes a bite out of the document (see [`Document::bite`])
//! 2. adds each consumed term's frequency to its node weight
//! 3. adds 1 to the edge between every pair of consumed terms
//! 4. counts the consumed terms for this document in the lexical index
//!
//! [`Document::bite`]: crate::document_store::Document::bite

use crate::document_store::DocumentStore;
use hyphae_core::lexical::LexicalIndex;
use hyphae_core::topology::KnowledgeTopology;
use hyphae_core::types::*;
use serde::Serialize;

/// The record of one digestion event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DigestionEvent {
    pub agent: AgentId,
    pub document: DocumentId,
    /// Document mass consumed, in (0, digestion_rate].
    pub mass: f64,
    pub terms: Vec<String>,
    /// Whether this event finished the document.
    pub completed: bool,
}

/// Apply one digestion event. Returns `None` when the document is
/// unknown or already fully digested.
pub fn digest<G>(
    documents: &mut DocumentStore,
    graph: &mut G,
    index: &mut LexicalIndex,
    agent: AgentId,
    document: DocumentId,
    rate: f64,
    tick: Tick,
) -> Option<DigestionEvent>
where
    G: KnowledgeTopology + ?Sized,
{
    let bite = documents.bite(document, rate)?;

    for (term, frequency) in &bite.terms {
        graph.reinforce_node(term, f64::from(*frequency), tick);
    }
    for (i, (a, _)) in bite.terms.iter().enumerate() {
        for (b, _) in &bite.terms[i + 1..] {
            graph.reinforce_edge(a, b, 1.0, tick);
        }
    }
    index.record(document, bite.terms.iter().map(|(t, _)| t.as_str()));

    Some(DigestionEvent {
        agent,
        document,
        mass: bite.mass,
        terms: bite.terms.into_iter().map(|(t, _)| t).collect(),
        completed: bite.completed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology_impl::PetKnowledgeGraph;

    #[test]
    fn digestion_builds_nodes_edges_and_frequencies() {
        let mut docs = DocumentStore::new(5.0, 1.0);
        let doc = docs
            .insert("t", "cell cell membrane transport", None)
            .unwrap();
        let mut graph = PetKnowledgeGraph::new();
        let mut index = LexicalIndex::new();

        let event = digest(&mut docs, &mut graph, &mut index, AgentId(0), doc, 1.0, 0).unwrap();
        assert!(event.completed);
        assert_eq!(event.terms, vec!["cell", "membrane", "transport"]);

        assert_eq!(graph.node("cell").unwrap().weight, 2.0);
        assert_eq!(graph.node("membrane").unwrap().weight, 1.0);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edge_weight("cell", "transport"), 1.0);
        assert_eq!(index.document_frequency("cell"), 1);
        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn finished_documents_yield_nothing() {
        let mut docs = DocumentStore::new(5.0, 1.0);
        let doc = docs.insert("t", "cell membrane", None).unwrap();
        let mut graph = PetKnowledgeGraph::new();
        let mut index = LexicalIndex::new();

        digest(&mut docs, &mut graph, &mut index, AgentId(0), doc, 1.0, 0).unwrap();
        let before = graph.node("cell").unwrap().weight;
        assert!(digest(&mut docs, &mut graph, &mut index, AgentId(1), doc, 1.0, 1).is_none());
        assert_eq!(graph.node("cell").unwrap().weight, before);
        assert!(digest(&mut docs, &mut graph, &mut index, AgentId(1), DocumentId(99), 1.0, 1).is_none());
    }

    #[test]
    fn same_term_in_two_documents_counts_twice() {
        let mut docs = DocumentStore::new(5.0, 1.0);
        let a = docs.insert("a", "cell membrane", None).unwrap();
        let b = docs.insert("b", "cell wall", None).unwrap();
        let mut graph = PetKnowledgeGraph::new();
        let mut index = LexicalIndex::new();

        digest(&mut docs, &mut graph, &mut index, AgentId(0), a, 1.0, 0).unwrap();
        digest(&mut docs, &mut graph, &mut index, AgentId(0), b, 1.0, 1).unwrap();
        assert_eq!(index.document_frequency("cell"), 2);
        assert_eq!(index.document_frequency("wall"), 1);
        assert_eq!(graph.node("cell").unwrap().weight, 2.0);
    }
}
