//! End-to-end scenarios through the public `hyphae` surface.

use hyphae::prelude::*;

fn biology_101() -> Colony {
    let mut colony = Colony::new(ColonyConfig::default()).unwrap();
    colony
        .ingest_document("Biology 101", "The cell membrane controls transport.", None)
        .unwrap();
    colony
}

fn textbook() -> Colony {
    let mut colony = Colony::new(ColonyConfig::default()).unwrap();
    let chapters = [
        ("Membranes", "The cell membrane controls transport. Membrane proteins form channels."),
        ("Energy", "Mitochondria produce energy. The cell uses energy for active transport."),
        ("Genetics", "The nucleus stores genetic information. Genes encode proteins."),
        ("Synthesis", "Ribosomes synthesize proteins. Proteins fold inside the cell."),
    ];
    for (title, content) in chapters {
        colony.ingest_document(title, content, None).unwrap();
    }
    colony.run(100).unwrap();
    colony
}

#[test]
fn biology_101_is_digested_and_queryable() {
    let mut colony = biology_101();
    colony.run(50).unwrap();

    let stats = colony.stats();
    assert_eq!(stats.documents_digested, 1, "Document should be fully digested");
    assert_eq!(colony.document(DocumentId(0)).unwrap().digestion_progress(), 1.0);

    let results = colony.query("cell membrane", 5, None).unwrap();
    assert!(!results.is_empty(), "Query should find concepts");
    assert!(results.len() <= 5);
    assert!(
        results
            .iter()
            .any(|r| (r.label.contains("cell") || r.label.contains("membrane")) && r.score > 0.0),
        "Expected a cell/membrane concept with positive score, got {:?}",
        results
    );
}

#[test]
fn negative_run_is_rejected_and_changes_nothing() {
    let mut colony = biology_101();
    colony.run(5).unwrap();
    let before = colony.stats();

    match colony.run(-1) {
        Err(HyphaeError::InvalidArgument(ArgumentError::NegativeTicks(-1))) => {}
        other => panic!("expected NegativeTicks, got {:?}", other),
    }
    assert_eq!(colony.stats(), before);
}

#[test]
fn unknown_terms_return_no_results() {
    let mut colony = biology_101();
    colony.run(50).unwrap();
    assert!(colony.stats().graph_nodes > 0);

    let results = colony.query("nonexistent term", 5, None).unwrap();
    assert!(results.is_empty(), "got {:?}", results);
}

#[test]
fn empty_colony_answers_with_empty_results() {
    let colony = Colony::default();
    assert!(colony.query("cell", 5, None).unwrap().is_empty());
    assert!(colony.query("", 5, None).unwrap().is_empty());
}

#[test]
fn query_arguments_are_validated() {
    let colony = textbook();
    assert!(colony.query("cell", 0, None).unwrap_err().is_invalid_argument());
    assert!(colony.query("cell", 5, Some(1.5)).unwrap_err().is_invalid_argument());
    assert!(colony.query("cell", 5, Some(-0.1)).unwrap_err().is_invalid_argument());
}

#[test]
fn pure_lexical_ranking_follows_tfidf() {
    let colony = textbook();
    let results = colony.query("cell proteins energy transport", 20, Some(0.0)).unwrap();
    assert!(!results.is_empty());

    for pair in results.windows(2) {
        assert!(
            pair[0].tfidf_score >= pair[1].tfidf_score,
            "{} ({}) ranked above {} ({})",
            pair[0].label,
            pair[0].tfidf_score,
            pair[1].label,
            pair[1].tfidf_score
        );
        assert_eq!(pair[0].score, pair[0].tfidf_score);
    }
}

#[test]
fn pure_graph_ranking_follows_connectivity() {
    let colony = textbook();
    let results = colony.query("cell proteins energy transport", 20, Some(1.0)).unwrap();
    assert!(!results.is_empty());

    for pair in results.windows(2) {
        assert!(pair[0].graph_score >= pair[1].graph_score);
    }
    for r in &results {
        assert!((0.0..=1.0).contains(&r.graph_score));
        assert_eq!(r.score, r.graph_score);
    }
}

#[test]
fn results_never_exceed_max_results() {
    let colony = textbook();
    for max in 1..=6 {
        let results = colony.query("cell proteins energy transport", max, None).unwrap();
        assert!(results.len() <= max);
    }
}

#[test]
fn default_alpha_comes_from_config() {
    let config = ColonyConfig {
        default_alpha: 0.0,
        ..Default::default()
    };
    let mut colony = Colony::new(config).unwrap();
    colony
        .ingest_document("Biology 101", "The cell membrane controls transport.", None)
        .unwrap();
    colony.run(20).unwrap();

    let implicit = colony.query("cell membrane", 5, None).unwrap();
    let explicit = colony.query("cell membrane", 5, Some(0.0)).unwrap();
    assert_eq!(implicit, explicit);
}

#[test]
fn query_is_read_only() {
    let colony = textbook();
    let before = colony.snapshot();
    colony.query("cell proteins", 5, None).unwrap();
    assert_eq!(colony.snapshot(), before);
}

#[test]
fn snapshot_round_trips_through_json_value() {
    let colony = textbook();
    let json = colony.snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["tick"], 100);
    assert_eq!(value["documents"].as_array().unwrap().len(), 4);
}
