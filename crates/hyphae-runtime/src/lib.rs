//! # Hyphae Runtime
//!
//! The colony and everything it owns.
//!
//! The runtime is the "organism": it places documents in a 2-D plane,
//! moves a population of cells over them, turns each digestion event into
//! knowledge-graph growth and lexical statistics, and answers queries over
//! what the colony has learned so far.

pub mod agent;
pub mod colony;
pub mod config;
pub mod digestion;
pub mod document_store;
pub mod population;
pub mod prelude;
pub mod spatial;
pub mod topology_impl;
