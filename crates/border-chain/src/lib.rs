//! Border Chain
//!
//! Land-border adjacency as a directed petgraph graph, plus the rules of the
//! Country Trail game: walk from a start country to an end country one
//! neighbour at a time, never revisiting a country.
//!
//! # Trail State Machine
//!
//! ```text
//! InProgress (chain = [start]) --accepted guess == end--> Won
//! ```
//!
//! There is no lost state. Rejected guesses leave the chain untouched.

use thiserror::Error;

pub mod graph;
pub mod trail;

pub use graph::{AdjacencyPolicy, BorderGraph};
pub use trail::{
    pick_start_end_pair, validate_next_hop, ChainState, Hop, Trail, TrailState, MAX_DRAWS,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error("No playable country matches {0:?}")]
    NotFound(String),
    #[error("{0} is already in the trail")]
    AlreadyVisited(String),
    #[error("{to} does not border {from}")]
    NotAdjacent { from: String, to: String },
    #[error("Not enough connected countries to build a trail")]
    InsufficientData,
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),
    #[error("Start and end must be different countries")]
    SameEndpoints,
    #[error("Trail already complete")]
    Finished,
}

pub type Result<T> = std::result::Result<T, ChainError>;
