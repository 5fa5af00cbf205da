//! Path automaton with a structural distance metric.
//!
//! This crate compresses many label sequences ("paths", e.g. morpheme chains
//! extracted from a suffix tree) into one deterministic, acyclic transition
//! network and measures how similar any two of its states are.
//!
//! # Architecture
//!
//! - [`target`] -- State identifiers and the `Invalid | Final | State` target variant
//! - [`labels`] -- Label table (string-to-column interning in first-seen order)
//! - [`config`] -- Capacity bounds and the terminal edge conflict policy
//! - [`network`] -- Flat transition table, path insertion and leaf counting
//! - [`distance`] -- Structural distance between states
//! - [`dump`] -- Stable text rendering of the network
//!
//! ```
//! use transnet::{StateId, TransitionNetwork};
//!
//! let mut network = TransitionNetwork::new(5, 5).unwrap();
//! network.add_path(&["x", "y"]).unwrap();
//! network.add_path(&["x", "z"]).unwrap();
//!
//! assert_eq!(network.count_sub_states(StateId::INITIAL).unwrap(), 2);
//! assert_eq!(network.state_distance(StateId::new(1), StateId::new(1)).unwrap(), 0.0);
//! assert_eq!(network.print(), "x,y,z\nS0: x => S1\nS1: y => SF, z => SF\n");
//! ```

pub mod config;
pub mod distance;
pub mod dump;
pub mod labels;
pub mod network;
pub mod target;

use std::fmt;

pub use config::{ConflictPolicy, NetworkConfig};
pub use distance::Comparison;
pub use labels::LabelTable;
pub use network::TransitionNetwork;
pub use target::{StateId, Target};

/// The bounded resource an insertion ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Allocatable (non-initial) states.
    States,
    /// Distinct transition labels.
    Labels,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::States => f.write_str("state"),
            Resource::Labels => f.write_str("label"),
        }
    }
}

/// Error type for network construction, insertion and queries.
///
/// None of these are retried internally. A failed insertion leaves the
/// network exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error(
        "invalid dimensions: max_states={max_states}, max_transitions={max_transitions} (both must be > 0)"
    )]
    InvalidConfiguration {
        max_states: usize,
        max_transitions: usize,
    },
    #[error("state {0} does not exist")]
    InvalidStateReference(u32),
    #[error("{resource} limit reached (capacity {limit})")]
    CapacityExceeded { resource: Resource, limit: usize },
    #[error("transition {label:?} from S{state} already leads to {existing}")]
    ConflictingTransition {
        state: u32,
        label: String,
        existing: Target,
    },
    #[error("path must contain at least one label")]
    EmptyPath,
    #[error("labels must be non-empty")]
    EmptyLabel,
}
