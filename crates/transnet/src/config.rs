// Network configuration: capacity bounds and terminal edge conflict policy.

use crate::NetworkError;
use crate::target::Target;

/// Default number of allocatable states (the initial state comes on top).
pub const DEFAULT_MAX_STATES: usize = 1024;

/// Default number of distinct labels.
pub const DEFAULT_MAX_TRANSITIONS: usize = 256;

/// Largest transition table accepted, in cells (1 GiB of targets).
pub const MAX_CELLS: usize = (1 << 30) / std::mem::size_of::<Target>();

/// What `add_path` does when a cell would change between a terminal edge
/// and a continuation.
///
/// This happens when a path is inserted after a longer path it is a prefix
/// of (the terminal edge would replace the continuation), or after a shorter
/// path that is its own prefix (a new state would replace the terminal
/// edge). One cell holds one target, so both cannot be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConflictPolicy {
    /// Replace the existing target. States behind a replaced continuation
    /// stay allocated but become unreachable.
    #[default]
    Overwrite,
    /// Fail with [`NetworkError::ConflictingTransition`] and leave the
    /// network unchanged.
    Reject,
}

/// Fixed dimensions and insertion policy of a [`TransitionNetwork`].
///
/// [`TransitionNetwork`]: crate::TransitionNetwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Highest state id that may be allocated. State ids `1..=max_states`
    /// are available besides the initial state.
    pub max_states: usize,
    /// Maximum number of distinct labels (columns).
    pub max_transitions: usize,
    pub conflict_policy: ConflictPolicy,
}

impl NetworkConfig {
    pub fn new(max_states: usize, max_transitions: usize) -> Self {
        Self {
            max_states,
            max_transitions,
            conflict_policy: ConflictPolicy::default(),
        }
    }

    pub fn with_conflict_policy(mut self, conflict_policy: ConflictPolicy) -> Self {
        self.conflict_policy = conflict_policy;
        self
    }

    /// Check both bounds are positive and the table fits in [`MAX_CELLS`].
    pub fn validate(&self) -> Result<(), NetworkError> {
        let invalid = NetworkError::InvalidConfiguration {
            max_states: self.max_states,
            max_transitions: self.max_transitions,
        };
        if self.max_states < 1 || self.max_transitions < 1 {
            return Err(invalid);
        }
        if u32::try_from(self.max_states).is_err() {
            return Err(invalid);
        }
        match self.cell_count() {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(invalid),
        }
    }

    /// Number of table cells: one row per allocatable state plus the initial row.
    pub fn cell_count(&self) -> Option<usize> {
        self.max_states
            .checked_add(1)?
            .checked_mul(self.max_transitions)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STATES, DEFAULT_MAX_TRANSITIONS)
    }
}
