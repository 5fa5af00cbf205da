// State identifiers and transition targets.

use std::fmt;

/// Identifier of a real state (a row of the transition table).
///
/// State `0` is the initial state; further ids are handed out by the network
/// in increasing order starting at 1 and are never reused. The final
/// sentinel is deliberately not a `StateId`, so it can never be used to
/// address a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    /// The initial state every path starts from.
    pub const INITIAL: StateId = StateId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric id.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Content of one `(state, label)` cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// No transition recorded.
    #[default]
    Invalid,
    /// The path ends here. Not a row: it has no outgoing transitions.
    Final,
    /// Transition into another real state.
    State(StateId),
}

impl Target {
    #[inline]
    pub fn is_invalid(self) -> bool {
        matches!(self, Target::Invalid)
    }

    #[inline]
    pub fn is_final(self) -> bool {
        matches!(self, Target::Final)
    }

    /// The target state, if this cell leads to a real state.
    #[inline]
    pub fn state(self) -> Option<StateId> {
        match self {
            Target::State(s) => Some(s),
            _ => None,
        }
    }
}

impl From<StateId> for Target {
    fn from(state: StateId) -> Self {
        Target::State(state)
    }
}

/// Renders targets the way the text dump does: `S<id>` or `SF`.
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Invalid => f.write_str("INVALID"),
            Target::Final => f.write_str("SF"),
            Target::State(s) => s.fmt(f),
        }
    }
}
