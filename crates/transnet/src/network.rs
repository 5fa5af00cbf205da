// Path automaton: flat transition table with prefix-sharing path insertion.

use std::iter;

use hashbrown::HashSet;
use tracing::{debug, trace, warn};

use crate::config::{ConflictPolicy, NetworkConfig};
use crate::labels::LabelTable;
use crate::target::{StateId, Target};
use crate::{NetworkError, Resource};

/// Deterministic, acyclic transition network over interned labels.
///
/// The table is a single buffer of `(max_states + 1) * max_transitions`
/// cells allocated up front, addressed as `state * max_transitions + label`.
/// Row 0 is the initial state. It never grows: running out of states or
/// label columns is reported as [`NetworkError::CapacityExceeded`].
///
/// Every mutating operation validates its whole effect before touching the
/// table, so a failed call leaves the network unchanged.
#[derive(Clone)]
pub struct TransitionNetwork {
    /// Flattened `[state * max_transitions + label]` transition table.
    cells: Vec<Target>,
    labels: LabelTable,
    /// Highest state id assigned so far (0 while only the initial state exists).
    state_count: u32,
    config: NetworkConfig,
}

impl std::fmt::Debug for TransitionNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionNetwork")
            .field("state_count", &self.state_count)
            .field("label_count", &self.labels.len())
            .field("max_states", &self.config.max_states)
            .field("max_transitions", &self.config.max_transitions)
            .field("conflict_policy", &self.config.conflict_policy)
            .finish()
    }
}

impl TransitionNetwork {
    /// Create an empty network with room for `max_states` states besides the
    /// initial one and `max_transitions` distinct labels.
    pub fn new(max_states: usize, max_transitions: usize) -> Result<Self, NetworkError> {
        Self::with_config(NetworkConfig::new(max_states, max_transitions))
    }

    pub fn with_config(config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate()?;
        let cell_count = config
            .cell_count()
            .ok_or(NetworkError::InvalidConfiguration {
                max_states: config.max_states,
                max_transitions: config.max_transitions,
            })?;
        Ok(Self {
            cells: vec![Target::Invalid; cell_count],
            labels: LabelTable::with_capacity(config.max_transitions),
            state_count: 0,
            config,
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Highest state id assigned so far; valid states are `0..=state_count`.
    #[inline]
    pub fn state_count(&self) -> u32 {
        self.state_count
    }

    #[inline]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn max_states(&self) -> usize {
        self.config.max_states
    }

    #[inline]
    pub fn max_transitions(&self) -> usize {
        self.config.max_transitions
    }

    /// All currently valid states, initial state first.
    pub fn states(&self) -> impl DoubleEndedIterator<Item = StateId> {
        (0..=self.state_count).map(StateId::new)
    }

    /// `true` for [`Target::Final`] and for real states up to the high-water mark.
    pub fn state_exists(&self, target: Target) -> bool {
        match target {
            Target::Invalid => false,
            Target::Final => true,
            Target::State(s) => s.get() <= self.state_count,
        }
    }

    pub(crate) fn check_state(&self, state: StateId) -> Result<(), NetworkError> {
        if state.get() <= self.state_count {
            Ok(())
        } else {
            Err(NetworkError::InvalidStateReference(state.get()))
        }
    }

    #[inline]
    fn cell_index(&self, state: StateId, column: usize) -> usize {
        state.index() * self.config.max_transitions + column
    }

    /// Cells of `state` for every known label, in column order.
    ///
    /// The caller guarantees `state` exists.
    #[inline]
    pub(crate) fn row(&self, state: StateId) -> &[Target] {
        let start = self.cell_index(state, 0);
        &self.cells[start..start + self.labels.len()]
    }

    /// Target of `state` at label column `column`; `Invalid` for unknown
    /// states or columns.
    pub fn target(&self, state: StateId, column: usize) -> Target {
        if state.get() > self.state_count || column >= self.labels.len() {
            return Target::Invalid;
        }
        self.cells[self.cell_index(state, column)]
    }

    /// Target of `state` under `label`; `Invalid` if the label was never seen.
    pub fn transition(&self, state: StateId, label: &str) -> Target {
        match self.labels.get(label) {
            Some(column) => self.target(state, column),
            None => Target::Invalid,
        }
    }

    /// Outgoing `(label, target)` pairs of `state`, skipping empty cells.
    pub fn transitions(
        &self,
        state: StateId,
    ) -> Result<impl Iterator<Item = (&str, Target)> + '_, NetworkError> {
        self.check_state(state)?;
        Ok(self
            .labels
            .iter()
            .zip(self.row(state).iter().copied())
            .filter(|(_, target)| !target.is_invalid()))
    }

    /// Whether `path` runs from the initial state through real states and
    /// ends in a terminal edge.
    pub fn contains_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        let Some((last, init)) = path.split_last() else {
            return false;
        };
        let mut state = StateId::INITIAL;
        for label in init {
            match self.transition(state, label.as_ref()) {
                Target::State(next) => state = next,
                _ => return false,
            }
        }
        self.transition(state, last.as_ref()).is_final()
    }

    /// Allocate a fresh state and record `from --label--> new`.
    ///
    /// Always allocates, even if `from` already has a transition for `label`
    /// (that transition is replaced). Use [`add_path`](Self::add_path) to
    /// share prefixes.
    pub fn add_transition_to_new_state(
        &mut self,
        from: StateId,
        label: &str,
    ) -> Result<StateId, NetworkError> {
        self.check_state(from)?;
        check_label(label)?;
        self.ensure_capacity(self.new_label_count(iter::once(label)), 1)?;
        self.link_new_state(from, label)
    }

    /// Record `from --label--> FINAL`, replacing whatever the cell held.
    pub fn add_transition_to_final_state(
        &mut self,
        from: StateId,
        label: &str,
    ) -> Result<(), NetworkError> {
        self.check_state(from)?;
        check_label(label)?;
        self.ensure_capacity(self.new_label_count(iter::once(label)), 0)?;
        self.link_final(from, label)
    }

    /// Insert one path, sharing the longest prefix already in the network.
    ///
    /// Starting at the initial state, labels are consumed one per step while
    /// they lead to real states. The last label is never walked: it always
    /// becomes the terminal edge. Remaining labels but the last get fresh
    /// states, the last one a transition to FINAL.
    ///
    /// Conflicts between a terminal edge and a continuation are resolved by
    /// the configured [`ConflictPolicy`].
    pub fn add_path<S: AsRef<str>>(&mut self, path: &[S]) -> Result<(), NetworkError> {
        let Some((last, init)) = path.split_last() else {
            return Err(NetworkError::EmptyPath);
        };
        if path.iter().any(|label| label.as_ref().is_empty()) {
            return Err(NetworkError::EmptyLabel);
        }
        let last = last.as_ref();

        let mut state = StateId::INITIAL;
        let mut shared = 0;
        for label in init {
            match self.transition(state, label.as_ref()) {
                Target::State(next) => {
                    state = next;
                    shared += 1;
                }
                _ => break,
            }
        }
        let branch = &init[shared..];

        if self.config.conflict_policy == ConflictPolicy::Reject {
            self.check_conflict(state, branch.first().map(|label| label.as_ref()), last)?;
        }
        let new_labels = self.new_label_count(
            branch
                .iter()
                .map(|label| label.as_ref())
                .chain(iter::once(last)),
        );
        self.ensure_capacity(new_labels, branch.len())?;

        for label in branch {
            state = self.link_new_state(state, label.as_ref())?;
        }
        self.link_final(state, last)?;

        debug!(
            len = path.len(),
            shared,
            created = branch.len(),
            states = self.state_count,
            "inserted path"
        );
        Ok(())
    }

    /// Number of FINAL terminations reachable from `state`.
    pub fn count_sub_states(&self, state: StateId) -> Result<usize, NetworkError> {
        self.check_state(state)?;
        Ok(self.leaves_beneath(state))
    }

    /// Leaf count of an existing state, walked with an explicit stack.
    ///
    /// Every state has at most one live incoming edge and edges only point to
    /// younger states, so each state is visited at most once.
    pub(crate) fn leaves_beneath(&self, root: StateId) -> usize {
        let mut leaves = 0;
        let mut stack = vec![root];
        while let Some(state) = stack.pop() {
            for &target in self.row(state) {
                match target {
                    Target::Invalid => {}
                    Target::Final => leaves += 1,
                    Target::State(child) => stack.push(child),
                }
            }
        }
        leaves
    }

    /// Under [`ConflictPolicy::Reject`], refuse to flip a cell between a
    /// continuation and a terminal edge.
    fn check_conflict(
        &self,
        state: StateId,
        branch_start: Option<&str>,
        last: &str,
    ) -> Result<(), NetworkError> {
        // Only the first written cell can already be occupied: everything
        // after it hangs off freshly allocated states.
        let (label, writes_final) = match branch_start {
            Some(label) => (label, false),
            None => (last, true),
        };
        let existing = self.transition(state, label);
        let conflict = match existing {
            Target::Invalid => false,
            Target::Final => !writes_final,
            Target::State(_) => writes_final,
        };
        if conflict {
            return Err(NetworkError::ConflictingTransition {
                state: state.get(),
                label: label.to_string(),
                existing,
            });
        }
        Ok(())
    }

    /// Number of distinct labels in `labels` that are not interned yet.
    fn new_label_count<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> usize {
        let mut unseen = HashSet::new();
        for label in labels {
            if self.labels.get(label).is_none() {
                unseen.insert(label);
            }
        }
        unseen.len()
    }

    fn ensure_capacity(&self, new_labels: usize, new_states: usize) -> Result<(), NetworkError> {
        if self.labels.len() + new_labels > self.config.max_transitions {
            return Err(NetworkError::CapacityExceeded {
                resource: Resource::Labels,
                limit: self.config.max_transitions,
            });
        }
        if self.state_count as usize + new_states > self.config.max_states {
            return Err(NetworkError::CapacityExceeded {
                resource: Resource::States,
                limit: self.config.max_states,
            });
        }
        Ok(())
    }

    fn link_new_state(&mut self, from: StateId, label: &str) -> Result<StateId, NetworkError> {
        let column = self.labels.intern(label)?;
        let cell = self.cell_index(from, column);
        if self.cells[cell].is_final() {
            warn!(from = from.get(), label, "continuation replaces terminal edge");
        }
        self.state_count += 1;
        let state = StateId::new(self.state_count);
        self.cells[cell] = Target::State(state);
        trace!(from = from.get(), label, to = state.get(), "allocated state");
        Ok(state)
    }

    fn link_final(&mut self, from: StateId, label: &str) -> Result<(), NetworkError> {
        let column = self.labels.intern(label)?;
        let cell = self.cell_index(from, column);
        if let Target::State(detached) = self.cells[cell] {
            warn!(
                from = from.get(),
                label,
                detached = detached.get(),
                "terminal edge replaces continuation"
            );
        }
        self.cells[cell] = Target::Final;
        Ok(())
    }
}

fn check_label(label: &str) -> Result<(), NetworkError> {
    if label.is_empty() {
        Err(NetworkError::EmptyLabel)
    } else {
        Ok(())
    }
}
