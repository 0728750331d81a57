//! State identities for finite automata.
//!
//! States are owned by exactly one automaton and are addressed by a dense
//! [`StateId`] index, so lookups into per-state tables are plain slice
//! indexing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense index identifying a state within one automaton.
///
/// Ids are assigned in declaration order starting at zero.
///
/// # Example
///
/// ```rust
/// use fsasim::core::StateId;
///
/// let id = StateId::new(2);
/// assert_eq!(id.index(), 2);
/// assert_eq!(id.to_string(), "q2");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StateId(u32);

impl StateId {
    /// Create a state id from its raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The id as a table index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The raw numeric id.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for StateId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A named state of an automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    id: StateId,
    name: String,
}

impl State {
    /// Create a state with the given id and display name.
    pub fn new(id: StateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The state's id.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// The state's display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
