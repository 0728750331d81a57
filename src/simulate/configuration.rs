//! Immutable search configurations.

use crate::core::StateId;
use std::fmt;
use std::sync::Arc;

/// One partial execution: a state plus the unconsumed input.
///
/// Configurations are immutable and shared through `Arc`. Each one keeps a
/// link to the configuration it was derived from so a derivation path can
/// be displayed; the link is never used to decide acceptance.
///
/// # Example
///
/// ```rust
/// use fsasim::core::StateId;
/// use fsasim::simulate::Configuration;
///
/// let root = Configuration::initial(StateId::new(0), "abc".into());
/// let child = root.derive(StateId::new(1), 1);
///
/// assert_eq!(child.remaining_input(), "bc");
/// assert_eq!(child.total_input(), "abc");
/// assert_eq!(child.path().len(), 2);
/// ```
#[derive(Debug)]
pub struct Configuration {
    state: StateId,
    parent: Option<Arc<Configuration>>,
    input: Arc<str>,
    consumed: usize,
}

impl Configuration {
    /// A root configuration with nothing consumed.
    pub fn initial(state: StateId, input: Arc<str>) -> Arc<Self> {
        Arc::new(Self {
            state,
            parent: None,
            input,
            consumed: 0,
        })
    }

    /// A child of `self` at `state` after consuming `len` more bytes.
    ///
    /// `len` must end on a character boundary of the remaining input.
    pub fn derive(self: &Arc<Self>, state: StateId, len: usize) -> Arc<Self> {
        debug_assert!(
            self.input.is_char_boundary(self.consumed + len),
            "consuming {len} bytes from offset {} leaves the input {:?}",
            self.consumed,
            self.input
        );
        Arc::new(Self {
            state,
            parent: Some(Arc::clone(self)),
            input: Arc::clone(&self.input),
            consumed: self.consumed + len,
        })
    }

    /// The state this configuration is in.
    pub fn current_state(&self) -> StateId {
        self.state
    }

    /// The configuration this one was derived from.
    pub fn parent(&self) -> Option<&Arc<Configuration>> {
        self.parent.as_ref()
    }

    /// The whole input of the run.
    pub fn total_input(&self) -> &str {
        &self.input
    }

    /// The suffix not yet consumed.
    pub fn remaining_input(&self) -> &str {
        &self.input[self.consumed..]
    }

    /// The prefix already consumed.
    pub fn consumed_input(&self) -> &str {
        &self.input[..self.consumed]
    }

    /// Bytes of input consumed so far.
    pub fn consumed_len(&self) -> usize {
        self.consumed
    }

    /// True when all input has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.consumed == self.input.len()
    }

    /// Identity for deduplication: the state and how much input is left.
    pub fn key(&self) -> (StateId, usize) {
        (self.state, self.consumed)
    }

    /// This configuration followed by its ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Derivation path from the root configuration to this one.
    pub fn path(&self) -> Vec<&Configuration> {
        let mut path: Vec<&Configuration> = self.ancestors().collect();
        path.reverse();
        path
    }

    /// States along the derivation path, root first.
    pub fn state_path(&self) -> Vec<StateId> {
        self.path().iter().map(|c| c.state).collect()
    }

    /// Number of steps taken from the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }
}

impl Drop for Configuration {
    // Unlink the parent chain iteratively; long derivations would otherwise
    // recurse once per ancestor.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            match Arc::try_unwrap(parent) {
                Ok(mut inner) => next = inner.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.state, self.remaining_input())
    }
}

/// Iterator over a configuration and its ancestors.
pub struct Ancestors<'a> {
    next: Option<&'a Configuration>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}
