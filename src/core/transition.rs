//! Labeled transitions between states.

use super::label::Label;
use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge `from -> to` carrying a label.
///
/// The label text is parsed once on construction; the raw text stays
/// available through [`Transition::label`].
///
/// # Example
///
/// ```rust
/// use fsasim::core::{StateId, Transition};
///
/// let t = Transition::new(StateId::new(0), StateId::new(1), "[a..z]");
/// assert_eq!(t.label(), "[a..z]");
/// assert!(t.parsed_label().is_list());
/// assert!(!t.is_lambda());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTransition", into = "RawTransition")]
pub struct Transition {
    from: StateId,
    to: StateId,
    text: String,
    label: Label,
}

#[derive(Serialize, Deserialize)]
struct RawTransition {
    from: StateId,
    to: StateId,
    label: String,
}

impl From<RawTransition> for Transition {
    fn from(raw: RawTransition) -> Self {
        Transition::new(raw.from, raw.to, raw.label)
    }
}

impl From<Transition> for RawTransition {
    fn from(transition: Transition) -> Self {
        RawTransition {
            from: transition.from,
            to: transition.to,
            label: transition.text,
        }
    }
}

impl Transition {
    /// Create a transition, parsing its label.
    pub fn new(from: StateId, to: StateId, label: impl Into<String>) -> Self {
        let text = label.into();
        let label = Label::parse(&text);
        Self {
            from,
            to,
            text,
            label,
        }
    }

    /// Create a lambda transition.
    pub fn lambda(from: StateId, to: StateId) -> Self {
        Self::new(from, to, "")
    }

    /// Source state.
    pub fn from_state(&self) -> StateId {
        self.from
    }

    /// Target state.
    pub fn to_state(&self) -> StateId {
        self.to
    }

    /// Raw label text as supplied.
    pub fn label(&self) -> &str {
        &self.text
    }

    /// The label as interpreted by the simulator.
    pub fn parsed_label(&self) -> &Label {
        &self.label
    }

    /// True when the label is the empty string.
    pub fn is_lambda(&self) -> bool {
        self.label.is_lambda()
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_lambda() {
            write!(f, "{} -λ-> {}", self.from, self.to)
        } else {
            write!(f, "{} -{}-> {}", self.from, self.text, self.to)
        }
    }
}
