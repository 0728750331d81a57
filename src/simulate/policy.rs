//! Closure policies distinguishing the two simulator variants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a simulator treats the states it lands on.
///
/// The two simulator variants run the same algorithm and differ only here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosurePolicy {
    /// Step by state: the initial frontier holds only the initial state,
    /// and every lambda hop is its own round.
    Identity,

    /// Step with closure: the initial frontier is the lambda closure of the
    /// initial state, and a literal-label step lands on every member of the
    /// target's closure. List-label steps land on the target alone.
    #[default]
    LambdaClosure,
}

impl ClosurePolicy {
    /// Whether this policy expands lambda closures.
    pub fn takes_closure(self) -> bool {
        matches!(self, ClosurePolicy::LambdaClosure)
    }
}

impl fmt::Display for ClosurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosurePolicy::Identity => f.write_str("step by state"),
            ClosurePolicy::LambdaClosure => f.write_str("step with closure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lambda_closure_takes_closure() {
        assert!(!ClosurePolicy::Identity.takes_closure());
        assert!(ClosurePolicy::LambdaClosure.takes_closure());
    }

    #[test]
    fn policy_serializes_in_snake_case() {
        let json = serde_json::to_string(&ClosurePolicy::LambdaClosure).unwrap();
        assert_eq!(json, r#""lambda_closure""#);
        let back: ClosurePolicy = serde_json::from_str(r#""identity""#).unwrap();
        assert_eq!(back, ClosurePolicy::Identity);
    }
}
