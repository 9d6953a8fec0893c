//! # Transition Resolver
//!
//! Looks up the edge leaving a state on a symbol. On a well-formed DFA
//! there is exactly one. On a malformed one there may be none (returned as
//! `None`) or several, in which case the candidate whose target sorts first
//! under [`natural_cmp`] wins. Candidates whose targets collate equal (for
//! example `"01"` and `"1"`) keep list order. The same arguments always
//! resolve to the same transition.

use crate::model::{Dfa, Transition};
use crate::natural::natural_cmp;

/// Return the transition taken from `state` on `symbol`, if any.
///
/// `state` does not have to be listed in `dfa.states`.
pub fn resolve_transition<'a>(dfa: &'a Dfa, state: &str, symbol: &str) -> Option<&'a Transition> {
    let mut candidates = dfa
        .transitions
        .iter()
        .filter(|t| t.from == state && t.symbol == symbol);

    let first = candidates.next()?;
    let mut extra = 0usize;
    let chosen = candidates.fold(first, |best, t| {
        extra += 1;
        // Strict `Less` keeps the earlier of two equally collated targets.
        if natural_cmp(t.to.as_str(), best.to.as_str()).is_lt() {
            t
        } else {
            best
        }
    });

    if extra > 0 {
        tracing::debug!(
            state,
            symbol,
            candidates = extra + 1,
            chosen = %chosen.to,
            "non-deterministic transition resolved by natural order"
        );
    }

    Some(chosen)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn edge_lists() -> impl Strategy<Value = Vec<(String, String, String)>> {
        prop::collection::vec(("q[0-3]", "[ab]", "q[0-9]{1,2}"), 0..24)
    }

    fn build(edges: &[(String, String, String)]) -> Dfa {
        edges
            .iter()
            .fold(Dfa::new("q0"), |dfa, (f, s, t)| {
                dfa.with_transition(f.as_str(), s.as_str(), t.as_str())
            })
    }

    proptest! {
        /// Resolution is repeatable for identical arguments.
        #[test]
        fn repeatable(edges in edge_lists(), state in "q[0-3]", symbol in "[ab]") {
            let dfa = build(&edges);
            let first = resolve_transition(&dfa, &state, &symbol).cloned();
            let second = resolve_transition(&dfa, &state, &symbol).cloned();
            prop_assert_eq!(first, second);
        }

        /// The chosen target is the natural minimum over all candidates.
        #[test]
        fn picks_natural_minimum(edges in edge_lists(), state in "q[0-3]", symbol in "[ab]") {
            let dfa = build(&edges);
            let mut targets: Vec<&str> = dfa
                .transitions
                .iter()
                .filter(|t| t.from == state.as_str() && t.symbol == symbol.as_str())
                .map(|t| t.to.as_str())
                .collect();
            targets.sort_by(|a, b| natural_cmp(a, b));

            let chosen = resolve_transition(&dfa, &state, &symbol).map(|t| t.to.as_str());
            prop_assert_eq!(chosen, targets.first().copied());
        }

        /// Reversing the transition list only changes the choice among
        /// targets that collate equal.
        #[test]
        fn order_insensitive(edges in edge_lists(), state in "q[0-3]", symbol in "[ab]") {
            let dfa = build(&edges);
            let mut reversed_edges = edges.clone();
            reversed_edges.reverse();
            let reversed = build(&reversed_edges);

            let a = resolve_transition(&dfa, &state, &symbol);
            let b = resolve_transition(&reversed, &state, &symbol);
            match (a, b) {
                (Some(a), Some(b)) => {
                    prop_assert_eq!(natural_cmp(a.to.as_str(), b.to.as_str()), std::cmp::Ordering::Equal);
                }
                (a, b) => prop_assert_eq!(a.is_none(), b.is_none()),
            }
        }
    }
}
