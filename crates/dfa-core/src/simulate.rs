//! # Simulator
//!
//! Runs an input sequence through a [`Dfa`] from its initial state.
//!
//! ## Rejection on Missing Transition
//!
//! If no transition exists for the current state and the next symbol, the
//! run stops there and rejects. The reported final state is the last state
//! actually reached. This is an ordinary outcome, not an error, and it
//! applies even when that state is accepting.
//!
//! An empty input consults no transitions: the verdict is whether the
//! initial state is accepting.

use serde::{Deserialize, Serialize};

use crate::model::{Dfa, State, Symbol, Transition};
use crate::resolve::resolve_transition;

/// Outcome of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// The state the run ended in (or halted at).
    pub final_state: State,
    /// Whether the input was accepted.
    pub accepted: bool,
}

/// One applied transition in a traced run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Zero-based index of the consumed symbol in the input.
    pub position: usize,
    /// State before the step.
    pub from: State,
    /// Symbol consumed.
    pub symbol: Symbol,
    /// State after the step.
    pub to: State,
}

/// Where a run stopped because no transition applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Halt {
    /// Zero-based index of the symbol that could not be consumed.
    pub position: usize,
    /// State the run was in.
    pub state: State,
    /// Symbol with no outgoing transition.
    pub symbol: Symbol,
}

/// A simulation with its full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationTrace {
    /// Applied transitions, in input order.
    pub steps: Vec<Step>,
    /// Set when the run stopped early on a missing transition.
    pub halted: Option<Halt>,
    /// The same verdict [`simulate`] reports.
    pub result: SimulationResult,
}

/// Drive the automaton over `input`, reporting each applied transition.
///
/// Returns the last reached state and, on an early stop, the position of
/// the symbol that had no transition.
fn run<'a, S, F>(dfa: &'a Dfa, input: &[S], mut on_step: F) -> (&'a State, Option<usize>)
where
    S: AsRef<str>,
    F: FnMut(usize, &'a Transition),
{
    let mut current = &dfa.initial_state;

    for (position, symbol) in input.iter().enumerate() {
        let symbol = symbol.as_ref();
        match resolve_transition(dfa, current.as_str(), symbol) {
            Some(transition) => {
                on_step(position, transition);
                current = &transition.to;
            }
            None => {
                tracing::trace!(
                    state = %current,
                    symbol,
                    position,
                    "no transition; rejecting"
                );
                return (current, Some(position));
            }
        }
    }

    (current, None)
}

/// Run `input` through `dfa` and report the final state and verdict.
pub fn simulate<S: AsRef<str>>(dfa: &Dfa, input: &[S]) -> SimulationResult {
    let (final_state, halted) = run(dfa, input, |_, _| {});
    SimulationResult {
        final_state: final_state.clone(),
        accepted: halted.is_none() && dfa.is_final(final_state.as_str()),
    }
}

/// Like [`simulate`], but also record every step and the halt point.
pub fn trace<S: AsRef<str>>(dfa: &Dfa, input: &[S]) -> SimulationTrace {
    let mut steps = Vec::with_capacity(input.len());
    let (final_state, halted) = run(dfa, input, |position, t| {
        steps.push(Step {
            position,
            from: t.from.clone(),
            symbol: t.symbol.clone(),
            to: t.to.clone(),
        });
    });

    let halted = halted.map(|position| Halt {
        position,
        state: final_state.clone(),
        symbol: Symbol::new(input[position].as_ref()),
    });

    SimulationTrace {
        result: SimulationResult {
            final_state: final_state.clone(),
            accepted: halted.is_none() && dfa.is_final(final_state.as_str()),
        },
        steps,
        halted,
    }
}
