//! # Validator
//!
//! Static well-formedness analysis of a [`Dfa`]. Every check runs and every
//! problem is reported, so a caller can show all of them at once. The
//! validator never fails, whatever the input.
//!
//! ## Checks, in Reporting Order
//!
//! 1. The initial state is a known state.
//! 2. Every final state is a known state.
//! 3. Per transition, in list order: known source, known target, known
//!    symbol, and at most one transition per `(source, symbol)` pair.
//! 4. Every `(state, symbol)` pair over `states × alphabet` has a
//!    transition.
//!
//! A pair with three or more transitions is reported as non-deterministic
//! once, when the second one is seen.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::model::{Dfa, State, Symbol};

/// A structural problem found in a DFA definition.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The initial state is not listed in `states`.
    #[error("Initial state \"{state}\" is not in the set of states.")]
    UnknownInitialState {
        /// The offending state.
        state: State,
    },

    /// An accepting state is not listed in `states`.
    #[error("Final state \"{state}\" is not in the set of states.")]
    UnknownFinalState {
        /// The offending state.
        state: State,
    },

    /// A transition leaves a state not listed in `states`.
    #[error("Transition from unknown state \"{state}\".")]
    UnknownSourceState {
        /// The offending state.
        state: State,
    },

    /// A transition enters a state not listed in `states`.
    #[error("Transition to unknown state \"{state}\".")]
    UnknownTargetState {
        /// The offending state.
        state: State,
    },

    /// A transition consumes a symbol not in the alphabet.
    #[error("Transition using unknown symbol \"{symbol}\".")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: Symbol,
    },

    /// More than one transition exists for a `(state, symbol)` pair.
    #[error("Non-deterministic transition found: state \"{state}\" has multiple transitions for symbol \"{symbol}\".")]
    NonDeterministic {
        /// Source state of the duplicated pair.
        state: State,
        /// Symbol of the duplicated pair.
        symbol: Symbol,
    },

    /// No transition exists for a `(state, symbol)` pair.
    #[error("Missing transition for state \"{state}\" on symbol \"{symbol}\".")]
    MissingTransition {
        /// The state lacking a transition.
        state: State,
        /// The symbol it lacks a transition for.
        symbol: Symbol,
    },
}

impl Diagnostic {
    /// Stable snake_case code for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownInitialState { .. } => "unknown_initial_state",
            Self::UnknownFinalState { .. } => "unknown_final_state",
            Self::UnknownSourceState { .. } => "unknown_source_state",
            Self::UnknownTargetState { .. } => "unknown_target_state",
            Self::UnknownSymbol { .. } => "unknown_symbol",
            Self::NonDeterministic { .. } => "non_deterministic",
            Self::MissingTransition { .. } => "missing_transition",
        }
    }
}

/// Yield each element once, in first-occurrence order.
fn distinct<'a, T: AsRef<str>>(items: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
    let mut seen = HashSet::new();
    items.iter().filter(move |item| seen.insert((*item).as_ref()))
}

/// Collect every structural problem in `dfa` as typed diagnostics.
pub fn diagnose(dfa: &Dfa) -> Vec<Diagnostic> {
    let states: HashSet<&str> = dfa.states.iter().map(State::as_str).collect();
    let alphabet: HashSet<&str> = dfa.alphabet.iter().map(Symbol::as_str).collect();
    let mut diagnostics = Vec::new();

    if !states.contains(dfa.initial_state.as_str()) {
        diagnostics.push(Diagnostic::UnknownInitialState {
            state: dfa.initial_state.clone(),
        });
    }

    for state in &dfa.final_states {
        if !states.contains(state.as_str()) {
            diagnostics.push(Diagnostic::UnknownFinalState {
                state: state.clone(),
            });
        }
    }

    let mut recorded: HashMap<(&str, &str), usize> = HashMap::new();

    for t in &dfa.transitions {
        if !states.contains(t.from.as_str()) {
            diagnostics.push(Diagnostic::UnknownSourceState {
                state: t.from.clone(),
            });
        }
        if !states.contains(t.to.as_str()) {
            diagnostics.push(Diagnostic::UnknownTargetState {
                state: t.to.clone(),
            });
        }
        if !alphabet.contains(t.symbol.as_str()) {
            diagnostics.push(Diagnostic::UnknownSymbol {
                symbol: t.symbol.clone(),
            });
        }

        let count = recorded
            .entry((t.from.as_str(), t.symbol.as_str()))
            .or_insert(0);
        *count += 1;
        if *count == 2 {
            diagnostics.push(Diagnostic::NonDeterministic {
                state: t.from.clone(),
                symbol: t.symbol.clone(),
            });
        }
    }

    for state in distinct(&dfa.states) {
        for symbol in distinct(&dfa.alphabet) {
            if !recorded.contains_key(&(state.as_str(), symbol.as_str())) {
                diagnostics.push(Diagnostic::MissingTransition {
                    state: state.clone(),
                    symbol: symbol.clone(),
                });
            }
        }
    }

    if !diagnostics.is_empty() {
        tracing::debug!(count = diagnostics.len(), "DFA definition has structural problems");
    }

    diagnostics
}

/// Collect every structural problem in `dfa` as human-readable messages.
///
/// An empty list means the DFA is well-formed.
pub fn validate(dfa: &Dfa) -> Vec<String> {
    diagnose(dfa).iter().map(ToString::to_string).collect()
}

/// Whether `dfa` has no structural problems.
pub fn is_valid(dfa: &Dfa) -> bool {
    diagnose(dfa).is_empty()
}
