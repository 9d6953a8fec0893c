//! # dfa-core — Deterministic Finite Automaton Engine
//!
//! The algorithmic core of the workspace. A [`Dfa`] is a plain description
//! (states, alphabet, transitions, initial and accepting states) built by a
//! caller; this crate resolves transitions on it, simulates input through it
//! and checks it for structural well-formedness.
//!
//! ## Entry Points
//!
//! - [`resolve_transition`] — the transition for a `(state, symbol)` pair.
//!   Duplicate transitions are broken by natural order of the target state,
//!   never by panicking.
//! - [`simulate`] / [`trace`] — run an input sequence from the initial state.
//!   A missing transition halts the run as a rejection.
//! - [`validate`] / [`diagnose`] — every structural problem, as messages or
//!   as typed [`Diagnostic`] values.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `dfa-*` crates (this is the leaf of the DAG).
//! - The engine functions are pure and infallible: they take `&Dfa`, never
//!   mutate it and never return `Err`. Malformed input degrades to
//!   diagnostics or rejection.
//! - Only the [`definition`] codec touches I/O and returns [`DfaError`].
//! - No `unsafe` code. No `panic!()` or `.unwrap()` outside tests.

pub mod definition;
pub mod error;
pub mod model;
pub mod natural;
pub mod resolve;
pub mod simulate;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use definition::DefinitionFormat;
pub use error::DfaError;
pub use model::{Dfa, State, Symbol, Transition};
pub use natural::natural_cmp;
pub use resolve::resolve_transition;
pub use simulate::{simulate, trace, Halt, SimulationResult, SimulationTrace, Step};
pub use validate::{diagnose, is_valid, validate, Diagnostic};
