//! # Automaton Model
//!
//! Plain data describing a deterministic finite automaton. Nothing here
//! enforces well-formedness; a [`Dfa`] may name unknown states, carry
//! duplicate transitions or omit transitions entirely. The
//! [`validate`](crate::validate) module reports such problems and the
//! resolver and simulator tolerate them.
//!
//! ## Serialized Shape
//!
//! ```json
//! {
//!   "states": ["even", "odd"],
//!   "alphabet": ["0", "1"],
//!   "transitions": [{ "from": "even", "symbol": "1", "to": "odd" }],
//!   "initial_state": "even",
//!   "final_states": ["odd"]
//! }
//! ```

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// An opaque state identifier. Only equality carries meaning; natural
    /// ordering is used solely to break ties between duplicate transitions.
    State
);

string_id!(
    /// An opaque input symbol drawn from the automaton's alphabet.
    Symbol
);

/// One edge of the transition function: `from --symbol--> to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Source state.
    pub from: State,
    /// Input symbol consumed by the edge.
    pub symbol: Symbol,
    /// Target state.
    pub to: State,
}

impl Transition {
    /// Build a transition from anything convertible into identifiers.
    pub fn new(from: impl Into<State>, symbol: impl Into<Symbol>, to: impl Into<State>) -> Self {
        Self {
            from: from.into(),
            symbol: symbol.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.symbol, self.to)
    }
}

/// A deterministic finite automaton description.
///
/// `states`, `alphabet` and `final_states` are sets in meaning but kept as
/// vectors: enumeration order drives diagnostic order and duplicates are
/// tolerated. `transitions` order matters only when the automaton is
/// malformed and the resolver must break a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dfa {
    /// All states of the automaton.
    pub states: Vec<State>,
    /// The input alphabet.
    pub alphabet: Vec<Symbol>,
    /// The transition function as a list of edges.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// The state every run starts from.
    pub initial_state: State,
    /// The accepting states.
    #[serde(default)]
    pub final_states: Vec<State>,
}

impl Dfa {
    /// Start an automaton with only an initial state.
    ///
    /// The initial state is not added to `states`; callers list states
    /// explicitly with [`with_states`](Self::with_states).
    pub fn new(initial_state: impl Into<State>) -> Self {
        Self {
            states: Vec::new(),
            alphabet: Vec::new(),
            transitions: Vec::new(),
            initial_state: initial_state.into(),
            final_states: Vec::new(),
        }
    }

    /// Append states.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Append alphabet symbols.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Append one transition.
    pub fn with_transition(
        mut self,
        from: impl Into<State>,
        symbol: impl Into<Symbol>,
        to: impl Into<State>,
    ) -> Self {
        self.transitions.push(Transition::new(from, symbol, to));
        self
    }

    /// Append accepting states.
    pub fn with_final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Whether `state` is listed in `states`.
    pub fn is_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }

    /// Whether `symbol` is listed in the alphabet.
    pub fn in_alphabet(&self, symbol: &str) -> bool {
        self.alphabet.iter().any(|s| s == symbol)
    }

    /// Whether `state` is an accepting state.
    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.iter().any(|s| s == state)
    }
}
