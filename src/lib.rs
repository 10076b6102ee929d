// Pokedle - Core Library
// Guess the hidden Pokémon; every guess reveals per-attribute feedback.
// Exposes the engine for the terminal front end and for tests.

pub mod error;
pub mod entities;
pub mod pokedex;    // Data Store - load + name-keyed lookup
pub mod compare;    // Comparator - EXACT / PARTIAL / NONE per attribute
pub mod session;    // Game Session - attempts, hints, reset
pub mod config;
pub mod console;    // Plain-terminal front end (used when the TUI is compiled out)

// Re-export commonly used types
pub use error::{PokedleError, Result};
pub use entities::{Category, Pokemon};
pub use pokedex::Pokedex;
pub use compare::{compare, habitat_set, tag_set, Attribute, Comparison, Verdict};
pub use session::{GameSession, GuessOutcome, GuessRecord, SessionState};
pub use config::{DataSource, GameConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
