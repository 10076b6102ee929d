// ⚠️ Error Model - every failure the engine can report
//
// Two families:
// - Fatal at startup: DataFormat, Io (bad or unreadable dataset)
// - Recoverable by the player: NotFound, AlreadyWon
//
// MissingAttribute is raised at the record boundary (Pokemon::from_value)
// and never by the comparator, which only ever sees complete records.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PokedleError {
    /// Dataset could not be parsed or violates a collection invariant
    #[error("data format error: {0}")]
    DataFormat(String),

    /// Dataset file could not be read
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Guessed name is not in the Pokédex
    #[error("'{0}' not found. Try again.")]
    NotFound(String),

    /// A record lacks one of the required attributes
    #[error("record {record} is missing required attribute '{attribute}'")]
    MissingAttribute {
        record: String,
        attribute: &'static str,
    },

    /// Session already reached WON; a reset is required
    #[error("the game is already won - reset to play again")]
    AlreadyWon,
}

impl PokedleError {
    pub fn data_format(message: impl Into<String>) -> Self {
        PokedleError::DataFormat(message.into())
    }

    /// True for errors the player can fix by typing something else
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PokedleError::NotFound(_) | PokedleError::AlreadyWon)
    }
}

pub type Result<T> = std::result::Result<T, PokedleError>;
