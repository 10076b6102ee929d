// ⚙️ Game Configuration
//
// No CLI flags, no environment variables: settings are compiled-in defaults,
// and the only thing resolved at runtime is where the dataset comes from.

use crate::error::Result;
use crate::pokedex::Pokedex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Max autocomplete suggestions for non-empty input
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Character masking unrevealed letters in a hint
    #[serde(default = "default_hint_placeholder")]
    pub hint_placeholder: char,

    /// Dataset file looked up next to the executable
    #[serde(default = "default_data_file_name")]
    pub data_file_name: String,
}

fn default_suggestion_limit() -> usize {
    15
}

fn default_hint_placeholder() -> char {
    '?'
}

fn default_data_file_name() -> String {
    "pokemon_info.json".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            suggestion_limit: default_suggestion_limit(),
            hint_placeholder: default_hint_placeholder(),
            data_file_name: default_data_file_name(),
        }
    }
}

// ============================================================================
// DATA SOURCE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Dataset compiled into the binary
    Bundled,

    /// JSON file on disk
    File(PathBuf),
}

impl DataSource {
    /// A dataset file next to the executable wins over the bundled one
    pub fn resolve(config: &GameConfig) -> DataSource {
        match env::current_exe() {
            Ok(exe) => DataSource::resolve_in(exe.parent(), config),
            Err(e) => {
                warn!(error = %e, "Cannot locate executable, using bundled Pokédex");
                DataSource::Bundled
            }
        }
    }

    pub fn resolve_in(dir: Option<&Path>, config: &GameConfig) -> DataSource {
        match dir.map(|d| d.join(&config.data_file_name)) {
            Some(candidate) if candidate.is_file() => DataSource::File(candidate),
            _ => {
                debug!("No dataset file beside executable, using bundled Pokédex");
                DataSource::Bundled
            }
        }
    }

    pub fn load(&self) -> Result<Pokedex> {
        match self {
            DataSource::Bundled => Pokedex::bundled(),
            DataSource::File(path) => Pokedex::load_from_path(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DataSource::Bundled => "bundled dataset".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}
