// 📚 Pokédex - the fixed dataset, indexed by lowercased name
//
// Loaded once at startup. Records keep their source order so that seeded
// random selection is reproducible; the index maps name → position.

use crate::entities::Pokemon;
use crate::error::{PokedleError, Result};
use rand::{Rng, RngCore};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Dataset compiled into the binary
const BUNDLED_DATA: &str = include_str!("../data/pokemon_info.json");

#[derive(Debug, Clone)]
pub struct Pokedex {
    /// Records in source order (never empty)
    entries: Vec<Pokemon>,

    /// Lowercased name → index into `entries`
    index: HashMap<String, usize>,
}

impl Pokedex {
    /// Parse a JSON array of records.
    ///
    /// Any malformed record, missing attribute, duplicate name or an empty
    /// collection fails the whole load with `DataFormat`.
    pub fn load(source: &str) -> Result<Pokedex> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| PokedleError::data_format(format!("invalid JSON: {}", e)))?;

        let items = match value {
            Value::Array(items) => items,
            _ => {
                return Err(PokedleError::data_format(
                    "expected a JSON array of Pokémon records",
                ))
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let record = Pokemon::from_value(item).map_err(|e| match e {
                PokedleError::DataFormat(msg) => {
                    PokedleError::data_format(format!("record #{}: {}", i, msg))
                }
                other => PokedleError::data_format(format!("record #{}: {}", i, other)),
            })?;
            records.push(record);
        }

        let pokedex = Pokedex::from_records(records)?;
        info!(count = pokedex.len(), "Pokédex loaded");
        Ok(pokedex)
    }

    /// Read and parse a dataset file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Pokedex> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| PokedleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "Loading Pokédex from file");
        Pokedex::load(&source)
    }

    /// The dataset shipped with the binary
    pub fn bundled() -> Result<Pokedex> {
        Pokedex::load(BUNDLED_DATA)
    }

    /// Index already-built records (same invariants as `load`)
    pub fn from_records(records: Vec<Pokemon>) -> Result<Pokedex> {
        if records.is_empty() {
            return Err(PokedleError::data_format("dataset contains no Pokémon"));
        }

        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if let Some(previous) = index.insert(record.key(), i) {
                return Err(PokedleError::data_format(format!(
                    "duplicate name '{}' (records #{} and #{})",
                    record.name, previous, i
                )));
            }
        }

        Ok(Pokedex {
            entries: records,
            index,
        })
    }

    /// Case-insensitive exact-name lookup
    pub fn lookup(&self, name: &str) -> Result<&Pokemon> {
        let key = name.trim().to_lowercase();
        self.index
            .get(&key)
            .map(|&i| &self.entries[i])
            .ok_or(PokedleError::NotFound(key))
    }

    /// Uniformly random record. Stateless: call again for a fresh pick.
    pub fn random_entry(&self, rng: &mut dyn RngCore) -> &Pokemon {
        let i = rng.random_range(0..self.entries.len());
        &self.entries[i]
    }

    /// Autocomplete: names containing `typed` (case-insensitive), sorted.
    ///
    /// Empty input lists every name; otherwise at most `limit` names.
    pub fn suggestions(&self, typed: &str, limit: usize) -> Vec<&str> {
        let typed = typed.trim().to_lowercase();

        if typed.is_empty() {
            return self.names();
        }

        let mut matches: Vec<&str> = self
            .entries
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&typed))
            .map(|p| p.name.as_str())
            .collect();
        matches.sort_unstable();
        matches.truncate(limit);
        matches
    }

    /// All display names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a loaded Pokédex
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
