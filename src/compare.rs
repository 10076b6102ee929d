// 🎯 Comparator - how close is a guess to the target?
//
// Seven attributes, one verdict each:
// - scalar attributes (types, stage, evolved flag, generation): EXACT or NONE
// - tag attributes (colors, habitats): EXACT / PARTIAL / NONE by set overlap
//
// Pure function: same (target, guess) always yields the same Comparison.

use crate::entities::Pokemon;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// VERDICT
// ============================================================================

/// Ordered by quality: `NoMatch < Partial < Exact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "NONE")]
    NoMatch,
    #[serde(rename = "PARTIAL")]
    Partial,
    #[serde(rename = "EXACT")]
    Exact,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Exact => "EXACT",
            Verdict::Partial => "PARTIAL",
            Verdict::NoMatch => "NONE",
        }
    }

    fn from_equality(equal: bool) -> Self {
        if equal {
            Verdict::Exact
        } else {
            Verdict::NoMatch
        }
    }
}

// ============================================================================
// ATTRIBUTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Type1,
    Type2,
    EvolutionStage,
    FullyEvolved,
    Colors,
    Habitats,
    Generation,
}

impl Attribute {
    /// Board column order
    pub const ALL: [Attribute; 7] = [
        Attribute::Type1,
        Attribute::Type2,
        Attribute::EvolutionStage,
        Attribute::FullyEvolved,
        Attribute::Colors,
        Attribute::Habitats,
        Attribute::Generation,
    ];

    /// Record field name
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Type1 => "type1",
            Attribute::Type2 => "type2",
            Attribute::EvolutionStage => "evolution_stage",
            Attribute::FullyEvolved => "fully_evolved",
            Attribute::Colors => "colors",
            Attribute::Habitats => "habitats",
            Attribute::Generation => "generation",
        }
    }

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Type1 => "Type1",
            Attribute::Type2 => "Type2",
            Attribute::EvolutionStage => "Stage",
            Attribute::FullyEvolved => "Full Evo?",
            Attribute::Colors => "Colors",
            Attribute::Habitats => "Habitats",
            Attribute::Generation => "Gen",
        }
    }

    /// The guess's value for this attribute, formatted for a board cell
    pub fn display_value(&self, pokemon: &Pokemon) -> String {
        match self {
            Attribute::Type1 => pokemon.type1.clone(),
            Attribute::Type2 => pokemon.type2_label().to_string(),
            Attribute::EvolutionStage => pokemon.evolution_stage.to_string(),
            Attribute::FullyEvolved => pokemon.fully_evolved_label().to_string(),
            Attribute::Colors => pokemon.colors.join(", "),
            Attribute::Habitats => pokemon.habitats.join(", "),
            Attribute::Generation => pokemon.generation.to_string(),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

// ============================================================================
// COMPARISON RESULT
// ============================================================================

/// One verdict per attribute; always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    verdicts: [Verdict; 7],
}

impl Comparison {
    pub fn get(&self, attribute: Attribute) -> Verdict {
        self.verdicts[attribute.index()]
    }

    /// (attribute, verdict) pairs in board column order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Verdict)> + '_ {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }

    pub fn is_exact_match(&self) -> bool {
        self.verdicts.iter().all(|v| *v == Verdict::Exact)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.verdicts.iter().filter(|v| **v == verdict).count()
    }

    /// Keyed by record field name ("type1", "colors", ...)
    pub fn to_map(&self) -> BTreeMap<&'static str, Verdict> {
        self.iter().map(|(a, v)| (a.key(), v)).collect()
    }
}

impl Serialize for Comparison {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

// ============================================================================
// COMPARE
// ============================================================================

/// Classify how closely `guess` matches `target`, attribute by attribute.
pub fn compare(target: &Pokemon, guess: &Pokemon) -> Comparison {
    let mut verdicts = [Verdict::NoMatch; 7];

    for attribute in Attribute::ALL {
        verdicts[attribute.index()] = match attribute {
            Attribute::Type1 => Verdict::from_equality(target.type1 == guess.type1),
            // Sentinel already folded into None at load time
            Attribute::Type2 => Verdict::from_equality(target.type2 == guess.type2),
            Attribute::EvolutionStage => {
                Verdict::from_equality(target.evolution_stage == guess.evolution_stage)
            }
            Attribute::FullyEvolved => {
                Verdict::from_equality(target.fully_evolved == guess.fully_evolved)
            }
            Attribute::Colors => {
                set_verdict(&tag_set(&target.colors), &tag_set(&guess.colors))
            }
            Attribute::Habitats => {
                set_verdict(&habitat_set(&target.habitats), &habitat_set(&guess.habitats))
            }
            Attribute::Generation => Verdict::from_equality(target.generation == guess.generation),
        };
    }

    Comparison { verdicts }
}

/// Trimmed, lowercased tags; blank tags dropped.
pub fn tag_set<S: AsRef<str>>(tags: &[S]) -> BTreeSet<String> {
    tags.iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Like `tag_set`, but every entry is first split on commas.
pub fn habitat_set<S: AsRef<str>>(entries: &[S]) -> BTreeSet<String> {
    let flattened: Vec<&str> = entries
        .iter()
        .flat_map(|entry| entry.as_ref().split(','))
        .collect();
    tag_set(&flattened)
}

/// Identical sets are EXACT (empty == empty included), overlap is PARTIAL.
fn set_verdict(target: &BTreeSet<String>, guess: &BTreeSet<String>) -> Verdict {
    if target == guess {
        Verdict::Exact
    } else if target.intersection(guess).next().is_some() {
        Verdict::Partial
    } else {
        Verdict::NoMatch
    }
}
