// 🐾 Pokémon Entity - one catalog record
//
// Raw JSON → validated record, once, at the loading boundary:
// - every attribute must be present (MissingAttribute otherwise)
// - the "None" type2 sentinel becomes Option::None
// - evolution stage / generation accept numbers or strings
//
// After this point nothing re-checks sentinels or missing keys.

use crate::error::{PokedleError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ============================================================================
// CATEGORY VALUE
// ============================================================================

/// Categorical attribute that the dataset stores either as a number or a string
/// (`"generation": 1` and `"generation": "I"` are both accepted).
///
/// `Number(1)` and `Text("1")` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Number(i64),
    Text(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Number(n) => write!(f, "{}", n),
            Category::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Category {
    fn from(n: i64) -> Self {
        Category::Number(n)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

// ============================================================================
// POKEMON ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pokemon {
    /// Display name, unique case-insensitively across the Pokédex
    pub name: String,

    pub type1: String,

    /// Secondary type; `None` when the dataset says "None"
    pub type2: Option<String>,

    pub evolution_stage: Category,

    pub fully_evolved: bool,

    /// Color tags as written in the dataset (compared as a set)
    pub colors: Vec<String>,

    /// Habitat entries as written; an entry may hold several
    /// comma-separated habitats ("forest, cave")
    pub habitats: Vec<String>,

    pub generation: Category,
}

/// Wire shape: everything optional so a missing key can be reported by name.
#[derive(Debug, Deserialize)]
struct RawPokemon {
    name: Option<String>,
    type1: Option<String>,
    #[serde(default, deserialize_with = "present")]
    type2: Option<Option<String>>,
    evolution_stage: Option<Category>,
    fully_evolved: Option<bool>,
    colors: Option<Vec<String>>,
    habitats: Option<Vec<String>>,
    generation: Option<Category>,
}

/// Distinguishes `"type2": null` (Some(None)) from a missing key (None).
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Pokemon {
    /// Build a record from one JSON object of the dataset.
    ///
    /// Fails with `MissingAttribute` when a required key is absent and with
    /// `DataFormat` when the value is not an object or a field has the wrong type.
    pub fn from_value(value: Value) -> Result<Pokemon> {
        let label = match value.get("name").and_then(Value::as_str) {
            Some(name) => format!("'{}'", name),
            None => "<unnamed>".to_string(),
        };

        if !value.is_object() {
            return Err(PokedleError::data_format(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }

        let raw: RawPokemon = serde_json::from_value(value)
            .map_err(|e| PokedleError::data_format(format!("record {}: {}", label, e)))?;

        let name = require(raw.name, &label, "name")?;
        if name.trim().is_empty() {
            return Err(PokedleError::data_format("record has an empty name"));
        }

        Ok(Pokemon {
            type1: require(raw.type1, &label, "type1")?,
            type2: normalize_type2(require(raw.type2, &label, "type2")?),
            evolution_stage: require(raw.evolution_stage, &label, "evolution_stage")?,
            fully_evolved: require(raw.fully_evolved, &label, "fully_evolved")?,
            colors: require(raw.colors, &label, "colors")?,
            habitats: require(raw.habitats, &label, "habitats")?,
            generation: require(raw.generation, &label, "generation")?,
            name,
        })
    }

    /// Lookup key: lowercased, trimmed name
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.key() == name.trim().to_lowercase()
    }

    pub fn type2_label(&self) -> &str {
        self.type2.as_deref().unwrap_or("None")
    }

    pub fn fully_evolved_label(&self) -> &'static str {
        if self.fully_evolved {
            "Yes"
        } else {
            "No"
        }
    }
}

fn require<T>(field: Option<T>, record: &str, attribute: &'static str) -> Result<T> {
    field.ok_or_else(|| PokedleError::MissingAttribute {
        record: record.to_string(),
        attribute,
    })
}

/// "None" (any case), blank and null all mean "no secondary type"
fn normalize_type2(raw: Option<String>) -> Option<String> {
    raw.filter(|t| {
        let t = t.trim();
        !t.is_empty() && !t.eq_ignore_ascii_case("none")
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pikachu_json() -> Value {
        json!({
            "name": "Pikachu",
            "type1": "Electric",
            "type2": "None",
            "evolution_stage": 2,
            "fully_evolved": false,
            "colors": ["Yellow"],
            "habitats": ["forest"],
            "generation": 1
        })
    }

    #[test]
    fn test_from_value_parses_all_attributes() {
        let p = Pokemon::from_value(pikachu_json()).unwrap();

        assert_eq!(p.name, "Pikachu");
        assert_eq!(p.type1, "Electric");
        assert_eq!(p.type2, None);
        assert_eq!(p.evolution_stage, Category::Number(2));
        assert!(!p.fully_evolved);
        assert_eq!(p.colors, vec!["Yellow".to_string()]);
        assert_eq!(p.habitats, vec!["forest".to_string()]);
        assert_eq!(p.generation, Category::Number(1));
    }

    #[test]
    fn test_type2_sentinel_variants_become_absent() {
        for sentinel in [json!("None"), json!("none"), json!(" NONE "), json!(""), Value::Null] {
            let mut v = pikachu_json();
            v["type2"] = sentinel.clone();
            let p = Pokemon::from_value(v).unwrap();
            assert_eq!(p.type2, None, "sentinel {:?} should be absent", sentinel);
        }
    }

    #[test]
    fn test_real_type2_is_kept() {
        let mut v = pikachu_json();
        v["type2"] = json!("Flying");
        let p = Pokemon::from_value(v).unwrap();
        assert_eq!(p.type2.as_deref(), Some("Flying"));
        assert_eq!(p.type2_label(), "Flying");
    }

    #[test]
    fn test_missing_attribute_is_reported_by_name() {
        let mut v = pikachu_json();
        v.as_object_mut().unwrap().remove("habitats");

        match Pokemon::from_value(v) {
            Err(PokedleError::MissingAttribute { record, attribute }) => {
                assert_eq!(record, "'Pikachu'");
                assert_eq!(attribute, "habitats");
            }
            other => panic!("expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_type2_key_differs_from_null() {
        let mut v = pikachu_json();
        v.as_object_mut().unwrap().remove("type2");

        let err = Pokemon::from_value(v).unwrap_err();
        assert!(matches!(
            err,
            PokedleError::MissingAttribute { attribute: "type2", .. }
        ));
    }

    #[test]
    fn test_missing_name_uses_placeholder_label() {
        let mut v = pikachu_json();
        v.as_object_mut().unwrap().remove("name");

        let err = Pokemon::from_value(v).unwrap_err();
        assert_eq!(
            err.to_string(),
            "record <unnamed> is missing required attribute 'name'"
        );
    }

    #[test]
    fn test_wrong_type_is_data_format_error() {
        let mut v = pikachu_json();
        v["fully_evolved"] = json!("sometimes");

        let err = Pokemon::from_value(v).unwrap_err();
        assert!(matches!(err, PokedleError::DataFormat(_)));
    }

    #[test]
    fn test_non_object_is_data_format_error() {
        let err = Pokemon::from_value(json!(["Pikachu"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_string_generation_is_accepted() {
        let mut v = pikachu_json();
        v["generation"] = json!("I");
        let p = Pokemon::from_value(v).unwrap();
        assert_eq!(p.generation, Category::Text("I".to_string()));
        assert_ne!(Category::Number(1), Category::Text("1".to_string()));
    }

    #[test]
    fn test_key_and_is_named_ignore_case() {
        let p = Pokemon::from_value(pikachu_json()).unwrap();
        assert_eq!(p.key(), "pikachu");
        assert!(p.is_named("PIKACHU"));
        assert!(p.is_named("  pikachu "));
        assert!(!p.is_named("raichu"));
        assert_eq!(p.fully_evolved_label(), "No");
    }
}
