// Entity Models
//
// A Pokémon record is a VALUE: loaded once, never mutated.
// Its identity is the lowercased name (see Pokemon::key).

pub mod pokemon;

pub use pokemon::{Category, Pokemon};
