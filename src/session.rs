// 🎮 Game Session - one round of play
//
// State machine:
//
//   AwaitingGuess --guess (valid, wrong)--> AwaitingGuess
//   AwaitingGuess --guess (target)-------> Won
//   any           --reset---------------> AwaitingGuess (fresh target)
//
// The session owns everything that changes during play (target, attempts,
// hint level, board history) and its random source. Nothing global.

use crate::compare::{compare, Comparison};
use crate::entities::Pokemon;
use crate::error::{PokedleError, Result};
use crate::pokedex::Pokedex;
use rand::RngCore;
use serde::Serialize;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    AwaitingGuess,
    Won,
}

/// One row of the board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessRecord {
    pub guess: Pokemon,
    pub comparison: Comparison,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuessOutcome {
    pub record: GuessRecord,
    /// True when this guess was the target
    pub won: bool,
    /// Counted guesses so far, this one included
    pub attempts: u32,
}

pub struct GameSession {
    pokedex: Pokedex,
    rng: Box<dyn RngCore>,
    target: Pokemon,
    attempts: u32,
    hint_level: usize,
    hint_placeholder: char,
    state: SessionState,
    history: Vec<GuessRecord>,
}

impl GameSession {
    /// Start a round with a random target drawn from `rng`
    pub fn new<R: RngCore + 'static>(pokedex: Pokedex, rng: R) -> Self {
        let mut rng: Box<dyn RngCore> = Box::new(rng);
        let target = pokedex.random_entry(rng.as_mut()).clone();
        debug!(target = %target.name, "New session");

        GameSession {
            pokedex,
            rng,
            target,
            attempts: 0,
            hint_level: 0,
            hint_placeholder: '?',
            state: SessionState::AwaitingGuess,
            history: Vec::new(),
        }
    }

    /// Start a round with a known target (`rng` is still used by `reset`)
    pub fn with_target<R: RngCore + 'static>(
        pokedex: Pokedex,
        rng: R,
        target_name: &str,
    ) -> Result<Self> {
        let target = pokedex.lookup(target_name)?.clone();
        let mut session = GameSession::new(pokedex, rng);
        session.target = target;
        Ok(session)
    }

    pub fn with_hint_placeholder(mut self, placeholder: char) -> Self {
        self.hint_placeholder = placeholder;
        self
    }

    /// Resolve `input` to a record, compare it against the target and record it.
    ///
    /// Unknown names fail with `NotFound` and leave the session untouched.
    pub fn submit_guess(&mut self, input: &str) -> Result<GuessOutcome> {
        if self.state == SessionState::Won {
            return Err(PokedleError::AlreadyWon);
        }

        let guess = match self.pokedex.lookup(input) {
            Ok(guess) => guess.clone(),
            Err(e) => {
                debug!(input = input, "Rejected guess");
                return Err(e);
            }
        };

        self.attempts += 1;
        let record = GuessRecord {
            comparison: compare(&self.target, &guess),
            guess,
        };
        self.history.push(record.clone());

        let won = record.guess.is_named(&self.target.name);
        if won {
            self.state = SessionState::Won;
            debug!(attempts = self.attempts, "Target found");
        }

        Ok(GuessOutcome {
            record,
            won,
            attempts: self.attempts,
        })
    }

    /// Reveal one more leading character of the target's name.
    ///
    /// Capped at the full name; further calls return the same text.
    pub fn hint(&mut self) -> String {
        if !self.hint_exhausted() {
            self.hint_level += 1;
        }
        self.hint_text()
    }

    /// Current hint without revealing more
    pub fn hint_text(&self) -> String {
        self.target
            .name
            .chars()
            .enumerate()
            .map(|(i, c)| if i < self.hint_level { c } else { self.hint_placeholder })
            .collect()
    }

    pub fn hint_level(&self) -> usize {
        self.hint_level
    }

    pub fn hint_exhausted(&self) -> bool {
        self.hint_level >= self.target.name.chars().count()
    }

    /// New random target; attempts, hints and board cleared
    pub fn reset(&mut self) {
        self.target = self.pokedex.random_entry(self.rng.as_mut()).clone();
        self.attempts = 0;
        self.hint_level = 0;
        self.state = SessionState::AwaitingGuess;
        self.history.clear();
        debug!(target = %self.target.name, "Session reset");
    }

    pub fn target(&self) -> &Pokemon {
        &self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    /// Board rows, oldest first
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("target", &self.target.name)
            .field("attempts", &self.attempts)
            .field("hint_level", &self.hint_level)
            .field("state", &self.state)
            .field("history", &self.history.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Attribute, Verdict};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const THREE: &str = r#"[
        {"name": "Pikachu", "type1": "Electric", "type2": "None", "evolution_stage": 2,
         "fully_evolved": false, "colors": ["Yellow"], "habitats": ["forest"], "generation": 1},
        {"name": "Zubat", "type1": "Poison", "type2": "Flying", "evolution_stage": 1,
         "fully_evolved": false, "colors": ["Purple", "Blue"], "habitats": ["cave"], "generation": 1},
        {"name": "Geodude", "type1": "Rock", "type2": "Ground", "evolution_stage": 1,
         "fully_evolved": false, "colors": ["Brown", "Gray"], "habitats": ["mountain, cave"], "generation": 1}
    ]"#;

    fn session_with_target(name: &str) -> GameSession {
        let dex = Pokedex::load(THREE).unwrap();
        GameSession::with_target(dex, SmallRng::seed_from_u64(1), name).unwrap()
    }

    #[test]
    fn test_identical_guess_wins_in_one_attempt() {
        let mut session = session_with_target("Pikachu");
        assert_eq!(session.state(), SessionState::AwaitingGuess);

        let outcome = session.submit_guess("pikachu").unwrap();

        assert!(outcome.won);
        assert_eq!(outcome.attempts, 1);
        assert!(outcome.record.comparison.is_exact_match());
        assert_eq!(outcome.record.comparison.count(Verdict::Exact), 7);
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_wrong_guess_counts_and_keeps_playing() {
        let mut session = session_with_target("Geodude");

        let outcome = session.submit_guess("Zubat").unwrap();

        assert!(!outcome.won);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.record.guess.name, "Zubat");
        assert_eq!(
            outcome.record.comparison.get(Attribute::Habitats),
            Verdict::Partial
        );
        assert_eq!(session.state(), SessionState::AwaitingGuess);

        session.submit_guess("ZUBAT").unwrap();
        assert_eq!(session.attempts(), 2);
    }

    #[test]
    fn test_unknown_guess_is_not_counted() {
        let mut session = session_with_target("Pikachu");
        session.submit_guess("Zubat").unwrap();

        let err = session.submit_guess("Agumon").unwrap_err();

        assert!(matches!(err, PokedleError::NotFound(_)));
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingGuess);
    }

    #[test]
    fn test_guess_after_win_is_rejected() {
        let mut session = session_with_target("Zubat");
        session.submit_guess("Zubat").unwrap();

        let err = session.submit_guess("Pikachu").unwrap_err();
        assert!(matches!(err, PokedleError::AlreadyWon));
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_hint_sequence_caps_at_full_name() {
        let mut session = session_with_target("Pikachu");
        assert_eq!(session.hint_text(), "???????");

        let hints: Vec<String> = (0..7).map(|_| session.hint()).collect();
        assert_eq!(hints[0], "P??????");
        assert_eq!(hints[1], "Pi?????");
        assert_eq!(hints[6], "Pikachu");
        assert!(session.hint_exhausted());

        assert_eq!(session.hint(), "Pikachu");
        assert_eq!(session.hint_level(), 7);
    }

    #[test]
    fn test_hint_is_independent_of_attempts() {
        let mut session = session_with_target("Zubat");
        session.hint();
        session.hint();
        assert_eq!(session.attempts(), 0);

        session.submit_guess("Pikachu").unwrap();
        assert_eq!(session.hint_text(), "Zu???");
    }

    #[test]
    fn test_hint_counts_characters_not_bytes() {
        let source = r#"[{"name": "Nidoran♀", "type1": "Poison", "type2": "None", "evolution_stage": 1,
            "fully_evolved": false, "colors": ["Blue"], "habitats": ["grassland"], "generation": 1}]"#;
        let dex = Pokedex::load(source).unwrap();
        let mut session = GameSession::new(dex, SmallRng::seed_from_u64(3));

        for _ in 0..8 {
            session.hint();
        }
        assert_eq!(session.hint(), "Nidoran♀");
        assert_eq!(session.hint_level(), 8);
    }

    #[test]
    fn test_custom_hint_placeholder() {
        let mut session = session_with_target("Zubat").with_hint_placeholder('_');
        assert_eq!(session.hint(), "Z____");
    }

    #[test]
    fn test_reset_clears_round_state() {
        let mut session = session_with_target("Pikachu");
        session.submit_guess("Zubat").unwrap();
        session.submit_guess("Pikachu").unwrap();
        session.hint();
        assert!(session.is_won());

        session.reset();

        assert_eq!(session.state(), SessionState::AwaitingGuess);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.hint_level(), 0);
        assert!(session.history().is_empty());
        assert!(session.pokedex().lookup(&session.target().name).is_ok());
    }

    #[test]
    fn test_seeded_sessions_pick_same_targets() {
        let dex = Pokedex::load(THREE).unwrap();
        let mut a = GameSession::new(dex.clone(), SmallRng::seed_from_u64(99));
        let mut b = GameSession::new(dex, SmallRng::seed_from_u64(99));

        for _ in 0..5 {
            assert_eq!(a.target().name, b.target().name);
            a.reset();
            b.reset();
        }
    }

    #[test]
    fn test_with_unknown_target_fails() {
        let dex = Pokedex::load(THREE).unwrap();
        let result = GameSession::with_target(dex, SmallRng::seed_from_u64(1), "Mew");
        assert!(matches!(result, Err(PokedleError::NotFound(_))));
    }
}
