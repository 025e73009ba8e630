use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::WORD_LENGTH;

// word lists compiled in by the build script
mod embedded {
    include!(concat!(env!("OUT_DIR"), "/answers.rs"));
    include!(concat!(env!("OUT_DIR"), "/allowed_extra.rs"));
}

/// The answer pool plus the wider set of accepted guesses. Words are held
/// uppercase; every answer is itself an accepted guess.
pub struct WordList {
    answers: Vec<String>,
    allowed: HashSet<String>,
}

impl WordList {
    /// The embedded dictionary shipped with the crate.
    pub fn standard() -> Self {
        Self::new(
            embedded::ANSWERS.iter().copied(),
            embedded::ALLOWED_EXTRA.iter().copied(),
        )
    }

    pub fn new<'a>(
        answers: impl IntoIterator<Item = &'a str>,
        allowed_extra: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let answers: Vec<String> = answers
            .into_iter()
            .map(|word| word.to_ascii_uppercase())
            .collect();
        debug_assert!(!answers.is_empty());

        let mut allowed: HashSet<String> = answers.iter().cloned().collect();
        allowed.extend(
            allowed_extra
                .into_iter()
                .map(|word| word.to_ascii_uppercase()),
        );

        Self { answers, allowed }
    }

    pub fn random_word(&self) -> String {
        let index = rand::rng().random_range(0..self.answers.len());
        self.answers[index].clone()
    }

    /// Deterministic pick: the same seed maps to the same answer for a given
    /// dictionary, across runs and platforms.
    pub fn word_for_seed(&self, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        let index = rng.random_range(0..self.answers.len());
        self.answers[index].clone()
    }

    pub fn is_valid_guess(&self, word: &str) -> bool {
        word.len() == WORD_LENGTH && self.allowed.contains(&word.to_ascii_uppercase())
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_list() -> WordList {
        WordList::new(["crane", "slate", "robot"], ["erase", "llama"])
    }

    #[test]
    fn test_standard_list_is_populated() {
        let words = WordList::standard();
        assert_eq!(words.answer_count(), embedded::ANSWERS_COUNT);
        assert!(words.answer_count() > 100);
        assert!(embedded::ALLOWED_EXTRA_COUNT > 0);
        assert!(words.is_valid_guess("CRANE"));
    }

    #[test]
    fn test_answers_are_valid_guesses() {
        let words = small_list();
        assert!(words.is_valid_guess("crane"));
        assert!(words.is_valid_guess("SLATE"));
    }

    #[test]
    fn test_extra_words_are_guessable_only() {
        let words = small_list();
        assert!(words.is_valid_guess("llama"));
        for _ in 0..20 {
            assert_ne!(words.random_word(), "LLAMA");
        }
    }

    #[test]
    fn test_rejects_unknown_and_malformed_words() {
        let words = small_list();
        assert!(!words.is_valid_guess("QWZXY"));
        assert!(!words.is_valid_guess("CRAN"));
        assert!(!words.is_valid_guess("CRANES"));
        assert!(!words.is_valid_guess(""));
    }

    #[test]
    fn test_random_word_draws_from_answers() {
        let words = small_list();
        for _ in 0..20 {
            let word = words.random_word();
            assert!(["CRANE", "SLATE", "ROBOT"].contains(&word.as_str()));
        }
    }

    #[test]
    fn test_seeded_word_is_stable() {
        let words = small_list();
        let first = words.word_for_seed(1234);
        for _ in 0..5 {
            assert_eq!(words.word_for_seed(1234), first);
        }
    }

    #[test]
    fn test_different_seeds_can_differ() {
        let words = small_list();
        let picks: HashSet<String> = (0..32).map(|seed| words.word_for_seed(seed)).collect();
        assert!(picks.len() > 1);
    }

    #[test]
    fn test_words_are_normalized_uppercase() {
        let words = small_list();
        let word = words.word_for_seed(7);
        assert_eq!(word, word.to_ascii_uppercase());
    }
}
