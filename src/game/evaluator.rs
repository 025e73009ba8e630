use std::collections::HashMap;

use itertools::Itertools;

use crate::model::{LetterStatus, WORD_LENGTH};

/// Colors one guess against the solution. Exact matches claim their letter
/// from the solution's pool first; the leftovers then satisfy misplaced
/// letters from left to right, so a guess never shows more copies of a
/// letter as colored than the solution contains.
pub fn evaluate_guess(guess: &str, solution: &str) -> [LetterStatus; WORD_LENGTH] {
    let guess: Vec<char> = guess.chars().map(|c| c.to_ascii_uppercase()).collect();
    let solution: Vec<char> = solution.chars().map(|c| c.to_ascii_uppercase()).collect();
    debug_assert_eq!(guess.len(), WORD_LENGTH);
    debug_assert_eq!(solution.len(), WORD_LENGTH);

    let mut result = [LetterStatus::Absent; WORD_LENGTH];
    let mut remaining: HashMap<char, usize> = solution.iter().copied().counts();

    // first pass: exact matches consume their letter from the pool
    for i in 0..WORD_LENGTH {
        if guess[i] == solution[i] {
            result[i] = LetterStatus::Correct;
            if let Some(count) = remaining.get_mut(&guess[i]) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // second pass: misplaced letters claim whatever the first pass left
    for i in 0..WORD_LENGTH {
        if result[i] == LetterStatus::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&guess[i]) {
            if *count > 0 {
                result[i] = LetterStatus::Present;
                *count -= 1;
            }
        }
    }

    result
}
