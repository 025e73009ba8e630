use std::time::SystemTime;

use serde_with::serde_as;
use serde_with::TimestampSeconds;

use super::game_state::MAX_ATTEMPTS;

/// Running record across playthroughs. Readable everywhere, mutated only
/// through `record_result` so the derived fields stay consistent.
#[serde_as]
#[readonly::make]
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Statistics {
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Wins by number of guesses used; index 0 holds first-guess wins.
    pub win_distribution: [u32; MAX_ATTEMPTS],
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub last_played: Option<SystemTime>,
    /// Integer percent of games won, rounded; 0 before any game finishes.
    pub success_rate: u32,
}

impl Statistics {
    pub fn record_result(&mut self, won: bool, guesses_used: usize, now: SystemTime) {
        self.games_played += 1;
        self.last_played = Some(now);

        if won {
            self.games_won += 1;
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
            if (1..=MAX_ATTEMPTS).contains(&guesses_used) {
                self.win_distribution[guesses_used - 1] += 1;
            }
        } else {
            self.current_streak = 0;
        }

        self.success_rate =
            ((self.games_won as f64 / self.games_played as f64) * 100.0).round() as u32;
    }
}
