//! Per-user, per-game progress rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Progress record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// `None` when the user has never played the game
    pub id: Option<i32>,
    pub user_id: i32,
    pub game_id: i32,
    pub game_slug: String,
    pub score: i32,
    pub level: i32,
    pub completed_challenges: Vec<String>,
    pub streak: i32,
    pub last_played: Option<String>,
}

impl Progress {
    /// What a user who never played the game sees
    pub fn fresh(user_id: i32, game_id: i32, game_slug: impl Into<String>) -> Self {
        let state = ProgressState::default();
        Self {
            id: None,
            user_id,
            game_id,
            game_slug: game_slug.into(),
            score: state.score,
            level: state.level,
            completed_challenges: state.completed_challenges,
            streak: state.streak,
            last_played: None,
        }
    }
}

/// Body of `PUT /progress/:gameSlug`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub score: Option<i32>,
    pub level: Option<i32>,
    pub completed_challenge: Option<String>,
}

impl ProgressUpdate {
    pub fn validate(&self) -> Result<(), DomainError> {
        if matches!(self.score, Some(s) if s < 0) {
            return Err(DomainError::validation("score cannot be negative"));
        }
        if matches!(self.level, Some(l) if l < 1) {
            return Err(DomainError::validation("level starts at 1"));
        }
        if matches!(&self.completed_challenge, Some(c) if c.trim().is_empty()) {
            return Err(DomainError::validation("completedChallenge cannot be blank"));
        }
        Ok(())
    }
}

/// The mutable part of a progress row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    pub score: i32,
    pub level: i32,
    pub completed_challenges: Vec<String>,
    pub streak: i32,
    pub last_played: Option<DateTime<Utc>>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_challenges: Vec::new(),
            streak: 0,
            last_played: None,
        }
    }
}

impl ProgressState {
    /// Best score is kept, level is replaced, challenges are a set.
    pub fn apply(mut self, update: &ProgressUpdate, now: DateTime<Utc>) -> Self {
        if let Some(score) = update.score {
            self.score = self.score.max(score);
        }
        if let Some(level) = update.level {
            self.level = level;
        }
        if let Some(challenge) = &update.completed_challenge
            && !self.completed_challenges.contains(challenge)
        {
            self.completed_challenges.push(challenge.clone());
        }
        self.streak = next_streak(self.streak, self.last_played, now);
        self.last_played = Some(now);
        self
    }
}

/// Daily play streak: playing again on the same calendar day keeps it, playing on the
/// following day extends it, any longer gap restarts it.
pub fn next_streak(previous: i32, last_played: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i32 {
    let Some(last) = last_played else {
        return 1;
    };
    let gap = (now.date_naive() - last.date_naive()).num_days();
    match gap {
        0 => previous.max(1),
        1 => previous + 1,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn streak_starts_at_one() {
        assert_eq!(next_streak(0, None, at(1, 9)), 1);
    }

    #[test]
    fn streak_is_kept_on_the_same_day() {
        assert_eq!(next_streak(4, Some(at(10, 1)), at(10, 23)), 4);
    }

    #[test]
    fn streak_grows_on_consecutive_days_even_across_midnight() {
        assert_eq!(next_streak(4, Some(at(10, 23)), at(11, 0)), 5);
    }

    #[test]
    fn streak_resets_after_a_gap() {
        assert_eq!(next_streak(9, Some(at(10, 12)), at(12, 12)), 1);
    }

    #[test]
    fn apply_keeps_best_score_and_dedupes_challenges() {
        let update = ProgressUpdate {
            score: Some(80),
            level: Some(2),
            completed_challenge: Some("surah-al-fatiha".into()),
        };
        let state = ProgressState::default().apply(&update, at(1, 8));
        assert_eq!(state.score, 80);
        assert_eq!(state.level, 2);
        assert_eq!(state.streak, 1);

        let lower = ProgressUpdate {
            score: Some(40),
            ..update.clone()
        };
        let state = state.apply(&lower, at(2, 8));
        assert_eq!(state.score, 80);
        assert_eq!(state.completed_challenges, vec!["surah-al-fatiha".to_string()]);
        assert_eq!(state.streak, 2);
        assert_eq!(state.last_played, Some(at(2, 8)));
    }

    #[test]
    fn update_validation() {
        assert!(ProgressUpdate::default().validate().is_ok());
        let negative = ProgressUpdate {
            score: Some(-1),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
        let level_zero = ProgressUpdate {
            level: Some(0),
            ..Default::default()
        };
        assert!(level_zero.validate().is_err());
    }
}
