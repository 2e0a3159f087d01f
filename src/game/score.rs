use serde::{Deserialize, Serialize};

/// The single persisted best score and who set it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub name: String,
    pub score: u32,
}

impl HighScore {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Current-round score plus the best seen so far
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    player_name: String,
    current: u32,
    best: HighScore,
}

impl ScoreRecord {
    /// Start a session for `player_name`, seeded with a previously stored best
    pub fn new(player_name: impl Into<String>, stored: Option<HighScore>) -> Self {
        let player_name = player_name.into();
        let best = stored.unwrap_or_else(|| HighScore::new(player_name.clone(), 0));
        Self {
            player_name,
            current: 0,
            best,
        }
    }

    pub fn increment(&mut self) {
        self.current += 1;
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> &HighScore {
        &self.best
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Close the round: if the round beat the best, the player becomes the
    /// new record holder. Returns the new best when it changed.
    pub fn finish_round(&mut self) -> Option<HighScore> {
        if self.current > self.best.score {
            self.best = HighScore::new(self.player_name.clone(), self.current);
            Some(self.best.clone())
        } else {
            None
        }
    }

    /// Fold in a best score read back from storage
    pub fn merge_stored(&mut self, stored: Option<HighScore>) {
        match stored {
            Some(stored) if stored.score > self.best.score => self.best = stored,
            _ => {}
        }
    }

    /// Zero the current score for a new round; the best carries forward
    pub fn reset_round(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_stored_record() {
        let record = ScoreRecord::new("ada", None);
        assert_eq!(record.current(), 0);
        assert_eq!(record.best(), &HighScore::new("ada", 0));
    }

    #[test]
    fn test_best_is_max_of_previous_and_round() {
        let mut record = ScoreRecord::new("ada", Some(HighScore::new("bob", 3)));

        record.increment();
        record.increment();
        assert_eq!(record.finish_round(), None);
        assert_eq!(record.best(), &HighScore::new("bob", 3));

        record.reset_round();
        for _ in 0..5 {
            record.increment();
        }
        assert_eq!(record.finish_round(), Some(HighScore::new("ada", 5)));
        assert_eq!(record.best().score, 5);
    }

    #[test]
    fn test_tie_does_not_replace_holder() {
        let mut record = ScoreRecord::new("ada", Some(HighScore::new("bob", 2)));
        record.increment();
        record.increment();
        assert_eq!(record.finish_round(), None);
        assert_eq!(record.best().name, "bob");
    }

    #[test]
    fn test_reset_round_keeps_best() {
        let mut record = ScoreRecord::new("ada", None);
        record.increment();
        record.finish_round();
        record.reset_round();

        assert_eq!(record.current(), 0);
        assert_eq!(record.best().score, 1);
    }

    #[test]
    fn test_merge_stored_only_raises() {
        let mut record = ScoreRecord::new("ada", Some(HighScore::new("ada", 4)));
        record.merge_stored(Some(HighScore::new("bob", 2)));
        assert_eq!(record.best(), &HighScore::new("ada", 4));

        record.merge_stored(Some(HighScore::new("bob", 9)));
        assert_eq!(record.best(), &HighScore::new("bob", 9));

        record.merge_stored(None);
        assert_eq!(record.best().score, 9);
    }
}
