//! High score leaderboard
//!
//! A fixed-capacity list of (name, score) pairs, best first, persisted as
//! JSON. The table is a value: recording a score yields a new table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NUMBER_OF_HIGHSCORES;
use crate::persistence::{self, PersistenceError};

/// Name and score of the synthesized entry used when no table exists yet
pub const DEFAULT_ENTRY_NAME: &str = "tester";
pub const DEFAULT_ENTRY_SCORE: u32 = 100;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
}

/// On-disk shape, validated into [`HighScores`]
#[derive(Deserialize)]
struct HighScoresDoc {
    capacity: usize,
    entries: Vec<HighScoreEntry>,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HighScoresDoc")]
pub struct HighScores {
    capacity: usize,
    entries: Vec<HighScoreEntry>,
}

impl TryFrom<HighScoresDoc> for HighScores {
    type Error = String;

    fn try_from(doc: HighScoresDoc) -> Result<Self, Self::Error> {
        if doc.capacity == 0 {
            return Err("capacity must be at least 1".into());
        }
        if doc.entries.len() > doc.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                doc.entries.len(),
                doc.capacity
            ));
        }
        if doc.entries.windows(2).any(|w| w[0].score < w[1].score) {
            return Err("entries are not sorted by descending score".into());
        }
        Ok(Self {
            capacity: doc.capacity,
            entries: doc.entries,
        })
    }
}

impl Default for HighScores {
    fn default() -> Self {
        Self::with_default_entry(MAX_NUMBER_OF_HIGHSCORES)
    }
}

impl HighScores {
    /// Create an empty leaderboard (capacity is at least 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// The table written when no high-score file exists
    pub fn with_default_entry(capacity: usize) -> Self {
        let mut table = Self::new(capacity);
        table.entries.push(HighScoreEntry {
            name: DEFAULT_ENTRY_NAME.to_string(),
            score: DEFAULT_ENTRY_SCORE,
        });
        table
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Rank (0-indexed) a score would take, or None if it doesn't make the table
    ///
    /// A score ties its way above an equal entry.
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        match self.entries.iter().position(|e| score >= e.score) {
            Some(i) => Some(i),
            None if self.entries.len() < self.capacity => Some(self.entries.len()),
            None => None,
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        self.rank_for(score).is_some()
    }

    /// New table with the score inserted at its rank; lower entries shift
    /// down and the last falls off when full. None if it doesn't qualify.
    pub fn with_score(&self, name: &str, score: u32) -> Option<(Self, usize)> {
        let rank = self.rank_for(score)?;
        let mut entries = self.entries.clone();
        entries.insert(
            rank,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        entries.truncate(self.capacity);
        Some((
            Self {
                capacity: self.capacity,
                entries,
            },
            rank,
        ))
    }

    /// Same table with a new capacity; entries past it are dropped
    pub fn recapped(mut self, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        if self.entries.len() > capacity {
            log::warn!(
                "Dropping {} high scores beyond capacity {}",
                self.entries.len() - capacity,
                capacity
            );
            self.entries.truncate(capacity);
        }
        self.capacity = capacity;
        self
    }

    /// Leaderboard text as shown on the result screen
    pub fn scoreboard(&self) -> String {
        let mut board = String::from("Highscores:\n\n");
        for entry in &self.entries {
            board.push_str(&format!("{}-{}\n", entry.name, entry.score));
        }
        board
    }

    /// Read the table from disk
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        persistence::load_json(path)
    }

    /// Read the table, or create and write the default table if the file
    /// is missing or unreadable
    pub fn load_or_create(path: &Path, capacity: usize) -> Self {
        match Self::load(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.len());
                scores.recapped(capacity)
            }
            Err(err) => {
                if err.is_not_found() {
                    log::info!("No high scores found, starting fresh");
                } else {
                    log::warn!("Discarding unreadable high scores: {}", err);
                }
                let scores = Self::with_default_entry(capacity);
                if let Err(err) = scores.save(path) {
                    log::warn!("Could not write default high scores: {}", err);
                }
                scores
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        persistence::save_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn table_stays_sorted_and_capped(
            capacity in 1..8usize,
            scores in prop::collection::vec(0..1000u32, 0..30),
        ) {
            let mut table = HighScores::new(capacity);
            for score in scores {
                let qualifies = table.qualifies(score);
                match table.with_score("p", score) {
                    Some((next, rank)) => {
                        prop_assert!(qualifies);
                        prop_assert_eq!(next.entries()[rank].score, score);
                        table = next;
                    }
                    None => prop_assert!(!qualifies),
                }
                prop_assert!(table.len() <= table.capacity());
                prop_assert!(table.entries().windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
