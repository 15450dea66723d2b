use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Two records closer together than this are treated as the same game when
/// merging local and mirrored history.
pub const DUPLICATE_WINDOW_SECS: i64 = 60;

/// Immutable summary of one finished game.
///
/// Created exactly once, when a game reaches its terminal state; never
/// mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub id: Uuid,
    pub score: u32,
    pub highest_tile: u32,
    pub moves: u32,
    pub date: DateTime<Utc>,
}

impl GameRecord {
    /// Builds a fresh record stamped with a new id and the current time.
    pub fn new(score: u32, highest_tile: u32, moves: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            score,
            highest_tile,
            moves,
            date: Utc::now(),
        }
    }

    /// Rebuilds a record that already exists elsewhere (on disk or in the
    /// remote mirror), keeping its original identity and timestamp.
    pub fn with_parts(
        id: Uuid,
        score: u32,
        highest_tile: u32,
        moves: u32,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            score,
            highest_tile,
            moves,
            date,
        }
    }

    /// Duplicate test used by the merge: same score, same highest tile, and
    /// timestamps within [`DUPLICATE_WINDOW_SECS`] of each other.
    pub fn is_duplicate_of(&self, other: &GameRecord) -> bool {
        self.score == other.score
            && self.highest_tile == other.highest_tile
            && (self.date - other.date).num_seconds().abs() < DUPLICATE_WINDOW_SECS
    }
}
