use engine::{Direction, GameSession};
use tracing::info;

use crate::record::GameRecord;
use crate::store::GameHistory;

/// Binds one live [`GameSession`] to the [`GameHistory`].
///
/// The service forwards moves to the session and watches for the moment a
/// game becomes unwinnable; that transition produces exactly one
/// [`GameRecord`] which is handed to the history. Resetting starts a fresh
/// game without touching recorded history.
pub struct GameService {
    session: GameSession,
    history: GameHistory,
}

impl GameService {
    pub fn new(session: GameSession, history: GameHistory) -> Self {
        Self { session, history }
    }

    /// Applies a move and records the game if this move ended it.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        let was_over = self.session.is_game_over();
        let moved = self.session.make_move(direction);
        if self.session.is_game_over() && !was_over {
            let summary = self.session.summary();
            info!(
                "game finished: score {} best tile {} in {} moves",
                summary.score, summary.highest_tile, summary.moves
            );
            self.history
                .append(GameRecord::new(summary.score, summary.highest_tile, summary.moves));
        }
        moved
    }

    /// Starts a new game. Recorded history is left as-is.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryStorage;
    use engine::{GameView, TileSource};
    use std::sync::Arc;

    /// Always spawns a 2 in the first empty cell.
    struct FirstCellSource;

    impl TileSource for FirstCellSource {
        fn pick_cell(&mut self, _candidates: usize) -> usize {
            0
        }

        fn pick_value(&mut self) -> u32 {
            2
        }
    }

    /// A board one slide away from being unplayable: shifting row 0 right
    /// frees (0,0), and the spawned 2 there leaves no adjacent pair.
    fn near_terminal_session() -> GameSession {
        GameSession::from_snapshot(
            GameView {
                board: [
                    [4, 2, 4, 0],
                    [4, 8, 16, 2],
                    [2, 16, 8, 4],
                    [4, 2, 4, 16],
                ],
                score: 120,
                moves: 37,
                game_won: false,
                game_over: false,
            },
            Box::new(FirstCellSource),
        )
    }

    #[test]
    fn finishing_a_game_records_it_exactly_once() {
        let storage = Arc::new(MemoryStorage::default());
        let history = GameHistory::open(Box::new(Arc::clone(&storage)), None);
        let mut service = GameService::new(near_terminal_session(), history);

        assert!(service.make_move(Direction::Right));
        assert!(service.session().is_game_over());
        assert_eq!(service.history().total_games(), 1);

        let records = service.history().records();
        assert_eq!(records[0].score, 120);
        assert_eq!(records[0].highest_tile, 16);
        assert_eq!(records[0].moves, 38);

        // Swipes against a dead board do not record again.
        assert!(!service.make_move(Direction::Left));
        assert!(!service.make_move(Direction::Right));
        assert_eq!(service.history().total_games(), 1);
    }

    #[test]
    fn reset_starts_fresh_but_keeps_history() {
        let storage = Arc::new(MemoryStorage::default());
        let history = GameHistory::open(Box::new(Arc::clone(&storage)), None);
        let mut service = GameService::new(near_terminal_session(), history);

        service.make_move(Direction::Right);
        assert_eq!(service.history().total_games(), 1);

        service.reset();
        assert!(!service.session().is_game_over());
        assert_eq!(service.session().score(), 0);
        assert_eq!(service.session().moves(), 0);
        assert_eq!(service.history().total_games(), 1);
    }

    #[test]
    fn unfinished_games_are_never_recorded() {
        let storage = Arc::new(MemoryStorage::default());
        let history = GameHistory::open(Box::new(Arc::clone(&storage)), None);
        let mut service = GameService::new(
            GameSession::with_source(Box::new(FirstCellSource)),
            history,
        );

        assert!(service.make_move(Direction::Down));
        assert!(service.make_move(Direction::Right));
        assert_eq!(service.history().total_games(), 0);
    }
}
