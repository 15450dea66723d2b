use serde::{Deserialize, Serialize};

use crate::board::{Board, Direction, Grid};
use crate::spawn::{RandomTileSource, TileSource};

/// Reaching a tile of this value marks the game as won. Play continues
/// afterwards; winning and losing are independent.
pub const WIN_TILE: u32 = 2048;

/// Number of tiles spawned on a fresh or reset board.
const INITIAL_TILES: usize = 2;

/// Serializable snapshot of the live game for presentation layers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameView {
    pub board: Grid,
    pub score: u32,
    pub moves: u32,
    pub game_won: bool,
    pub game_over: bool,
}

/// Final numbers of a finished (or in-progress) game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub highest_tile: u32,
    pub moves: u32,
}

/// A single live game: the board plus score, move counter and status flags.
///
/// All mutation goes through [`GameSession::make_move`] and
/// [`GameSession::reset`]; a move is applied atomically with respect to the
/// caller.
pub struct GameSession {
    board: Board,
    score: u32,
    moves: u32,
    game_won: bool,
    game_over: bool,
    tiles: Box<dyn TileSource + Send>,
}

impl GameSession {
    /// Creates a session with the default RNG-backed tile source.
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomTileSource))
    }

    /// Creates a session spawning tiles from the given source.
    pub fn with_source(tiles: Box<dyn TileSource + Send>) -> Self {
        let mut session = Self {
            board: Board::new(),
            score: 0,
            moves: 0,
            game_won: false,
            game_over: false,
            tiles,
        };
        for _ in 0..INITIAL_TILES {
            session.spawn_tile();
        }
        session
    }

    /// Restores a session from a previously taken snapshot, e.g. to resume
    /// an interrupted game. No tiles are spawned.
    pub fn from_snapshot(view: GameView, tiles: Box<dyn TileSource + Send>) -> Self {
        Self {
            board: Board::from(view.board),
            score: view.score,
            moves: view.moves,
            game_won: view.game_won,
            game_over: view.game_over,
            tiles,
        }
    }

    /// Clears the board, counters and flags and spawns the two starting
    /// tiles. The tile source is kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.score = 0;
        self.moves = 0;
        self.game_won = false;
        self.game_over = false;
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
    }

    /// Processes a move in the given direction. Returns true if the board
    /// changed.
    ///
    /// A move that shifts nothing is a complete no-op: no tile spawns, the
    /// move counter stays put and the status flags are not re-evaluated.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        let outcome = self.board.shift(direction);
        if outcome.moved {
            self.moves += 1;
            self.score += outcome.points;
            self.spawn_tile();
            self.update_status();
        }
        outcome.moved
    }

    fn spawn_tile(&mut self) {
        let empties = self.board.empty_cells();
        if empties.is_empty() {
            return;
        }
        let (row, col) = empties[self.tiles.pick_cell(empties.len())];
        let value = self.tiles.pick_value();
        self.board.set(row, col, value);
    }

    fn update_status(&mut self) {
        if !self.game_won && self.board.max_tile() >= WIN_TILE {
            self.game_won = true;
            log::info!("reached the {} tile after {} moves", WIN_TILE, self.moves);
        }
        if !self.game_over && self.board.is_full() && !self.board.has_adjacent_pair() {
            self.game_over = true;
            log::info!(
                "game over: score {} with best tile {} in {} moves",
                self.score,
                self.board.max_tile(),
                self.moves
            );
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }

    /// Snapshot of the published state for a frontend to render.
    pub fn snapshot(&self) -> GameView {
        GameView {
            board: *self.board.grid(),
            score: self.score,
            moves: self.moves,
            game_won: self.game_won,
            game_over: self.game_over,
        }
    }

    /// The numbers a finished game is recorded under.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            highest_tile: self.board.max_tile(),
            moves: self.moves,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
