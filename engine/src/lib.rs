//! Core logic for a 4x4 merge-to-double sliding-tile game.
//!
//! The crate is split into the pure board transform ([`collapse_line`] and
//! [`Board::shift`]) and the stateful [`GameSession`] that owns the live
//! board, score and status flags. Nothing here renders, reads input or
//! persists anything; callers drive the session with a [`Direction`] and
//! read its published state back.

pub mod board;
pub mod game;
pub mod spawn;

pub use board::{collapse_line, Board, Direction, Grid, LineResult, ShiftOutcome, BOARD_SIZE};
pub use game::{GameSession, GameSummary, GameView, WIN_TILE};
pub use spawn::{RandomTileSource, TileSource};
