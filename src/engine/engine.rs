//! Search-root wrapper: a position plus its move history.
//!
//! The engine is the entry point callers drive with FEN strings and
//! coordinate move strings. Incoming moves are resolved against the
//! generated legal-move list; a string that matches no legal move is a
//! reported no-op, never an applied guess.

use crate::board::chess_types::Color;
use crate::engine::history::History;
use crate::errors::{FenError, MoveParseError};
use crate::moves::packed_move::Move;
use crate::position::move_list::MoveList;
use crate::position::perft::{perft, perft_divide};
use crate::position::position::Position;
use crate::utils::long_algebraic::{matches_move, parse_move_string};

#[derive(Debug)]
pub struct Engine {
    position: Position,
    history: History,
}

impl Engine {
    pub fn new() -> Engine {
        Engine {
            position: Position::new_game(),
            history: History::new(),
        }
    }

    pub fn new_game(&mut self) {
        self.position = Position::new_game();
        self.history.clear();
    }

    /// Replace the current game with a parsed FEN position. On error the
    /// engine keeps its previous state untouched.
    pub fn set_from_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.position = Position::from_fen(fen)?;
        self.history.clear();
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn legal_moves(&mut self) -> MoveList {
        self.position.generate_legal_moves()
    }

    /// Apply a coordinate move string (`e2e4`, `e7e8q`). Returns `Ok(true)`
    /// when a matching legal move was applied, `Ok(false)` when the
    /// well-formed string matches no legal move.
    pub fn try_apply_move(&mut self, input: &str) -> Result<bool, MoveParseError> {
        let parsed = parse_move_string(input)?;

        let legal = self.position.generate_legal_moves();
        for &mv in legal.iter() {
            if matches_move(parsed, mv) {
                self.apply(mv);
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn apply(&mut self, mv: Move) {
        let undo = self.position.make_move(mv);
        self.history.push(mv, undo);
    }

    /// Take back the last applied move. A no-op returning `false` on an
    /// empty history.
    pub fn undo_move(&mut self) -> bool {
        match self.history.pop() {
            Some(entry) => {
                self.position.unmake_move(entry.mv, entry.undo);
                true
            }
            None => false,
        }
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn perft(&mut self, depth: u32) -> u64 {
        perft(&mut self.position, depth)
    }

    pub fn perft_divide(&mut self, depth: u32) -> Vec<(Move, u64)> {
        perft_divide(&mut self.position, depth)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
