//! Packed 16-bit move encoding.
//!
//! Layout: `from` in bits 0-5, `to` in bits 6-11, flag in bits 12-15. A move
//! is meaningful only against the position it was generated from; flags like
//! castling or en-passant carry no square information of their own.

use std::fmt;

use crate::board::chess_types::{file_of, rank_of, PieceKind, Square};

const SQUARE_MASK: u16 = 0x3F;
const TO_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;
const FLAG_MASK: u16 = 0xF;

/// Special-move discriminator stored in the high 4 bits of a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveFlag {
    Usual = 0,
    PromotionQueen = 1,
    PromotionRook = 2,
    PromotionBishop = 3,
    PromotionKnight = 4,
    CastlingKing = 5,
    CastlingQueen = 6,
    EnPassant = 7,
    DoublePawnPush = 8,
}

impl MoveFlag {
    #[inline]
    fn from_bits(bits: u16) -> MoveFlag {
        match bits {
            0 => MoveFlag::Usual,
            1 => MoveFlag::PromotionQueen,
            2 => MoveFlag::PromotionRook,
            3 => MoveFlag::PromotionBishop,
            4 => MoveFlag::PromotionKnight,
            5 => MoveFlag::CastlingKing,
            6 => MoveFlag::CastlingQueen,
            7 => MoveFlag::EnPassant,
            _ => MoveFlag::DoublePawnPush,
        }
    }

    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromotionQueen => Some(PieceKind::Queen),
            MoveFlag::PromotionRook => Some(PieceKind::Rook),
            MoveFlag::PromotionBishop => Some(PieceKind::Bishop),
            MoveFlag::PromotionKnight => Some(PieceKind::Knight),
            _ => None,
        }
    }

    pub const PROMOTIONS: [MoveFlag; 4] = [
        MoveFlag::PromotionQueen,
        MoveFlag::PromotionRook,
        MoveFlag::PromotionBishop,
        MoveFlag::PromotionKnight,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Move {
        Move(((flag as u16) << FLAG_SHIFT) | ((to as u16) << TO_SHIFT) | from as u16)
    }

    #[inline]
    pub const fn from(self) -> Square {
        (self.0 & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn flag(self) -> MoveFlag {
        MoveFlag::from_bits((self.0 >> FLAG_SHIFT) & FLAG_MASK)
    }

    #[inline]
    pub fn promotion_kind(self) -> Option<PieceKind> {
        self.flag().promotion_kind()
    }
}

impl fmt::Display for Move {
    /// Coordinate notation: `e2e4`, with a trailing piece letter for
    /// promotions (`e7e8q`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let from = self.from();
        let to = self.to();

        write!(
            f,
            "{}{}{}{}",
            char::from(b'a' + file_of(from)),
            char::from(b'1' + rank_of(from)),
            char::from(b'a' + file_of(to)),
            char::from(b'1' + rank_of(to)),
        )?;

        match self.promotion_kind() {
            Some(PieceKind::Queen) => write!(f, "q"),
            Some(PieceKind::Rook) => write!(f, "r"),
            Some(PieceKind::Bishop) => write!(f, "b"),
            Some(PieceKind::Knight) => write!(f, "n"),
            _ => Ok(()),
        }
    }
}
