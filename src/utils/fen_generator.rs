//! Position-to-FEN serializer.
//!
//! Emits the full 6-field form so that `parse_fen(generate_fen(p))`
//! reproduces `p` exactly for any valid position.

use crate::board::chess_rules::{BLACK_EN_PASSANT_RANK, WHITE_EN_PASSANT_RANK};
use crate::board::chess_types::{
    square_at, CastlingRights, Color, File, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::position::position::Position;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(position: &Position) -> String {
    let placement = generate_placement_field(position);
    let side_to_move = match position.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(position.castling_rights());
    let en_passant = generate_en_passant_field(position.en_passant_file(), position.side_to_move());

    format!(
        "{} {} {} {} {} {}",
        placement,
        side_to_move,
        castling,
        en_passant,
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

fn generate_placement_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;

        for file in 0..8u8 {
            match position.piece_on(square_at(file, rank)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece.to_fen_char());
                }
                None => empty_run += 1,
            }
        }

        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    if rights & CASTLE_WHITE_KINGSIDE != 0 {
        out.push('K');
    }
    if rights & CASTLE_WHITE_QUEENSIDE != 0 {
        out.push('Q');
    }
    if rights & CASTLE_BLACK_KINGSIDE != 0 {
        out.push('k');
    }
    if rights & CASTLE_BLACK_QUEENSIDE != 0 {
        out.push('q');
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

/// The stored file expands back to a target square on the capturing side's
/// en-passant rank.
fn generate_en_passant_field(file: Option<File>, side_to_move: Color) -> String {
    let Some(file) = file else {
        return "-".to_owned();
    };

    let rank = match side_to_move {
        Color::White => WHITE_EN_PASSANT_RANK,
        Color::Black => BLACK_EN_PASSANT_RANK,
    };

    square_to_algebraic(square_at(file, rank))
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::board::chess_rules::STARTING_POSITION_FEN;
    use crate::position::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn round_trips_the_starting_position() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(generate_fen(&position), STARTING_POSITION_FEN);
    }

    #[test]
    fn round_trips_castling_en_passant_and_clocks() {
        for fen in [
            "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6",
            "rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2R w K - 99 50",
        ] {
            let position = parse_fen(fen).expect("FEN should parse");
            assert_eq!(generate_fen(&position), fen, "round trip failed for {fen}");

            let reparsed = parse_fen(&generate_fen(&position)).expect("generated FEN should parse");
            assert_eq!(reparsed, position);
        }
    }

    #[test]
    fn fen_survives_a_make_unmake_pair() {
        let mut position = Position::new_game();
        let before = position.to_fen();

        let legal = position.generate_legal_moves();
        let mv = legal.as_slice()[0];
        let undo = position.make_move(mv);
        position.unmake_move(mv, undo);

        assert_eq!(position.to_fen(), before);
    }
}
