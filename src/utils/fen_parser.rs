//! FEN-to-Position parser.
//!
//! Accepts the 2-field minimal form through the full 6-field form; missing
//! trailing fields default to no castling, no en passant, zero clocks. The
//! position is built fresh and returned only when every present field parsed
//! and the result passed structural validation, so callers never observe a
//! partially-applied parse.

use crate::board::chess_types::{
    square_at, CastlingRights, Color, File, Piece, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE, HALFMOVE_CAP,
};
use crate::errors::FenError;
use crate::position::position::Position;

pub fn parse_fen(fen: &str) -> Result<Position, FenError> {
    let mut parts = fen.split_whitespace();

    let placement = parts.next().ok_or(FenError::MissingPlacement)?;
    let side_part = parts.next().ok_or(FenError::MissingSideToMove)?;

    let mut position = Position::default();

    parse_placement(placement, &mut position)?;
    position.set_side_to_move(parse_side_to_move(side_part)?);

    if let Some(castling_part) = parts.next() {
        position.set_castling_rights(parse_castling(castling_part)?);
    }
    if let Some(en_passant_part) = parts.next() {
        position.set_en_passant_file(parse_en_passant(en_passant_part)?);
    }
    if let Some(halfmove_part) = parts.next() {
        let clock: u16 = halfmove_part
            .parse()
            .map_err(|_| FenError::BadClock(halfmove_part.to_owned()))?;
        position.set_halfmove_clock(clock.min(HALFMOVE_CAP as u16) as u8);
    }
    if let Some(fullmove_part) = parts.next() {
        let number: u16 = fullmove_part
            .parse()
            .map_err(|_| FenError::BadClock(fullmove_part.to_owned()))?;
        position.set_fullmove_number(number);
    }

    if parts.next().is_some() {
        return Err(FenError::TrailingInput);
    }

    position.validate()?;
    Ok(position)
}

fn parse_placement(placement: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BadPlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    for (fen_rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let rank = 7 - fen_rank_index as u8;
        let mut file: u8 = 0;

        for ch in rank_str.chars() {
            if let Some(step) = ch.to_digit(10) {
                if !(1..=8).contains(&step) {
                    return Err(FenError::BadPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += step as u8;
                if file > 8 {
                    return Err(FenError::BadPlacement(format!(
                        "rank '{rank_str}' has more than 8 files"
                    )));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| FenError::BadPlacement(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(FenError::BadPlacement(format!(
                    "rank '{rank_str}' has more than 8 files"
                )));
            }

            position.set_piece(square_at(file, rank), piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::BadPlacement(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::BadSideToMove(field.to_owned())),
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in field.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(FenError::BadCastling(ch)),
        }
    }

    Ok(rights)
}

/// Only the file survives; the rank is implied by the side to move.
fn parse_en_passant(field: &str) -> Result<Option<File>, FenError> {
    if field == "-" {
        return Ok(None);
    }

    let bytes = field.as_bytes();
    if bytes.len() != 2
        || !(b'a'..=b'h').contains(&bytes[0])
        || !(b'1'..=b'8').contains(&bytes[1])
    {
        return Err(FenError::BadEnPassant(field.to_owned()));
    }

    Ok(Some(bytes[0] - b'a'))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::board::chess_rules::STARTING_POSITION_FEN;
    use crate::board::chess_types::{Color, Piece, PieceKind, CASTLE_ALL};
    use crate::errors::FenError;

    #[test]
    fn parses_the_starting_position() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.castling_rights(), CASTLE_ALL);
        assert_eq!(position.en_passant_file(), None);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);

        assert_eq!(
            position.piece_on(4),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            position.piece_on(60),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(position.occupancy_all().count_ones(), 32);
    }

    #[test]
    fn minimal_two_field_form_defaults_the_rest() {
        let position =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").expect("should parse");

        assert_eq!(position.castling_rights(), 0);
        assert_eq!(position.en_passant_file(), None);
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_square_collapses_to_its_file() {
        let position = parse_fen("rnbqkbnr/pppp1ppp/8/4p3/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 2")
            .expect("should parse");
        assert_eq!(position.en_passant_file(), Some(4));
    }

    #[test]
    fn malformed_fields_are_typed_errors() {
        assert_eq!(parse_fen(""), Err(FenError::MissingPlacement));
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenError::MissingSideToMove)
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x"),
            Err(FenError::BadSideToMove("x".to_owned()))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1"),
            Err(FenError::BadCastling('x'))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1"),
            Err(FenError::BadEnPassant("e9".to_owned()))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            Err(FenError::BadClock("x".to_owned()))
        );
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra"),
            Err(FenError::TrailingInput)
        );

        assert!(matches!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::BadPlacement(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::BadPlacement(_))
        ));
        assert!(matches!(
            parse_fen("rnbqkbnr/ppppppp!/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenError::BadPlacement(_))
        ));
    }
}
