//! Conversions between square indices and coordinate notation (`e4`).

use crate::board::chess_types::{file_of, rank_of, Square};
use crate::errors::MoveParseError;

#[inline]
pub fn algebraic_to_square(input: &str) -> Result<Square, MoveParseError> {
    let bytes = input.as_bytes();
    if bytes.len() != 2 {
        return Err(MoveParseError::BadSquare(input.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(MoveParseError::BadSquare(input.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64);
    format!(
        "{}{}",
        char::from(b'a' + file_of(square)),
        char::from(b'1' + rank_of(square))
    )
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::errors::MoveParseError;

    #[test]
    fn round_trip_corner_squares() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
        assert_eq!(square_to_algebraic(28), "e4");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        for bad in ["i1", "a9", "a", "e45", "4e"] {
            assert_eq!(
                algebraic_to_square(bad),
                Err(MoveParseError::BadSquare(bad.to_owned()))
            );
        }
    }
}
