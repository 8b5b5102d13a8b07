use crate::*;

/// Parses a raw selection like `A1` or `j10` into a zero-based `(row, col)`.
///
/// The accepted shape is one row letter `A`-`J` (either case) followed by a
/// column number `1`-`10` with no leading zero and nothing trailing. The check
/// is purely lexical, against the largest supported grid: a well-formed
/// selection can still lie outside a smaller live grid, and rejecting those is
/// the caller's bounds check (see [`Game::select`]), not this parser's.
pub fn parse_selection(raw: &str) -> Result<Coord2> {
    let mut chars = raw.chars();
    let row_letter = chars.next().ok_or(GameError::InvalidSelection)?;
    if !row_letter.is_ascii_alphabetic() {
        return Err(GameError::InvalidSelection);
    }

    let row = row_letter.to_ascii_uppercase() as u8 - b'A';
    if row >= MAX_GRID_SIZE {
        return Err(GameError::InvalidSelection);
    }

    let column_digits = chars.as_str();
    if column_digits.starts_with('0') || !column_digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidSelection);
    }
    let column: Coord = column_digits
        .parse()
        .map_err(|_| GameError::InvalidSelection)?;
    if column < 1 || column > MAX_GRID_SIZE {
        return Err(GameError::InvalidSelection);
    }

    Ok((row, column - 1))
}
