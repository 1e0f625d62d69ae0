//! Small text helpers shared by the parsers.

/// Reads the integer at the start of a cell, ignoring surrounding
/// whitespace and any trailing text ("3 days" is 3, "1st" is 1).
///
/// A fractional part is truncated. Returns `None` when the cell does not
/// start with a digit (after an optional sign).
pub fn parse_leading_int(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    let (negative, digits) = match cell.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cell.strip_prefix('+').unwrap_or(cell)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
