use migrate_model::NumericCoercionFailure;

/// Lenient integer parse for legacy order numbers.
///
/// Leading whitespace and a sign are accepted, then the leading run of
/// digits is read and anything after it is ignored (`"1203/A"` is `1203`).
/// No digits, or a value outside `i64`, is a failure carrying the input.
pub fn parse_integer(raw: &str) -> Result<i64, NumericCoercionFailure> {
    let text = raw.trim_start();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits_len = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return Err(NumericCoercionFailure::new(raw));
    }

    let digits = &unsigned[..digits_len];
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    parsed.map_err(|_| NumericCoercionFailure::new(raw))
}
