//! Text to integer coercion used by arithmetic and comparison functions.
//!
//! Coercion never fails: text with no usable digits is `0`.

/// Coerce text to an integer.
///
/// A direct parse of the trimmed text is tried first. Otherwise one leading
/// sign is taken off, leading spaces and punctuation are skipped, and the
/// longest leading run of digits is read. Because a second `-` is skipped as
/// noise, `--5` is `-5`, not `5`.
pub fn coerce(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = leading_digits(rest.trim_start_matches(is_noise));
    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}

/// Coerce text that came from a quoted literal.
///
/// Quoted text is never negated: a leading `-` is skipped like any other
/// punctuation.
pub fn coerce_unsigned(text: &str) -> i64 {
    leading_digits(text.trim_start_matches(is_noise))
}

/// Coerce text to its value modulo 2^32.
///
/// Digits are read the same way as [`coerce`], or [`coerce_unsigned`] when
/// `signed` is false, but the value is reduced while reading, so inputs wider
/// than 64 bits keep their low 32 bits instead of saturating.
pub fn coerce_wrapping(text: &str, signed: bool) -> u32 {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) if signed => (true, rest),
        _ => (false, trimmed),
    };
    let magnitude = rest
        .trim_start_matches(is_noise)
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0u32, |acc, d| acc.wrapping_mul(10).wrapping_add(d));
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

fn is_noise(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

/// Read the leading ASCII digits, saturating on overflow.
fn leading_digits(text: &str) -> i64 {
    text.chars()
        .map_while(|c| c.to_digit(10))
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(coerce("42"), 42);
        assert_eq!(coerce("-17"), -17);
        assert_eq!(coerce("+8"), 8);
        assert_eq!(coerce("  12  "), 12);
    }

    #[test]
    fn reads_leading_digit_run() {
        assert_eq!(coerce("12abc"), 12);
        assert_eq!(coerce("3.7"), 3);
        assert_eq!(coerce("7/12"), 7);
        assert_eq!(coerce("-5 apples"), -5);
    }

    #[test]
    fn skips_punctuation_noise() {
        assert_eq!(coerce("(5)"), 5);
        assert_eq!(coerce("# 9"), 9);
    }

    #[test]
    fn double_negative_stays_negative() {
        assert_eq!(coerce("--5"), -5);
    }

    #[test]
    fn non_numeric_is_zero() {
        assert_eq!(coerce(""), 0);
        assert_eq!(coerce("abc"), 0);
        assert_eq!(coerce("-"), 0);
        assert_eq!(coerce("x12"), 0);
    }

    #[test]
    fn saturates_on_overflow() {
        assert_eq!(coerce("99999999999999999999x"), i64::MAX);
        assert_eq!(coerce("-99999999999999999999x"), -i64::MAX);
    }

    #[test]
    fn wrapping_keeps_low_bits() {
        assert_eq!(coerce_wrapping("99999999999999999999", true), 0x630F_FFFF);
        assert_eq!(coerce_wrapping("-99999999999999999999", true), 0x9CF0_0001);
        assert_eq!(coerce_wrapping("-1", true), u32::MAX);
        assert_eq!(coerce_wrapping("-1", false), 1);
        assert_eq!(coerce_wrapping("+255", true), 255);
        assert_eq!(coerce_wrapping("--5", true), 5u32.wrapping_neg());
        assert_eq!(coerce_wrapping("4294967296", true), 0);
        assert_eq!(coerce_wrapping("abc", true), 0);
    }

    #[test]
    fn quoted_text_is_never_negated() {
        assert_eq!(coerce_unsigned("-5"), 5);
        assert_eq!(coerce_unsigned("12"), 12);
        assert_eq!(coerce_unsigned("abc"), 0);
    }
}
