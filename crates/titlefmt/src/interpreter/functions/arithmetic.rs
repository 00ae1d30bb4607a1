//! Integer arithmetic over coerced arguments.
//!
//! Results are present and true. All arithmetic wraps on overflow.

use tracing::warn;

use crate::interpreter::Atom;

use super::Arg;

fn number(n: i64) -> Atom {
    Atom::found(n.to_string())
}

/// Left fold over the coerced arguments; absent when there are none.
fn fold(args: &[Arg], f: impl Fn(i64, i64) -> i64) -> Atom {
    let mut numbers = args.iter().map(Arg::number);
    match numbers.next() {
        Some(first) => number(numbers.fold(first, f)),
        None => Atom::absent(),
    }
}

/// `$add(a,...)`; `$add()` is `0`.
pub fn add(args: &[Arg]) -> Atom {
    number(args.iter().map(Arg::number).fold(0, i64::wrapping_add))
}

/// `$sub(a,b,...)`
pub fn sub(args: &[Arg]) -> Atom {
    fold(args, i64::wrapping_sub)
}

/// `$mul(a,...)`; `$mul()` is `1`.
pub fn mul(args: &[Arg]) -> Atom {
    number(args.iter().map(Arg::number).fold(1, i64::wrapping_mul))
}

/// `$div(a,b,...)`: truncating division. Dividing by zero leaves the
/// dividend unchanged.
pub fn div(args: &[Arg]) -> Atom {
    fold(args, |a, b| a.checked_div(b).unwrap_or(a))
}

/// `$mod(a,b,...)`: remainder. A zero divisor leaves the dividend unchanged.
pub fn modulo(args: &[Arg]) -> Atom {
    fold(args, |a, b| a.checked_rem(b).unwrap_or(a))
}

/// `$min(a,...)`
pub fn min(args: &[Arg]) -> Atom {
    fold(args, i64::min)
}

/// `$max(a,...)`
pub fn max(args: &[Arg]) -> Atom {
    fold(args, i64::max)
}

/// `$greater(a,b)`: empty text, true when `a > b`.
pub fn greater(args: &[Arg]) -> Atom {
    match args {
        [a, b] => Atom::boolean(a.number() > b.number()),
        _ => Atom::absent(),
    }
}

/// `$muldiv(a,b,c)`: `a * b / c` rounded to the nearest integer, halves
/// toward zero.
///
/// The halfway rule follows the documented `$muldiv(5,3,2)` = `7`, not the
/// `(a*b + c/2) / c` formula, which would give `8`. So `$muldiv(1,1,2)` is `0`.
///
/// A zero divisor yields `-1`, as does a result outside the 64-bit range.
pub fn muldiv(args: &[Arg]) -> Atom {
    let [a, b, c] = args else {
        return Atom::absent();
    };
    number(muldiv_value(a.number(), b.number(), c.number()))
}

fn muldiv_value(a: i64, b: i64, c: i64) -> i64 {
    let product = i128::from(a) * i128::from(b);
    let divisor = i128::from(c);
    let Some(quotient) = product.checked_div(divisor) else {
        return -1;
    };
    let remainder = product - quotient * divisor;
    let rounded = if 2 * remainder.abs() > divisor.abs() {
        quotient + product.signum() * divisor.signum()
    } else {
        quotient
    };
    i64::try_from(rounded).unwrap_or(-1)
}

/// `$rand()`: a random non-negative number.
pub fn rand() -> Atom {
    let value = getrandom::u32().unwrap_or_else(|error| {
        warn!(%error, "random source unavailable");
        0
    });
    number(i64::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn muldiv_rounds_to_nearest() {
        assert_eq!(muldiv_value(5, 3, 2), 7);
        assert_eq!(muldiv_value(16, 1, 3), 5);
        assert_eq!(muldiv_value(17, 1, 3), 6);
        assert_eq!(muldiv_value(-17, 1, 3), -6);
        assert_eq!(muldiv_value(17, 1, -3), -6);
        assert_eq!(muldiv_value(-5, 3, 2), -7);
    }

    #[test]
    fn muldiv_zero_divisor_is_minus_one() {
        assert_eq!(muldiv_value(128, 5, 0), -1);
    }

    #[test]
    fn muldiv_out_of_range_is_minus_one() {
        assert_eq!(muldiv_value(i64::MAX, i64::MAX, 1), -1);
    }
}
