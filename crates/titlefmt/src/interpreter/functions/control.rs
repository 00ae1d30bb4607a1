//! Control-flow functions.
//!
//! These pick one argument and return its index. The caller passes that
//! argument's atom through untouched, so `$if(%a%,x)` is as true as literal
//! `x` (false), while `$if(%a%,%b%)` carries `%b%`'s truth. `None` means no
//! branch was taken and the call yields nothing.

use crate::interpreter::error::Marker;

use super::Arg;

fn invalid(function: &'static str, args: &[Arg]) -> Marker {
    Marker::InvalidSyntax {
        function,
        arity: args.len(),
    }
}

/// `$if(cond,then)`, `$if(cond,then,else)`
pub fn if_(args: &[Arg]) -> Result<Option<usize>, Marker> {
    match args {
        [cond, _] => Ok(cond.truth().then_some(1)),
        [cond, _, _] => Ok(Some(if cond.truth() { 1 } else { 2 })),
        _ => Err(invalid("IF", args)),
    }
}

/// `$if2(a,else)`: `a` when true, otherwise `else`.
pub fn if2(args: &[Arg]) -> Result<Option<usize>, Marker> {
    match args {
        [a, _] => Ok(Some(if a.truth() { 0 } else { 1 })),
        _ => Err(invalid("IF2", args)),
    }
}

/// `$if3(a1,...,aN,else)`: the first true `a`, otherwise `else`.
///
/// With a single argument there is no else branch and a false argument
/// yields nothing.
pub fn if3(args: &[Arg]) -> Option<usize> {
    match args {
        [] => None,
        [only] => only.truth().then_some(0),
        [candidates @ .., _] => Some(
            candidates
                .iter()
                .position(Arg::truth)
                .unwrap_or(candidates.len()),
        ),
    }
}

/// `$ifequal(n1,n2,then,else)`: numeric equality.
pub fn ifequal(args: &[Arg]) -> Result<Option<usize>, Marker> {
    match args {
        [a, b, _, _] => Ok(Some(pick(a.number() == b.number()))),
        _ => Err(invalid("IFEQUAL", args)),
    }
}

/// `$ifgreater(n1,n2,then,else)`: `n1 > n2`.
pub fn ifgreater(args: &[Arg]) -> Result<Option<usize>, Marker> {
    match args {
        [a, b, _, _] => Ok(Some(pick(a.number() > b.number()))),
        _ => Err(invalid("IFGREATER", args)),
    }
}

/// `$iflonger(s,n,then,else)`: `s` has more than `n` characters.
pub fn iflonger(args: &[Arg]) -> Result<Option<usize>, Marker> {
    match args {
        [s, n, _, _] => {
            let longer = i64::try_from(s.text().chars().count()).unwrap_or(i64::MAX) > n.number();
            Ok(Some(pick(longer)))
        }
        _ => Err(invalid("IFLONGER", args)),
    }
}

/// `$select(n,a1,...,aN)`: the `n`th of the following arguments, 1-based.
pub fn select(args: &[Arg]) -> Option<usize> {
    let (index, options) = args.split_first()?;
    usize::try_from(index.number())
        .ok()
        .filter(|n| (1..=options.len()).contains(n))
}

/// Index of the then-branch or else-branch of a four-argument comparison.
fn pick(condition: bool) -> usize {
    if condition { 2 } else { 3 }
}
