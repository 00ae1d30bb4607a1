//! Boolean functions. They look only at argument truth and render no text.

use crate::interpreter::Atom;

use super::Arg;

/// `$and(...)`: true when every argument is true.
pub fn and(args: &[Arg]) -> Atom {
    Atom::boolean(args.iter().all(Arg::truth))
}

/// `$or(...)`: true when any argument is true.
pub fn or(args: &[Arg]) -> Atom {
    Atom::boolean(args.iter().any(Arg::truth))
}

/// `$not(x)`
pub fn not(args: &[Arg]) -> Atom {
    Atom::boolean(args.first().is_some_and(|a| !a.truth()))
}

/// `$xor(...)`: true when an odd number of arguments are true.
pub fn xor(args: &[Arg]) -> Atom {
    Atom::boolean(args.iter().filter(|a| a.truth()).count() % 2 == 1)
}
