//! Path functions. `/`, `\` and `|` all separate components.

use crate::interpreter::Atom;

use super::{Arg, map_text};

const SEPARATORS: [char; 3] = ['/', '\\', '|'];

fn last_component(path: &str) -> &str {
    path.rsplit(SEPARATORS).next().unwrap_or(path)
}

/// The extension dot of a file name, if any. A leading dot does not count.
fn extension_dot(name: &str) -> Option<usize> {
    name.rfind('.').filter(|&i| i > 0)
}

/// `$directory(path)`, `$directory(path,n)`: the name of the directory `n`
/// levels above the file, 1 by default.
pub fn directory(args: &[Arg]) -> Atom {
    let levels = args.get(1).map_or(1, Arg::count);
    map_text(&args[0], |t| {
        let components: Vec<&str> = t.split(SEPARATORS).collect();
        (components.len() - 1)
            .checked_sub(levels)
            .filter(|_| levels > 0)
            .map_or_else(String::new, |i| components[i].to_string())
    })
}

/// `$directory_path(path)`: everything before the last separator.
pub fn directory_path(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| {
        t.rfind(SEPARATORS)
            .map_or_else(String::new, |i| t[..i].to_string())
    })
}

/// `$filename(path)`: the file name without its extension.
pub fn filename(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| {
        let name = last_component(t);
        extension_dot(name).map_or(name, |i| &name[..i]).to_string()
    })
}

/// `$ext(path)`: the extension without its dot.
pub fn ext(args: &[Arg]) -> Atom {
    map_text(&args[0], |t| {
        let name = last_component(t);
        extension_dot(name).map_or_else(String::new, |i| name[i + 1..].to_string())
    })
}
