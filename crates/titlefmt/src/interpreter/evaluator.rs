//! Template evaluation engine.
//!
//! Walks a parsed [`Template`] against a track, producing an [`Atom`]. Each
//! sequence tracks an evaluation count: the number of variables, calls and
//! nested conditionals in it that produced a value. A conditional block whose
//! body has a count of zero is suppressed entirely.

use tracing::debug;

use crate::interpreter::functions::{self, Arg, Source};
use crate::interpreter::resolver::resolve;
use crate::interpreter::{Atom, EvalContext};
use crate::parser::ast::{Segment, Template};

/// A sequence's combined atom and its evaluation count.
struct Evaluated {
    atom: Atom,
    count: usize,
}

/// Evaluate a template, producing its combined atom.
///
/// - Literal and quoted text is present and false
/// - Variables and calls yield whatever the resolver or function returns
/// - Conditional blocks yield their body, or nothing when suppressed
///
/// A template with a single segment yields that segment's atom unchanged, so
/// a lone `%missing%` stays absent. Longer templates concatenate the values
/// that were produced and are true if any segment is. The empty template is
/// an empty, false value.
pub fn eval_template(template: &Template, ctx: &mut EvalContext<'_>) -> Atom {
    eval_sequence(template, ctx).atom
}

fn eval_sequence(template: &Template, ctx: &mut EvalContext<'_>) -> Evaluated {
    if let [segment] = template.segments.as_slice() {
        let (atom, counted) = eval_segment(segment, ctx);
        return Evaluated {
            atom,
            count: usize::from(counted),
        };
    }

    let mut count = 0;
    let mut value: Option<String> = None;
    let mut truth = false;
    for segment in &template.segments {
        let (atom, counted) = eval_segment(segment, ctx);
        count += usize::from(counted);
        truth |= atom.truth;
        if let Some(text) = atom.value {
            value.get_or_insert_default().push_str(&text);
        }
    }

    let atom = if template.is_empty() {
        Atom::literal("")
    } else {
        Atom { value, truth }
    };
    Evaluated { atom, count }
}

/// Evaluate one segment. The flag says whether it counts as an evaluation.
fn eval_segment(segment: &Segment, ctx: &mut EvalContext<'_>) -> (Atom, bool) {
    match segment {
        Segment::Literal(text) | Segment::Quoted(text) => (Atom::literal(text.as_str()), false),
        Segment::Variable(name) => {
            let atom = resolve(ctx.track(), name, ctx.options());
            let counted = atom.is_present();
            (atom, counted)
        }
        Segment::Call { name, args, .. } => {
            let atom = eval_call(name, args, ctx);
            let counted = atom.is_present();
            (atom, counted)
        }
        Segment::Conditional(body) => {
            let inner = eval_sequence(body, ctx);
            if inner.count == 0 {
                return (Atom::absent(), false);
            }
            let counted = inner.atom.is_present();
            (inner.atom, counted)
        }
    }
}

/// Evaluate a call's arguments, then the call itself.
///
/// Each argument's markers are held back until the function reports which
/// arguments reach its value, so a marker in an untaken branch is never
/// recorded.
fn eval_call(name: &str, args: &[Template], ctx: &mut EvalContext<'_>) -> Atom {
    let recorded = ctx.markers().len();
    let mut evaluated = Vec::with_capacity(args.len());
    let mut held = Vec::with_capacity(args.len());
    for arg in args {
        evaluated.push(Arg::new(eval_template(arg, ctx), arg.starts_quoted()));
        held.push(ctx.split_markers(recorded));
    }

    match functions::invoke(name, &evaluated) {
        Ok((atom, Source::All)) => {
            for markers in held {
                ctx.extend_markers(markers);
            }
            atom
        }
        Ok((atom, Source::Arg(index))) => {
            if let Some(markers) = held.into_iter().nth(index) {
                ctx.extend_markers(markers);
            }
            atom
        }
        Ok((atom, Source::Nothing)) => atom,
        Err(marker) => {
            debug!(name, %marker, "substituting marker");
            let atom = Atom::literal(marker.to_string());
            ctx.add_marker(marker);
            atom
        }
    }
}
