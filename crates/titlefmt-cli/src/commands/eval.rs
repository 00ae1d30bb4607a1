//! Implementation of the `titlefmt eval` command.

use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use titlefmt::{Formatter, TrackFields};
use tracing::warn;

use crate::output::TemplateDiagnostic;
use crate::sidecar::{load_sidecar, normalize_name};

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Template string to evaluate
    pub template: String,

    /// Track fields in NAME=VALUE format (repeatable)
    #[arg(short = 'f', long = "field", value_parser = parse_key_val)]
    pub fields: Vec<(String, String)>,

    /// JSON tag file with one object per track
    #[arg(long)]
    pub tags: Option<PathBuf>,

    /// Track to use from the tag file, starting at 1
    #[arg(long, default_value_t = 1, requires = "tags")]
    pub track: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub value: String,
    pub present: bool,
    pub truth: bool,
    pub markers: Vec<String>,
}

/// Parse a key=value field string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid field format '{}': expected NAME=VALUE", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs, formatter: &Formatter) -> miette::Result<i32> {
    let case_sensitive = formatter.options().case_sensitive;

    let mut track = match &args.tags {
        Some(path) => {
            let mut tracks = load_sidecar(path, case_sensitive)?;
            if args.track == 0 || args.track > tracks.len() {
                return Err(miette!(
                    "track {} is out of range: {} has {} track(s)",
                    args.track,
                    path.display(),
                    tracks.len()
                ));
            }
            tracks.swap_remove(args.track - 1)
        }
        None => TrackFields::new(),
    };
    // Command-line fields override the tag file
    for (name, value) in args.fields {
        track.insert(normalize_name(&name, case_sensitive), value);
    }

    let (atom, markers) = match formatter.format_collecting(&args.template, &track) {
        Ok(result) => result,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error("template", &args.template, &e);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };
    for marker in &markers {
        warn!(%marker, "template rendered an inline marker");
    }

    if args.json {
        let output = EvalResult {
            present: atom.is_present(),
            truth: atom.truth,
            value: atom.into_string(),
            markers: markers.iter().map(ToString::to_string).collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        println!("{}", atom.as_str());
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("title=a=b").unwrap(),
            ("title".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_val("comment=").unwrap(),
            ("comment".to_string(), String::new())
        );
        assert!(parse_key_val("title").is_err());
    }
}
