//! Implementation of the `titlefmt format` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use serde::Serialize;
use titlefmt::Formatter;
use tracing::{debug, warn};

use crate::dedup::SeenOutputs;
use crate::output::TemplateDiagnostic;
use crate::sidecar::load_sidecar;

/// Arguments for the format command.
#[derive(Debug, clap::Args)]
pub struct FormatArgs {
    /// Template applied to every track
    pub template: String,

    /// JSON tag file with one object per track
    #[arg(long, required = true)]
    pub tags: PathBuf,

    /// Skip outputs already printed for an earlier track
    #[arg(long)]
    pub unique: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one formatted track.
#[derive(Debug, Serialize)]
struct TrackJson {
    track: usize,
    value: String,
    truth: bool,
}

/// Run the format command.
pub fn run_format(args: FormatArgs, formatter: &Formatter) -> miette::Result<i32> {
    let compiled = match formatter.compile(&args.template) {
        Ok(compiled) => compiled,
        Err(e) => {
            let diagnostic = TemplateDiagnostic::from_parse_error("template", &args.template, &e);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };
    let tracks = load_sidecar(&args.tags, formatter.options().case_sensitive)?;

    let mut seen = SeenOutputs::new();
    let mut results = Vec::new();
    for (index, track) in tracks.iter().enumerate() {
        let (atom, markers) = compiled.apply_collecting(track, formatter.options());
        for marker in &markers {
            warn!(track = index + 1, %marker, "template rendered an inline marker");
        }
        if args.unique && !seen.insert(atom.as_str()) {
            debug!(track = index + 1, "skipping repeated output");
            continue;
        }
        if args.json {
            results.push(TrackJson {
                track: index + 1,
                truth: atom.truth,
                value: atom.into_string(),
            });
        } else {
            println!("{}", atom.as_str());
        }
    }

    if args.unique {
        debug!(tracks = tracks.len(), distinct = seen.len(), "formatted tag file");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    }
    Ok(exitcode::OK)
}
