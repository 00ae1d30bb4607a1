//! Implementation of the `titlefmt check` command.

use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use titlefmt::parser::parse_template_with_depth;
use titlefmt::{lint_template, Options};

use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Templates to check
    #[arg(required = true)]
    pub templates: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat lint warnings as failures
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one checked template.
#[derive(Debug, Serialize)]
struct CheckJson {
    template: String,
    error: Option<String>,
    position: Option<usize>,
    warnings: Vec<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs, options: &Options) -> miette::Result<i32> {
    let mut errors = 0;
    let mut warned = 0;
    let mut results = Vec::new();

    for (index, template) in args.templates.iter().enumerate() {
        let name = format!("template {}", index + 1);
        let tree = match parse_template_with_depth(template, options.max_depth) {
            Ok(tree) => tree,
            Err(e) => {
                errors += 1;
                if args.json {
                    results.push(CheckJson {
                        template: template.clone(),
                        error: Some(e.to_string()),
                        position: Some(e.position()),
                        warnings: Vec::new(),
                    });
                } else {
                    let diagnostic = TemplateDiagnostic::from_parse_error(&name, template, &e);
                    eprintln!("{:?}", miette::Report::new(diagnostic));
                }
                continue;
            }
        };

        let warnings = lint_template(&tree);
        if !warnings.is_empty() {
            warned += 1;
        }
        if args.json {
            results.push(CheckJson {
                template: template.clone(),
                error: None,
                position: None,
                warnings: warnings.iter().map(ToString::to_string).collect(),
            });
        } else if warnings.is_empty() {
            println!("{} {}", "ok".green(), name);
        } else {
            println!("{} {}", "warning".yellow(), name);
            for warning in &warnings {
                println!("  {} {}", "-".dimmed(), warning);
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    }

    if errors > 0 || (args.strict && warned > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
