//! Implementation of the `titlefmt functions` command.

use miette::IntoDiagnostic;
use titlefmt::interpreter::FUNCTIONS;

use crate::output::table::format_functions_table;

/// Arguments for the functions command.
#[derive(Debug, clap::Args)]
pub struct FunctionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the functions command.
pub fn run_functions(args: FunctionsArgs) -> miette::Result<i32> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(FUNCTIONS).into_diagnostic()?
        );
    } else {
        println!("{}", format_functions_table(FUNCTIONS));
    }
    Ok(exitcode::OK)
}
