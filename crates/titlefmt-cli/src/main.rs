//! titlefmt CLI entry point.
//!
//! Provides command-line tools for working with title-formatting templates:
//! - `titlefmt eval` - Evaluate a template against one track
//! - `titlefmt check` - Parse and lint templates
//! - `titlefmt format` - Format every track in a tag file
//! - `titlefmt functions` - List the built-in functions

mod commands;
mod dedup;
mod output;
mod sidecar;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_eval, run_format, run_functions, CheckArgs, EvalArgs, FormatArgs,
    FunctionsArgs,
};
use titlefmt::{Formatter, Options};
use tracing_subscriber::EnvFilter;

/// Title-formatting template tools.
#[derive(Debug, Parser)]
#[command(name = "titlefmt")]
#[command(about = "Title-formatting template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Look up field names exactly as written
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Disable fallback names such as %artist% reading ALBUM ARTIST
    #[arg(long, global = true)]
    pub no_magic: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a template against one track
    Eval(EvalArgs),
    /// Parse and lint templates without evaluating them
    Check(CheckArgs),
    /// Format every track in a tag file
    Format(FormatArgs),
    /// List the built-in functions
    Functions(FunctionsArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let options = Options::builder()
        .case_sensitive(cli.case_sensitive)
        .magic(!cli.no_magic)
        .build();

    let result = match cli.command {
        Commands::Eval(args) => run_eval(args, &Formatter::builder().options(options).build()),
        Commands::Check(args) => run_check(args, &options),
        Commands::Format(args) => run_format(args, &Formatter::builder().options(options).build()),
        Commands::Functions(args) => run_functions(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
