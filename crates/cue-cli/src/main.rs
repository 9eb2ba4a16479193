//! CLI frontend for Cue dialog scripts.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cue",
    about = "Cue: load, inspect, and run JSON dialog scripts",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

/// Loader options shared by every subcommand.
#[derive(Args, Clone, Copy)]
struct GlobalOptions {
    /// Resolve parameters when every declared field is present, ignoring extra keys
    #[arg(long, global = true)]
    ignore_extra_keys: bool,

    /// Log and skip commands with no registered name
    #[arg(long, global = true)]
    skip_unknown: bool,

    /// Log loading and execution progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load scripts and report any errors
    Check {
        /// Script files or directories of scripts
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List the commands of a script with their resolved parameters
    Show {
        /// Script file
        file: PathBuf,
    },

    /// Print the mapped script as JSON
    Dump {
        /// Script file
        file: PathBuf,

        /// Indent the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run a script and print what happens on stage
    Run {
        /// Script file
        file: PathBuf,
    },

    /// List parameter variants and their field sets
    Schema,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.options.verbose);

    let options = cli.options;
    let result = match cli.command {
        Commands::Check { paths } => commands::check::run(&options, &paths),
        Commands::Show { file } => commands::show::run(&options, &file),
        Commands::Dump { file, pretty } => commands::dump::run(&options, &file, pretty),
        Commands::Run { file } => commands::run::run(&options, &file),
        Commands::Schema => commands::schema::run(&options),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
