#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::race::{RaceArgs, run_race};
use crate::reference::{ReferenceArgs, print_reference};
use crate::run::{RunArgs, run_script};

#[derive(Debug, Parser)]
#[command(
    name = "dsviz",
    about = "Step-by-step data-structure operation animator",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Animate a scripted sequence of operations.
    Run(RunArgs),

    /// Race sorting or searching algorithms.
    Race(RaceArgs),

    /// Print a structure's complexity reference or the algorithm cards.
    Reference(ReferenceArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose, cli.log_json);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Run(args) => run_script(&args, &mut out).map(|_| ()),
        Commands::Race(args) => run_race(&args, &mut out).map(|_| ()),
        Commands::Reference(args) => print_reference(&args, &mut out),
    }
}
