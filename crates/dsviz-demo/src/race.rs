#![forbid(unsafe_code)]

//! `dsviz race`: run a simulated algorithm race to completion.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dsviz_runtime::{Algorithm, Race, RaceKind, Standing};

use crate::error::{DemoError, Result};
use crate::render::OutputFormat;
use crate::run::load_policy;

#[derive(Debug, Clone, Args)]
pub struct RaceArgs {
    /// sorting or searching.
    #[arg(long, default_value = "sorting")]
    pub kind: RaceKind,

    /// Comma-separated entrants; defaults to every algorithm of the kind.
    #[arg(long = "algo", value_delimiter = ',')]
    pub algorithms: Vec<Algorithm>,

    /// Input length; defaults to the configured race size.
    #[arg(long)]
    pub size: Option<usize>,

    /// Speed in 1..=100 (50 is nominal); defaults to the configured speed.
    #[arg(long)]
    pub speed: Option<u32>,

    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print standings every this many ticks (0 prints only the result).
    #[arg(long, default_value_t = 10)]
    pub every: usize,

    /// Policy file (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Ticks after which a race is abandoned.
const MAX_TICKS: usize = 100_000;

/// Run the race and return its final standings.
///
/// # Errors
///
/// Invalid entrants or parameters, config problems and write failures.
pub fn run_race(args: &RaceArgs, out: &mut impl Write) -> Result<Vec<Standing>> {
    let policy = load_policy(args.config.as_ref())?;
    let algorithms = if args.algorithms.is_empty() {
        args.kind.algorithms().to_vec()
    } else {
        args.algorithms.clone()
    };
    let size = args.size.unwrap_or(policy.race.size);
    let speed = args.speed.unwrap_or(policy.race.speed);
    let mut race = Race::with_random_input(
        args.kind,
        size,
        policy.race.min_value..=policy.race.max_value,
        &algorithms,
        speed,
        args.seed,
    )?
    .with_tick(policy.race.tick());

    if args.format == OutputFormat::Text {
        writeln!(out, "{} race, {} values, speed {speed}", args.kind, race.input().len())?;
        if let Some(target) = race.target() {
            writeln!(out, "target: {target}")?;
        }
    }

    race.start();
    let mut ticks = 0;
    while !race.is_finished() {
        if ticks >= MAX_TICKS {
            return Err(DemoError::invalid("race did not finish"));
        }
        race.step();
        ticks += 1;
        if args.every > 0 && ticks % args.every == 0 && !race.is_finished() {
            print_standings(out, args.format, ticks, &race.standings())?;
        }
    }
    let standings = race.standings();
    print_standings(out, args.format, ticks, &standings)?;
    Ok(standings)
}

fn print_standings(
    out: &mut impl Write,
    format: OutputFormat,
    tick: usize,
    standings: &[Standing],
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(
                &mut *out,
                &serde_json::json!({ "tick": tick, "standings": standings }),
            )?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "-- tick {tick}")?;
            for s in standings {
                let flag = if s.finished { "done" } else { "    " };
                writeln!(
                    out,
                    "{:>2}. {:<15} {:>6.1}% {flag} cmp={:<5} swp={:<5} {}ms",
                    s.rank,
                    s.algorithm.display_name(),
                    s.progress,
                    s.comparisons,
                    s.swaps,
                    s.elapsed_ms
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: RaceKind, algorithms: Vec<Algorithm>) -> RaceArgs {
        RaceArgs {
            kind,
            algorithms,
            size: Some(20),
            speed: Some(100),
            seed: 1,
            every: 0,
            config: None,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn defaults_to_every_algorithm_of_the_kind() {
        let mut out = Vec::new();
        let standings = run_race(&args(RaceKind::Sorting, vec![]), &mut out).unwrap();
        assert_eq!(standings.len(), 5);
        assert!(standings.iter().all(|s| s.finished));
        let ranks: Vec<usize> = standings.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn searching_race_prints_target() {
        let mut out = Vec::new();
        run_race(&args(RaceKind::Searching, vec![Algorithm::BinarySearch]), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("target: "));
    }

    #[test]
    fn wrong_kind_is_a_usage_error() {
        let mut out = Vec::new();
        let err = run_race(&args(RaceKind::Searching, vec![Algorithm::QuickSort]), &mut out).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
