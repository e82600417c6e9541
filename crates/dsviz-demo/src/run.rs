#![forbid(unsafe_code)]

//! `dsviz run`: play a scripted sequence of operations on one page.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use dsviz_core::Structure;
use dsviz_runtime::{Autoplay, FrameClock, PageController, PolicyConfig, TickOutcome};
use web_time::Duration;

use crate::error::{DemoError, Result};
use crate::intent::{Intent, parse_all};
use crate::render::{FrameRecord, OutputFormat, write_frame};

/// Frame pacing when playing in real time.
const REALTIME_FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Structure to animate (array, linked_list, stack, queue).
    #[arg(long, short = 's')]
    pub structure: Structure,

    /// Policy file (TOML, or JSON by extension).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial contents, replacing the configured seed.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Option<Vec<i64>>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Sleep through each step instead of skipping ahead.
    #[arg(long)]
    pub realtime: bool,

    /// After the script, let autoplay start this many random operations.
    #[arg(long, default_value_t = 0)]
    pub autoplay: usize,

    /// Seed for autoplay. Drawn from the OS when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Operations: add:V insert:V@I remove:I update:V@I push:V pop peek
    /// enqueue:V dequeue clear undo
    #[arg(value_name = "OP")]
    pub ops: Vec<String>,
}

/// What a run did, for the final summary line and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub started: usize,
    pub rejected: usize,
    pub undone: usize,
    pub final_values: Vec<i64>,
    pub operation_count: usize,
}

/// Load the policy named by `path`, or the defaults.
///
/// # Errors
///
/// Config load or validation failures.
pub fn load_policy(path: Option<&PathBuf>) -> Result<PolicyConfig> {
    match path {
        Some(path) => Ok(PolicyConfig::from_path(path)?),
        None => Ok(PolicyConfig::default()),
    }
}

/// Execute `args`, writing frames to `out`.
///
/// Rejected operations are reported and skipped.
///
/// # Errors
///
/// Bad tokens, config problems and write failures.
pub fn run_script(args: &RunArgs, out: &mut impl Write) -> Result<RunSummary> {
    let intents = parse_all(&args.ops)?;
    let policy = load_policy(args.config.as_ref())?;
    let mut page = match &args.values {
        Some(values) => PageController::with_values(args.structure, values.iter().copied(), &policy),
        None => PageController::new(args.structure, &policy),
    };
    if let Some(capacity) = page.collection().capacity()
        && page.collection().len() > capacity
    {
        return Err(DemoError::invalid(format!(
            "{} initial values exceed capacity {capacity}",
            page.collection().len()
        )));
    }

    let mut summary = RunSummary::default();
    frame(out, args.format, "init", None, &page)?;

    for (intent, token) in intents.iter().zip(&args.ops) {
        match intent {
            Intent::Undo => {
                let event = if page.undo() {
                    summary.undone += 1;
                    "undo"
                } else {
                    "no-undo"
                };
                frame(out, args.format, event, Some(token), &page)?;
            }
            Intent::Start(op) => match page.start(op) {
                Ok(outcome) => {
                    summary.started += 1;
                    frame(out, args.format, event_name(&outcome), Some(token), &page)?;
                    play_out(&mut page, args, out)?;
                }
                Err(rejection) => {
                    summary.rejected += 1;
                    tracing::warn!(target: "dsviz.demo", op = %token, %rejection, "operation rejected");
                    if args.format == OutputFormat::Text {
                        writeln!(out, "rejected {token}: {rejection}")?;
                    } else {
                        serde_json::to_writer(
                            &mut *out,
                            &serde_json::json!({
                                "event": "rejected",
                                "op": token,
                                "reason": rejection.to_string(),
                            }),
                        )?;
                        writeln!(out)?;
                    }
                }
            },
        }
    }

    if args.autoplay > 0 {
        let mut autoplay = match args.seed {
            Some(seed) => Autoplay::seeded(&policy.autoplay, seed),
            None => Autoplay::from_entropy(&policy.autoplay),
        };
        let mut started = 0;
        // Bounded so a page that can never act still terminates.
        let mut attempts = 0;
        while started < args.autoplay && attempts < args.autoplay * 50 {
            attempts += 1;
            if let Some(op) = autoplay.poll(autoplay.interval(), &mut page) {
                started += 1;
                summary.started += 1;
                let label = format!("auto:{}", op.kind);
                frame(out, args.format, "start", Some(&label), &page)?;
                play_out(&mut page, args, out)?;
            }
        }
    }

    summary.final_values = page.collection().values();
    summary.operation_count = page.operation_count();
    if args.format == OutputFormat::Text {
        writeln!(
            out,
            "done: {} started, {} rejected, {} undone, {} counted",
            summary.started, summary.rejected, summary.undone, summary.operation_count
        )?;
    }
    Ok(summary)
}

/// Drive the page until idle, printing a frame per transition.
fn play_out(page: &mut PageController, args: &RunArgs, out: &mut impl Write) -> Result<()> {
    if args.realtime {
        let mut clock = FrameClock::start();
        while !page.is_idle() {
            std::thread::sleep(REALTIME_FRAME);
            for outcome in page.advance(clock.lap()) {
                frame(out, args.format, event_name(&outcome), None, page)?;
            }
        }
        return Ok(());
    }
    while let Some(wait) = page.animator().time_to_next() {
        for outcome in page.advance(wait) {
            frame(out, args.format, event_name(&outcome), None, page)?;
        }
    }
    Ok(())
}

fn event_name(outcome: &TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::Idle => "idle",
        TickOutcome::Stepped { step: 1, .. } => "start",
        TickOutcome::Stepped { .. } => "step",
        TickOutcome::Committed { .. } => "commit",
        TickOutcome::Settling => "settle",
        TickOutcome::Finished { .. } => "finish",
    }
}

fn frame(
    out: &mut impl Write,
    format: OutputFormat,
    event: &str,
    op: Option<&str>,
    page: &PageController,
) -> Result<()> {
    let snapshot = page.snapshot();
    write_frame(
        out,
        format,
        &FrameRecord {
            event,
            op,
            snapshot: &snapshot,
        },
    )
}
