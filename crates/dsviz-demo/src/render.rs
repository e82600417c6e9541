#![forbid(unsafe_code)]

//! Frame printers for text and JSON output.

use std::io::Write;

use clap::ValueEnum;
use dsviz_core::Age;
use dsviz_runtime::{AnimatorPhase, Snapshot};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One printed frame: the event that produced it plus the page state.
#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<&'a str>,
    pub snapshot: &'a Snapshot,
}

/// Write `record` in `format`, one line per frame.
///
/// # Errors
///
/// Write or serialisation failures.
pub fn write_frame(out: &mut impl Write, format: OutputFormat, record: &FrameRecord<'_>) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)?;
        }
        OutputFormat::Text => writeln!(out, "{}", text_line(record))?,
    }
    Ok(())
}

/// Human-readable rendering of a frame.
///
/// Highlighted elements are wrapped in `>…<`, new elements carry a `*`
/// and the in-flight element is shown after a `+`.
#[must_use]
pub fn text_line(record: &FrameRecord<'_>) -> String {
    let snap = record.snapshot;
    let mut line = format!("[{:>6}ms] {:<9}", snap.clock_ms, record.event);
    if snap.phase != AnimatorPhase::Idle {
        line.push_str(&format!(" {}/{}", snap.step, snap.total_steps));
    }

    let cells: Vec<String> = snap
        .elements
        .iter()
        .map(|e| {
            let marker = if e.age == Age::New { "*" } else { "" };
            if e.highlighted {
                format!(">{}{marker}<", e.value)
            } else {
                format!("{}{marker}", e.value)
            }
        })
        .collect();
    line.push_str(&format!(" [{}]", cells.join(" ")));
    if let Some(pending) = &snap.pending {
        line.push_str(&format!(" +{}", pending.value));
    }
    if let Some(departed) = &snap.departed {
        line.push_str(&format!(" -{}", departed.value));
    }
    if !snap.status.is_empty() {
        line.push_str(&format!("  {}", snap.status));
    }
    line
}
