#![forbid(unsafe_code)]

//! `dsviz reference`: print a structure's complexity table, or the algorithm
//! cards for the race.

use std::io::Write;

use clap::Args;
use dsviz_core::Structure;
use dsviz_core::reference::{ComplexityTier, complexities, space_complexity};
use dsviz_runtime::Algorithm;

use crate::error::Result;
use crate::render::OutputFormat;

#[derive(Debug, Clone, Args)]
pub struct ReferenceArgs {
    #[arg(long, short = 's', required_unless_present = "algorithms")]
    pub structure: Option<Structure>,

    /// Print time and space for every race algorithm instead.
    #[arg(long, conflicts_with = "structure")]
    pub algorithms: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// # Errors
///
/// Write or serialisation failures.
pub fn print_reference(args: &ReferenceArgs, out: &mut impl Write) -> Result<()> {
    match args.structure {
        Some(structure) if !args.algorithms => print_structure(structure, args.format, out),
        _ => print_algorithms(args.format, out),
    }
}

fn print_structure(
    structure: Structure,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let rows = complexities(structure);
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = rows
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "operation": r.operation,
                        "time": r.time,
                        "tier": ComplexityTier::of(r.time),
                        "note": r.note,
                    })
                })
                .collect();
            serde_json::to_writer(
                &mut *out,
                &serde_json::json!({
                    "structure": structure,
                    "space": space_complexity(structure),
                    "operations": rows,
                }),
            )?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{structure} (space {})", space_complexity(structure))?;
            for row in rows {
                let tier = match ComplexityTier::of(row.time) {
                    ComplexityTier::Constant => "fast",
                    ComplexityTier::Linear => "linear",
                    ComplexityTier::Superlinear => "slow",
                };
                writeln!(out, "  {:<26} {:<6} {:<7} {}", row.operation, row.time, tier, row.note)?;
            }
        }
    }
    Ok(())
}

fn print_algorithms(format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let cards: Vec<_> = Algorithm::ALL
                .into_iter()
                .map(|a| {
                    serde_json::json!({
                        "algorithm": a.id(),
                        "name": a.display_name(),
                        "kind": a.kind(),
                        "complexity": a.complexity(),
                    })
                })
                .collect();
            serde_json::to_writer(&mut *out, &serde_json::json!({ "algorithms": cards }))?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for a in Algorithm::ALL {
                let c = a.complexity();
                writeln!(
                    out,
                    "  {:<16} time {:<11} {:<10} space {:<9} {}",
                    a.display_name(),
                    c.time,
                    c.time_rating.label(),
                    c.space,
                    c.space_rating.label(),
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_table_lists_push() {
        let mut out = Vec::new();
        print_reference(
            &ReferenceArgs {
                structure: Some(Structure::Stack),
                algorithms: false,
                format: OutputFormat::Text,
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("stack (space O(n))"));
        assert!(text.contains("Push"));
    }

    #[test]
    fn json_carries_tiers() {
        let mut out = Vec::new();
        print_reference(
            &ReferenceArgs {
                structure: Some(Structure::Queue),
                algorithms: false,
                format: OutputFormat::Json,
            },
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["operations"][0]["tier"], "constant");
    }

    #[test]
    fn algorithm_cards_cover_every_racer() {
        let mut out = Vec::new();
        print_reference(
            &ReferenceArgs {
                structure: None,
                algorithms: true,
                format: OutputFormat::Json,
            },
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let cards = value["algorithms"].as_array().unwrap();
        assert_eq!(cards.len(), Algorithm::ALL.len());
        let quick = cards.iter().find(|c| c["algorithm"] == "quick").unwrap();
        assert_eq!(quick["complexity"]["time"], "O(n log n)");
        assert_eq!(quick["complexity"]["space_rating"], "excellent");
    }

    #[test]
    fn algorithm_text_lists_binary_search() {
        let mut out = Vec::new();
        print_reference(
            &ReferenceArgs {
                structure: None,
                algorithms: true,
                format: OutputFormat::Text,
            },
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Binary Search"));
        assert!(text.contains("O(log n)"));
    }
}
