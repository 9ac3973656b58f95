//! CLI interface for trek.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//! Mutating commands print the resulting probe state as JSON on stdout;
//! summaries and errors go to stderr.
//!
//! Probe references take a full UUID or an unambiguous prefix.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::mission;
use crate::model::{Heading, Probe};
use crate::storage::Storage;

/// trek — drive exploratory probes across a plateau.
#[derive(Debug, Parser)]
#[command(name = "trek", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: driving a probe
  1. trek launch 5 5 --heading north
     → prints a probe ID (e.g. a3b0fc12)
  2. trek drive a3b MRM
  3. trek show a3b
  4. trek list";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch a new probe at (0, 0) on a fresh plateau. Prints the probe ID.
    Launch {
        /// Maximum X coordinate of the plateau.
        max_x: i64,

        /// Maximum Y coordinate of the plateau.
        max_y: i64,

        /// Initial heading of the probe.
        #[arg(long, value_enum)]
        heading: HeadingArg,
    },

    /// Drive a probe through a command sequence (M = move, L = left, R = right).
    ///
    /// All-or-nothing: a sequence that fails partway changes nothing.
    /// Prints the resulting probe state as JSON.
    Drive {
        /// Probe ID: full UUID or unambiguous prefix (e.g. `a3b`).
        probe: String,

        /// Command sequence, e.g. `MRM`. Case-insensitive.
        sequence: String,
    },

    /// Show a probe's current state as JSON.
    Show {
        /// Probe ID: full UUID or unambiguous prefix.
        probe: String,
    },

    /// List all launched probes.
    List,
}

/// CLI-facing heading, mapped to the domain `Heading`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadingArg {
    North,
    East,
    South,
    West,
}

impl HeadingArg {
    fn to_domain(self) -> Heading {
        match self {
            Self::North => Heading::North,
            Self::East => Heading::East,
            Self::South => Heading::South,
            Self::West => Heading::West,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(storage: &Storage) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Launch {
            max_x,
            max_y,
            heading,
        } => cmd_launch(storage, max_x, max_y, heading),
        Command::Drive { probe, sequence } => cmd_drive(storage, &probe, &sequence),
        Command::Show { probe } => cmd_show(storage, &probe),
        Command::List => cmd_list(storage),
    }
}

fn cmd_launch(
    storage: &Storage,
    max_x: i64,
    max_y: i64,
    heading: HeadingArg,
) -> Result<(), String> {
    let probe = mission::launch_probe(storage, max_x, max_y, heading.to_domain())
        .map_err(|e| format!("failed to launch probe: {e}"))?;

    println!("{}", probe.id);
    Ok(())
}

fn cmd_drive(storage: &Storage, probe_ref: &str, sequence: &str) -> Result<(), String> {
    check_sequence(sequence)?;

    let id = resolve_probe(storage, probe_ref)?;
    let probe = mission::drive_probe(storage, id, sequence).map_err(|e| e.to_string())?;

    print_state(&probe)
}

fn cmd_show(storage: &Storage, probe_ref: &str) -> Result<(), String> {
    let id = resolve_probe(storage, probe_ref)?;
    let probe = mission::get_probe(storage, id).map_err(|e| e.to_string())?;

    print_state(&probe)
}

fn cmd_list(storage: &Storage) -> Result<(), String> {
    let probes =
        mission::list_probes(storage).map_err(|e| format!("failed to list probes: {e}"))?;

    if probes.is_empty() {
        println!("No probes");
        return Ok(());
    }

    for p in &probes {
        let short_id = &p.id.to_string()[..8];
        println!("{short_id}  ({}, {})  {}", p.x, p.y, p.heading.as_str());
    }

    Ok(())
}

/// Syntactic gate on the command alphabet, ahead of the core's own check.
///
/// Both layers accept exactly M, L, R in either case.
fn check_sequence(sequence: &str) -> Result<(), String> {
    if sequence.is_empty() {
        return Err("specify at least one command (M, L, R)".to_string());
    }
    if let Some(c) = sequence.chars().find(|c| !"MLRmlr".contains(*c)) {
        return Err(format!("invalid command '{c}': valid commands are M, L, R"));
    }
    Ok(())
}

fn print_state(probe: &Probe) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&probe.snapshot())
        .map_err(|e| format!("failed to serialize probe state: {e}"))?;
    println!("{json}");
    Ok(())
}

/// Resolve a probe reference (full UUID or unambiguous prefix) to an id.
fn resolve_probe(storage: &Storage, reference: &str) -> Result<Uuid, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return Ok(id);
    }

    // Try as a prefix match against all probes.
    let probes =
        mission::list_probes(storage).map_err(|e| format!("failed to list probes: {e}"))?;

    let matches: Vec<&Probe> = probes
        .iter()
        .filter(|p| p.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no probe matching '{reference}'")),
        1 => Ok(matches[0].id),
        n => {
            let ids: Vec<String> = matches
                .iter()
                .map(|p| p.id.to_string()[..8].to_string())
                .collect();
            Err(format!(
                "'{reference}' is ambiguous — matches {n} probes: {}",
                ids.join(", ")
            ))
        }
    }
}
