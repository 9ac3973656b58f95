//! Probe mission operations: the use-case layer between the CLI and the
//! domain core.
//!
//! Each operation is one load, compute, store cycle against storage.
//! Command execution is atomic: a failed sequence persists nothing and
//! leaves the stored probe exactly as it was.

use jiff::Timestamp;
use tracing::info;
use uuid::Uuid;

use crate::model::{self, CommandError, Heading, InvalidPlateau, Plateau, Probe};
use crate::storage::{ProbeRecord, Storage, StorageError};

/// Errors from mission operations.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error(transparent)]
    Plateau(#[from] InvalidPlateau),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("probe not found: {0}")]
    ProbeNotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = core::result::Result<T, MissionError>;

/// Launches a new probe at the plateau origin and persists it.
///
/// The plateau bounds are validated here; the probe id is a fresh v4 UUID.
pub fn launch_probe(storage: &Storage, max_x: i64, max_y: i64, heading: Heading) -> Result<Probe> {
    let plateau = Plateau::new(max_x, max_y)?;
    let probe = Probe::launched(Uuid::new_v4(), plateau, heading);

    storage.create_probe(&to_record(&probe, Timestamp::now()))?;
    info!(probe = %probe.id, max_x, max_y, heading = heading.as_str(), "probe launched");
    Ok(probe)
}

/// Drives a probe through a command sequence and persists the outcome.
///
/// The sequence is simulated in full before anything is written; on any
/// failure the stored record is untouched and the error propagates
/// unchanged.
pub fn drive_probe(storage: &Storage, id: Uuid, sequence: &str) -> Result<Probe> {
    let mut record = storage
        .load_probe(id)?
        .ok_or(MissionError::ProbeNotFound(id))?;
    let mut probe = to_domain(&record)?;

    model::apply_commands(&mut probe, sequence)?;

    record.x = probe.x;
    record.y = probe.y;
    record.heading = probe.heading;
    storage.update_probe(&record)?;

    info!(probe = %id, x = probe.x, y = probe.y, heading = probe.heading.as_str(), "probe driven");
    Ok(probe)
}

/// Fetches a probe by id.
pub fn get_probe(storage: &Storage, id: Uuid) -> Result<Probe> {
    let record = storage
        .load_probe(id)?
        .ok_or(MissionError::ProbeNotFound(id))?;
    to_domain(&record)
}

/// Returns all launched probes, oldest first.
pub fn list_probes(storage: &Storage) -> Result<Vec<Probe>> {
    storage.list_probes()?.iter().map(to_domain).collect()
}

/// Rebuilds a domain probe from its stored record.
///
/// The stored position is trusted as-is; the plateau bounds go back
/// through the validating constructor.
fn to_domain(record: &ProbeRecord) -> Result<Probe> {
    let plateau = Plateau::new(record.plateau_max_x, record.plateau_max_y)?;
    Ok(Probe {
        id: record.id,
        x: record.x,
        y: record.y,
        heading: record.heading,
        plateau,
    })
}

fn to_record(probe: &Probe, launched_at: Timestamp) -> ProbeRecord {
    ProbeRecord {
        id: probe.id,
        x: probe.x,
        y: probe.y,
        heading: probe.heading,
        plateau_max_x: probe.plateau.max_x(),
        plateau_max_y: probe.plateau.max_y(),
        launched_at,
    }
}
