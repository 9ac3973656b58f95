//! Probe storage: create, load, update, and list probes.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Row};
use uuid::Uuid;

use crate::model::Heading;

use super::{ProbeRecord, Result, Storage, StorageError};

impl Storage {
    /// Inserts a new probe record.
    pub fn create_probe(&self, record: &ProbeRecord) -> Result<()> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM probe WHERE id = ?1",
                [record.id.to_string()],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if exists {
            return Err(StorageError::ProbeAlreadyExists(record.id));
        }

        self.conn.execute(
            "INSERT INTO probe (id, x, y, heading, plateau_max_x, plateau_max_y, launched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                record.id.to_string(),
                record.x,
                record.y,
                record.heading.as_str(),
                record.plateau_max_x,
                record.plateau_max_y,
                record.launched_at.to_string(),
            ],
        )?;
        Ok(())
    }

    /// Loads a single probe record, or `None` when the id is unknown.
    pub fn load_probe(&self, id: Uuid) -> Result<Option<ProbeRecord>> {
        self.conn
            .query_row(
                "SELECT id, x, y, heading, plateau_max_x, plateau_max_y, launched_at
                 FROM probe WHERE id = ?1",
                [id.to_string()],
                row_to_columns,
            )
            .optional()?
            .map(record_from_columns)
            .transpose()
    }

    /// Writes a probe's state back to its row.
    pub fn update_probe(&self, record: &ProbeRecord) -> Result<()> {
        let rows = self.conn.execute(
            "UPDATE probe
             SET x = ?1, y = ?2, heading = ?3, plateau_max_x = ?4, plateau_max_y = ?5
             WHERE id = ?6",
            rusqlite::params![
                record.x,
                record.y,
                record.heading.as_str(),
                record.plateau_max_x,
                record.plateau_max_y,
                record.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::ProbeNotFound(record.id));
        }
        Ok(())
    }

    /// Lists all probe records, oldest launch first.
    pub fn list_probes(&self) -> Result<Vec<ProbeRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, x, y, heading, plateau_max_x, plateau_max_y, launched_at
             FROM probe ORDER BY launched_at",
        )?;
        let rows = stmt.query_map([], row_to_columns)?;

        let mut records = Vec::new();
        for columns in rows {
            records.push(record_from_columns(columns?)?);
        }
        Ok(records)
    }
}

type Columns = (String, i64, i64, String, i64, i64, String);

fn row_to_columns(row: &Row) -> rusqlite::Result<Columns> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// Parses raw column values into a record, rejecting malformed text.
fn record_from_columns(columns: Columns) -> Result<ProbeRecord> {
    let (id, x, y, heading, plateau_max_x, plateau_max_y, launched_at) = columns;

    let id = id
        .parse::<Uuid>()
        .map_err(|e| StorageError::Corrupt(format!("invalid probe id: {e}")))?;
    let heading = Heading::from_name(&heading)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown heading: {heading}")))?;
    let launched_at = launched_at
        .parse::<Timestamp>()
        .map_err(|e| StorageError::Corrupt(format!("invalid launched_at: {e}")))?;

    Ok(ProbeRecord {
        id,
        x,
        y,
        heading,
        plateau_max_x,
        plateau_max_y,
        launched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("probes")).unwrap();
        (dir, storage)
    }

    fn sample_record() -> ProbeRecord {
        ProbeRecord {
            id: Uuid::new_v4(),
            x: 0,
            y: 0,
            heading: Heading::North,
            plateau_max_x: 5,
            plateau_max_y: 5,
            launched_at: Timestamp::now(),
        }
    }

    #[test]
    fn create_and_load_probe() {
        let (_dir, storage) = test_storage();
        let record = sample_record();

        storage.create_probe(&record).unwrap();
        let loaded = storage.load_probe(record.id).unwrap().unwrap();

        assert_eq!(loaded, record);
    }

    #[test]
    fn create_duplicate_probe_fails() {
        let (_dir, storage) = test_storage();
        let record = sample_record();

        storage.create_probe(&record).unwrap();
        let err = storage.create_probe(&record).unwrap_err();

        assert!(matches!(err, StorageError::ProbeAlreadyExists(_)));
    }

    #[test]
    fn load_nonexistent_probe_returns_none() {
        let (_dir, storage) = test_storage();
        assert!(storage.load_probe(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_probe_state() {
        let (_dir, storage) = test_storage();
        let mut record = sample_record();

        storage.create_probe(&record).unwrap();
        record.x = 1;
        record.y = 1;
        record.heading = Heading::East;
        storage.update_probe(&record).unwrap();

        let loaded = storage.load_probe(record.id).unwrap().unwrap();
        assert_eq!((loaded.x, loaded.y), (1, 1));
        assert_eq!(loaded.heading, Heading::East);
    }

    #[test]
    fn update_nonexistent_probe_fails() {
        let (_dir, storage) = test_storage();
        let record = sample_record();
        let err = storage.update_probe(&record).unwrap_err();

        assert!(matches!(err, StorageError::ProbeNotFound(_)));
    }

    #[test]
    fn list_probes_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.list_probes().unwrap().is_empty());
    }

    #[test]
    fn list_probes_returns_all_sorted_by_launched_at() {
        let (_dir, storage) = test_storage();

        let mut first = sample_record();
        first.launched_at = Timestamp::new(1_000_000_000, 0).unwrap();

        let mut second = sample_record();
        second.launched_at = Timestamp::new(2_000_000_000, 0).unwrap();

        // Create in reverse order to verify sorting.
        storage.create_probe(&second).unwrap();
        storage.create_probe(&first).unwrap();

        let records = storage.list_probes().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first.id);
        assert_eq!(records[1].id, second.id);
    }

    #[test]
    fn storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("probes");
        let record = sample_record();

        {
            let storage = Storage::new(&root).unwrap();
            storage.create_probe(&record).unwrap();
        }

        let storage = Storage::new(&root).unwrap();
        let loaded = storage.load_probe(record.id).unwrap().unwrap();
        assert_eq!(loaded, record);
    }
}
