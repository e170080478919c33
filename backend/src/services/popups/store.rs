//! SQLite-backed popup record store.
//!
//! The store is the single persistence collaborator of the CRUD service: one
//! `popups` table behind a small repository struct. Following the pattern
//! used elsewhere in this codebase, a fresh `Connection` is opened per
//! operation; handlers stay stateless and nothing is cached in memory.

use common::model::popup::{Frequency, PopupConfig, Weekday};
use rusqlite::{params, Connection, Row};
use std::path::PathBuf;

use crate::error::PopupError;

#[derive(Clone)]
pub struct PopupStore {
    db_path: PathBuf,
}

impl PopupStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into() }
    }

    fn open(&self) -> Result<Connection, PopupError> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Creates the `popups` table if it does not exist yet. Called once at
    /// startup.
    pub fn init_schema(&self) -> Result<(), PopupError> {
        let conn = self.open()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS popups (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                uuid TEXT NOT NULL UNIQUE,
                heading TEXT NOT NULL,
                body_text TEXT NOT NULL,
                footer_text TEXT NOT NULL,
                preview_image TEXT NOT NULL,
                frequency TEXT NOT NULL,
                time_frequency INTEGER,
                on_day TEXT,
                is_active INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn insert(&self, popup: &PopupConfig) -> Result<(), PopupError> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO popups
                (uuid, heading, body_text, footer_text, preview_image,
                 frequency, time_frequency, on_day, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &popup.uuid,
                &popup.heading,
                &popup.body_text,
                &popup.footer_text,
                &popup.preview_image,
                popup.frequency.as_str(),
                popup.time_frequency,
                popup.on_day.map(|d| d.as_str()),
                popup.is_active,
            ],
        )?;
        Ok(())
    }

    /// All records, unfiltered; callers partition by `is_active`.
    pub fn select_all(&self) -> Result<Vec<PopupConfig>, PopupError> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(
            "SELECT id, uuid, heading, body_text, footer_text, preview_image,
                    frequency, time_frequency, on_day, is_active
             FROM popups ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_popup)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Counts of (active, inactive) records, as read by the admission check.
    pub fn counts(&self) -> Result<(usize, usize), PopupError> {
        let conn = self.open()?;
        let active: usize = conn.query_row(
            "SELECT COUNT(*) FROM popups WHERE is_active = 1",
            [],
            |row| row.get(0),
        )?;
        let inactive: usize = conn.query_row(
            "SELECT COUNT(*) FROM popups WHERE is_active = 0",
            [],
            |row| row.get(0),
        )?;
        Ok((active, inactive))
    }

    /// Sets the activation flag of the record matching `uuid`, returning the
    /// updated record, or `None` when no record matches.
    pub fn set_active(&self, uuid: &str, active: bool) -> Result<Option<PopupConfig>, PopupError> {
        let conn = self.open()?;
        let changed = conn.execute(
            "UPDATE popups SET is_active = ?1 WHERE uuid = ?2",
            params![active, uuid],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let mut stmt = conn.prepare(
            "SELECT id, uuid, heading, body_text, footer_text, preview_image,
                    frequency, time_frequency, on_day, is_active
             FROM popups WHERE uuid = ?1",
        )?;
        let popup = stmt.query_row(params![uuid], row_to_popup)?;
        Ok(Some(popup))
    }

    /// Removes the record matching `uuid`. Deleting a uuid that matches
    /// nothing is not an error: the filter simply hits zero rows.
    pub fn delete(&self, uuid: &str) -> Result<(), PopupError> {
        let conn = self.open()?;
        conn.execute("DELETE FROM popups WHERE uuid = ?1", params![uuid])?;
        Ok(())
    }
}

fn row_to_popup(row: &Row) -> rusqlite::Result<PopupConfig> {
    let frequency_raw: String = row.get(6)?;
    let frequency = Frequency::parse(&frequency_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("unknown frequency {:?}", frequency_raw).into(),
        )
    })?;
    let on_day = match row.get::<_, Option<String>>(8)? {
        Some(raw) => Some(Weekday::parse(&raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                format!("unknown day {:?}", raw).into(),
            )
        })?),
        None => None,
    };
    Ok(PopupConfig {
        id: Some(row.get(0)?),
        uuid: row.get(1)?,
        heading: row.get(2)?,
        body_text: row.get(3)?,
        footer_text: row.get(4)?,
        preview_image: row.get(5)?,
        frequency,
        time_frequency: row.get(7)?,
        on_day,
        is_active: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_util::{sample_popup, test_store};
    use common::model::popup::{Frequency, Weekday};

    #[test]
    fn insert_then_select_round_trips_all_fields() {
        let (_dir, store) = test_store();
        let mut popup = sample_popup("u-1");
        popup.frequency = Frequency::OnDay;
        popup.on_day = Some(Weekday::Friday);
        popup.time_frequency = None;
        store.insert(&popup).unwrap();

        let all = store.select_all().unwrap();
        assert_eq!(all.len(), 1);
        let stored = &all[0];
        assert!(stored.id.is_some());
        assert_eq!(stored.uuid, "u-1");
        assert_eq!(stored.frequency, Frequency::OnDay);
        assert_eq!(stored.on_day, Some(Weekday::Friday));
        assert_eq!(stored.preview_image, popup.preview_image);
        assert!(stored.is_active);
    }

    #[test]
    fn duplicate_uuid_is_rejected_by_the_table() {
        let (_dir, store) = test_store();
        store.insert(&sample_popup("u-1")).unwrap();
        assert!(store.insert(&sample_popup("u-1")).is_err());
    }

    #[test]
    fn counts_follow_the_active_partition() {
        let (_dir, store) = test_store();
        store.insert(&sample_popup("a")).unwrap();
        store.insert(&sample_popup("b")).unwrap();
        assert_eq!(store.counts().unwrap(), (2, 0));

        store.set_active("a", false).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 1));
    }

    #[test]
    fn set_active_returns_updated_record_and_is_idempotent() {
        let (_dir, store) = test_store();
        store.insert(&sample_popup("a")).unwrap();

        let updated = store.set_active("a", false).unwrap().unwrap();
        assert!(!updated.is_active);
        // Same flag again: same observable state.
        let again = store.set_active("a", false).unwrap().unwrap();
        assert!(!again.is_active);
        assert_eq!(store.counts().unwrap(), (0, 1));

        assert!(store.set_active("missing", true).unwrap().is_none());
    }

    #[test]
    fn delete_removes_exactly_the_matching_record() {
        let (_dir, store) = test_store();
        store.insert(&sample_popup("a")).unwrap();
        store.insert(&sample_popup("b")).unwrap();

        store.delete("a").unwrap();
        let remaining = store.select_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].uuid, "b");

        // Deleting a missing uuid matches zero rows and still succeeds.
        store.delete("a").unwrap();
        assert_eq!(store.select_all().unwrap().len(), 1);
    }
}
