//! Implements a SQLite backed source store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    source::{IncomeSource, SourceId, SourceKind},
    stores::{Collection, SourceStore},
};

/// Loads and saves the income source collections to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteSourceStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSourceStore {
    /// Create a new source store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl SourceStore for SqliteSourceStore {
    /// Retrieve every source in `collection`, in saved order.
    ///
    /// Rows with unreadable tags or history columns are repaired to empty
    /// collections rather than failing the whole load, and duplicate history
    /// months are dropped last-write-wins.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn load(&self, collection: Collection) -> Result<Vec<IncomeSource>, Error> {
        let sources: Result<Vec<IncomeSource>, Error> = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, name, income, tags, color, logo, notes, kind, historical_earnings
                FROM income_source WHERE collection = :collection ORDER BY position;",
            )?
            .query_map(
                &[(":collection", collection.key())],
                SqliteSourceStore::map_row,
            )?
            .map(|maybe_source| maybe_source.map_err(|error| error.into()))
            .collect();

        sources.map(|mut sources| {
            for source in &mut sources {
                source.dedup_history();
            }

            sources
        })
    }

    /// Replace the contents of `collection` with `sources`.
    ///
    /// # Errors
    /// This function will return an error if a source could not be encoded
    /// or there is an SQL error.
    fn save(&mut self, collection: Collection, sources: &[IncomeSource]) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();
        let transaction = connection.unchecked_transaction()?;

        transaction.execute(
            "DELETE FROM income_source WHERE collection = ?1;",
            (collection.key(),),
        )?;

        for (position, source) in sources.iter().enumerate() {
            let tags = serde_json::to_string(&source.tags)
                .map_err(|error| Error::JSONSerializationError(error.to_string()))?;
            let history = serde_json::to_string(&source.historical_earnings)
                .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

            transaction.execute(
                "INSERT INTO income_source
                    (id, collection, name, income, tags, color, logo, notes, kind,
                    historical_earnings, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
                (
                    source.id.as_str(),
                    collection.key(),
                    &source.name,
                    source.current_income,
                    tags,
                    &source.color,
                    &source.logo,
                    &source.notes,
                    kind_to_str(source.kind),
                    history,
                    position as i64,
                ),
            )?;
        }

        transaction.commit()?;

        Ok(())
    }
}

impl CreateTable for SqliteSourceStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS income_source (
                id TEXT NOT NULL,
                collection TEXT NOT NULL,
                name TEXT NOT NULL,
                income REAL NOT NULL,
                tags TEXT NOT NULL,
                color TEXT,
                logo TEXT,
                notes TEXT,
                kind TEXT NOT NULL,
                historical_earnings TEXT NOT NULL,
                position INTEGER NOT NULL,
                PRIMARY KEY (collection, id)
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteSourceStore {
    type ReturnType = IncomeSource;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id: String = row.get(offset)?;
        let name: String = row.get(offset + 1)?;
        let current_income: f64 = row.get(offset + 2)?;

        let raw_tags: String = row.get(offset + 3)?;
        let tags = serde_json::from_str(&raw_tags).unwrap_or_else(|error| {
            tracing::warn!(source = %id, %error, "could not decode stored tags");
            Vec::new()
        });

        let color: Option<String> = row.get(offset + 4)?;
        let logo: Option<String> = row.get(offset + 5)?;
        let notes: Option<String> = row.get(offset + 6)?;

        let raw_kind: String = row.get(offset + 7)?;
        let kind = kind_from_str(&raw_kind).unwrap_or_else(|| {
            tracing::warn!(source = %id, kind = %raw_kind, "unknown source kind");
            SourceKind::Manual
        });

        let raw_history: String = row.get(offset + 8)?;
        let historical_earnings = serde_json::from_str(&raw_history).unwrap_or_else(|error| {
            tracing::warn!(source = %id, %error, "could not decode stored history");
            Vec::new()
        });

        Ok(IncomeSource {
            id: SourceId::new(id),
            name,
            current_income,
            tags,
            color,
            logo,
            notes,
            kind,
            historical_earnings,
        })
    }
}

fn kind_to_str(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Platform => "platform",
        SourceKind::Manual => "manual",
    }
}

fn kind_from_str(kind: &str) -> Option<SourceKind> {
    match kind {
        "platform" => Some(SourceKind::Platform),
        "manual" => Some(SourceKind::Manual),
        _ => None,
    }
}
