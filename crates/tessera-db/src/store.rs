//! Database store wrapper.

use crate::config::{StoreConfig, StoreLocation};
use crate::error::{Error, Result};
use native_db::db_type::ToInput;
use native_db::*;
use std::fs;
use std::path::Path;
use tessera_core::{Convertible, RecordId};
use tracing::{debug, info};
use uuid::Uuid;

/// A record type the store can hold.
///
/// Implemented for every [`Convertible`] type that is also a registered
/// `native_db` model. The model's primary key must be the `String` returned
/// by [`Record::key`](tessera_core::Record::key).
pub trait Storable: Convertible + ToInput {}

impl<T: Convertible + ToInput> Storable for T {}

/// Embedded record store.
///
/// Each write method is one unit of work: it opens a read-write transaction,
/// applies the change and commits. Dropping a transaction without committing
/// discards it.
pub struct Store {
    pub(crate) db: Database<'static>,
    fail_commits: bool,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>, models: &'static Models) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let db = Builder::new()
            .create(models, path)
            .map_err(|e| Error::Database(e.to_string()))?;
        info!(path = %path.display(), "Opened persistent store");
        Ok(Self::with_database(db))
    }

    /// Create an in-memory database.
    pub fn in_memory(models: &'static Models) -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(models)
            .map_err(|e| Error::Database(e.to_string()))?;
        info!("Opened in-memory store");
        Ok(Self::with_database(db))
    }

    /// Open the backend selected by `config`.
    pub fn from_config(config: &StoreConfig, models: &'static Models) -> Result<Self> {
        match &config.location {
            StoreLocation::InMemory => Self::in_memory(models),
            StoreLocation::Persistent { path } => Self::open(path, models),
        }
    }

    fn with_database(db: Database<'static>) -> Self {
        Self {
            db,
            fail_commits: false,
        }
    }

    /// Load a record by identifier.
    ///
    /// Ids of another kind never match.
    pub fn get<T: Storable>(&self, id: &RecordId) -> Result<Option<T>> {
        if !id.is_kind(T::KIND) {
            return Ok(None);
        }
        let r = self.db.r_transaction()?;
        let stored: Option<T> = r.get().primary(id.key().to_string())?;
        Ok(stored)
    }

    /// Insert a new record under a fresh key and commit.
    pub fn insert<T: Storable>(&self, mut record: T) -> Result<RecordId> {
        record.set_key(Uuid::new_v4().to_string());
        let id = record.id();

        let rw = self.db.rw_transaction()?;
        rw.insert(record)?;
        self.check_commit()?;
        rw.commit()?;

        debug!(id = %id, "Inserted record");
        Ok(id)
    }

    /// Replace `old` with `updated` and commit.
    pub fn update<T: Storable>(&self, old: T, updated: T) -> Result<()> {
        let id = updated.id();

        let rw = self.db.rw_transaction()?;
        rw.update(old, updated)?;
        self.check_commit()?;
        rw.commit()?;

        debug!(id = %id, "Updated record");
        Ok(())
    }

    /// Remove a record and commit.
    pub fn remove<T: Storable>(&self, record: T) -> Result<()> {
        let id = record.id();

        let rw = self.db.rw_transaction()?;
        rw.remove(record)?;
        self.check_commit()?;
        rw.commit()?;

        debug!(id = %id, "Removed record");
        Ok(())
    }

    fn check_commit(&self) -> Result<()> {
        if self.fail_commits {
            return Err(Error::Database("commit rejected by failpoint".to_string()));
        }
        Ok(())
    }

    /// Make every following commit fail.
    #[cfg(test)]
    pub(crate) fn set_fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }
}
