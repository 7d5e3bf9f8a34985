//! Serialized CRUD handler
//!
//! [`CrudHandler`] is the only mutation and query surface over a [`Store`].
//! Every operation is one unit of work that:
//! 1. waits for exclusive access to the store (FIFO, one operation at a time)
//! 2. runs its reads, conversions and commits on the blocking thread pool
//! 3. releases access when the work finishes, fails or panics
//!
//! Batch operations hold access for the whole batch but commit element by
//! element. A failing element aborts the rest of the batch; elements
//! committed before it stay committed.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::store::{Storable, Store};
use native_db::Models;
use std::sync::Arc;
use tessera_core::{FetchDescriptor, Record, RecordId, Relation};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Cloneable handle to a serialized store context
///
/// Clones share the same store; operations from all clones are serialized.
#[derive(Clone)]
pub struct CrudHandler {
    context: Arc<Mutex<Store>>,
}

impl CrudHandler {
    /// Take ownership of an open store
    pub fn new(store: Store) -> Self {
        Self {
            context: Arc::new(Mutex::new(store)),
        }
    }

    /// Open the store selected by `config` off the async executor
    pub async fn open(config: StoreConfig, models: &'static Models) -> Result<Self> {
        let store = tokio::task::spawn_blocking(move || Store::from_config(&config, models))
            .await
            .map_err(|e| Error::Executor(e.to_string()))??;
        Ok(Self::new(store))
    }

    /// Run `work` with exclusive access to the store
    async fn perform<R, F>(&self, work: F) -> Result<R>
    where
        F: FnOnce(&Store) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let guard = self.context.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || work(&*guard))
            .await
            .map_err(|e| Error::Executor(e.to_string()))?
    }

    /// Convert `dto` into a new record, insert it and commit
    pub async fn create_item<T: Storable>(&self, dto: T::Dto) -> Result<RecordId> {
        let record = convert::<T>(&dto)?;
        self.perform(move |store| create(store, record)).await
    }

    /// Create one record per DTO, in order, stopping at the first failure
    pub async fn create_items<T: Storable>(&self, dtos: Vec<T::Dto>) -> Result<Vec<RecordId>> {
        debug!(kind = T::KIND, count = dtos.len(), "Creating records");
        self.perform(move |store| {
            dtos.iter()
                .map(|dto| convert::<T>(dto).and_then(|record| create(store, record)))
                .collect()
        })
        .await
    }

    /// Read a record, failing with [`Error::ItemNotFound`] on a miss
    pub async fn read_item<T: Storable>(&self, id: &RecordId) -> Result<T> {
        let id = id.clone();
        self.perform(move |store| require::<T>(store, &id)).await
    }

    /// Read the records that exist among `ids`, in input order
    ///
    /// Misses are omitted rather than reported.
    pub async fn read_items<T: Storable>(&self, ids: &[RecordId]) -> Result<Vec<T>> {
        let ids = ids.to_vec();
        self.perform(move |store| read_existing::<T>(store, &ids)).await
    }

    /// Patch a record from `dto` and commit
    ///
    /// Without a DTO, or with one that does not convert, the record is left
    /// as it is and the commit still runs.
    pub async fn update_item<T: Storable>(
        &self,
        id: &RecordId,
        dto: Option<T::Dto>,
    ) -> Result<()> {
        let id = id.clone();
        self.perform(move |store| {
            let existing = require::<T>(store, &id)?;
            let mut updated = existing.clone();

            match dto.as_ref().map(T::convert) {
                Some(Some(source)) => {
                    updated.update_from(&source);
                    // The key belongs to the store, not to the field set.
                    updated.set_key(existing.key().to_string());
                }
                Some(None) => {
                    warn!(id = %id, "DTO rejected by conversion, committing without changes");
                }
                None => {}
            }

            store
                .update(existing, updated)
                .map_err(|e| Error::UpdateFailed(e.to_string()))
        })
        .await
    }

    /// Remove a record and commit
    pub async fn delete_item<T: Storable>(&self, id: &RecordId) -> Result<()> {
        let id = id.clone();
        self.perform(move |store| delete::<T>(store, &id)).await
    }

    /// Remove records in order, stopping at the first failure
    pub async fn delete_items<T: Storable>(&self, ids: &[RecordId]) -> Result<()> {
        let ids = ids.to_vec();
        debug!(kind = T::KIND, count = ids.len(), "Deleting records");
        self.perform(move |store| ids.iter().try_for_each(|id| delete::<T>(store, id)))
            .await
    }

    /// Identifiers of the records matching `descriptor`
    pub async fn fetch_items<T: Storable>(
        &self,
        descriptor: FetchDescriptor<T>,
    ) -> Result<Vec<RecordId>> {
        self.perform(move |store| {
            let ids: Vec<RecordId> = store.fetch(&descriptor)?.iter().map(Record::id).collect();
            debug!(kind = T::KIND, matched = ids.len(), "Fetched records");
            Ok(ids)
        })
        .await
    }

    /// Number of records matching `descriptor`
    pub async fn fetch_count<T: Storable>(&self, descriptor: FetchDescriptor<T>) -> Result<usize> {
        self.perform(move |store| store.fetch_count(&descriptor)).await
    }

    /// Link existing children to a parent's relationship and commit
    ///
    /// Missing children are skipped. Children already linked, or repeated in
    /// `child_ids`, are linked once; existing links keep their order.
    pub async fn add_relation<P, C>(
        &self,
        parent_id: &RecordId,
        child_ids: &[RecordId],
        relation: Relation<P, C>,
    ) -> Result<()>
    where
        P: Storable,
        C: Storable,
    {
        let parent_id = parent_id.clone();
        let child_ids = child_ids.to_vec();
        self.perform(move |store| {
            let parent = require::<P>(store, &parent_id)?;
            let children = read_existing::<C>(store, &child_ids)?;

            let mut updated = parent.clone();
            let added = relation.link(&mut updated, children.iter().map(Record::id));
            debug!(
                parent = %parent_id,
                relation = relation.name(),
                requested = child_ids.len(),
                found = children.len(),
                added,
                "Linking children"
            );

            store
                .update(parent, updated)
                .map_err(|e| Error::UpdateFailed(e.to_string()))
        })
        .await
    }

    /// Children currently linked through `relation`, in link order
    ///
    /// Links to records that no longer exist are skipped.
    pub async fn related_items<P, C>(
        &self,
        parent_id: &RecordId,
        relation: Relation<P, C>,
    ) -> Result<Vec<C>>
    where
        P: Storable,
        C: Storable,
    {
        let parent_id = parent_id.clone();
        self.perform(move |store| {
            let parent = require::<P>(store, &parent_id)?;
            read_existing::<C>(store, relation.children(&parent))
        })
        .await
    }
}

fn convert<T: Storable>(dto: &T::Dto) -> Result<T> {
    T::convert(dto).ok_or_else(|| {
        warn!(kind = T::KIND, "DTO rejected by conversion");
        Error::InvalidData(T::KIND)
    })
}

fn create<T: Storable>(store: &Store, record: T) -> Result<RecordId> {
    store.insert(record).map_err(|e| {
        warn!(kind = T::KIND, error = %e, "Insert failed");
        Error::CreationFailed(e.to_string())
    })
}

fn require<T: Storable>(store: &Store, id: &RecordId) -> Result<T> {
    store
        .get::<T>(id)?
        .ok_or_else(|| Error::ItemNotFound(id.clone()))
}

fn read_existing<T: Storable>(store: &Store, ids: &[RecordId]) -> Result<Vec<T>> {
    let mut found = Vec::with_capacity(ids.len());
    for id in ids {
        match store.get::<T>(id)? {
            Some(record) => found.push(record),
            None => debug!(id = %id, "Skipping missing record"),
        }
    }
    Ok(found)
}

fn delete<T: Storable>(store: &Store, id: &RecordId) -> Result<()> {
    let record = require::<T>(store, id)?;
    store.remove(record).map_err(|e| {
        warn!(id = %id, error = %e, "Remove failed");
        Error::DeleteFailed(e.to_string())
    })
}
