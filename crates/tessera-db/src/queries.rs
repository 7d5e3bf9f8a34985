//! Common query patterns for the database.

use crate::error::{Error, Result};
use crate::store::{Storable, Store};
use tessera_core::FetchDescriptor;

impl Store {
    /// Get all records of a type in primary key order.
    pub fn all<T: Storable>(&self) -> Result<Vec<T>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<T>()?;
        let iter = scan.all()?;
        let records: std::result::Result<Vec<T>, _> = iter.collect();
        records.map_err(|e| Error::Database(e.to_string()))
    }

    /// Get the records matching a descriptor.
    pub fn fetch<T: Storable>(&self, descriptor: &FetchDescriptor<T>) -> Result<Vec<T>> {
        Ok(descriptor.apply(self.all::<T>()?))
    }

    /// Count all records of a type.
    pub fn count<T: Storable>(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<T>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }

    /// Count the records matching a descriptor.
    pub fn fetch_count<T: Storable>(&self, descriptor: &FetchDescriptor<T>) -> Result<usize> {
        Ok(self.fetch(descriptor)?.len())
    }
}
