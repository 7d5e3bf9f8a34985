//! Tessera DB - serialized record persistence using native_db
//!
//! Provides:
//! - `Store`, a unit-of-work wrapper over an embedded `native_db` database
//! - `CrudHandler`, the async CRUD and relation surface that serializes every
//!   operation against one store
//! - `Environment`, a lazy factory that hands out configured handlers
//! - `StoreConfig`, persistent or in-memory backend selection
//!
//! Record types implement `tessera_core::Convertible` and are declared as
//! `native_db` models with a `String` primary key.

mod config;
mod environment;
mod error;
mod handler;
mod queries;
mod store;

#[cfg(test)]
mod fixtures;

pub use config::{StoreConfig, StoreLocation};
pub use environment::Environment;
pub use error::{Error, Result};
pub use handler::CrudHandler;
pub use store::{Storable, Store};
pub use tessera_core::{Convertible, FetchDescriptor, Record, RecordId, Relation};
