//! Identity types for stored records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of exactly one record in exactly one store
///
/// An id pairs the record type's kind with the key the store assigned at
/// insert time. Two ids are equal only when both parts match; there is no
/// ordering between ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId {
    kind: String,
    key: String,
}

impl RecordId {
    /// Create an id from a record kind and a store key
    pub fn new(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// The record kind this id points into
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The store-assigned key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Check whether this id addresses records of the given kind
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.key)
    }
}
