//! Record contracts
//!
//! Every type the persistence layer stores implements two traits:
//! - [`Record`] gives the type a kind name and a store-assigned key
//! - [`Convertible`] builds a record from an external DTO and patches an
//!   existing record from another instance of the same type

use crate::RecordId;

/// A persisted, identifiable entity
///
/// The key is owned by the store. Implementations only hand it back through
/// [`Record::key`] and accept a new one through [`Record::set_key`], which the
/// store calls exactly once when the record is inserted.
pub trait Record: Clone + Send + Sync + 'static {
    /// Kind name, unique per record type within a store
    const KIND: &'static str;

    /// The store key, empty until the record has been inserted
    fn key(&self) -> &str;

    /// Assign the store key
    fn set_key(&mut self, key: String);

    /// Identifier of this record
    fn id(&self) -> RecordId {
        RecordId::new(Self::KIND, self.key())
    }
}

/// Conversion contract between an external DTO and a stored record
pub trait Convertible: Record {
    /// External representation this record is built from
    type Dto: Send + 'static;

    /// Build a fresh record from a DTO
    ///
    /// Returns `None` when the DTO is structurally invalid for this type.
    /// Must be free of side effects.
    fn convert(dto: &Self::Dto) -> Option<Self>;

    /// Copy field values from `other` onto `self`
    ///
    /// Leaves the key and any relationship collections outside the field set
    /// untouched. Never fails.
    fn update_from(&mut self, other: &Self);
}
