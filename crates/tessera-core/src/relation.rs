//! Relationship addressing and merging
//!
//! A relationship is an ordered, duplicate-free list of child ids held by a
//! parent record. [`Relation`] names one such list on a parent type and
//! gives typed access to it; [`merge_unique`] and [`extend_unique`] grow a
//! list without reordering it or introducing duplicates.

use crate::{Record, RecordId};
use std::fmt;
use std::marker::PhantomData;

/// Selector for a one-to-many relationship from `P` to `C`
///
/// Holds a getter and a mutator for the parent's child id list, so the
/// relationship can be addressed without reflection.
///
/// ```
/// use tessera_core::{Record, RecordId, Relation};
///
/// #[derive(Clone, Default)]
/// struct Team { key: String, members: Vec<RecordId> }
/// #[derive(Clone, Default)]
/// struct Player { key: String }
///
/// impl Record for Team {
///     const KIND: &'static str = "team";
///     fn key(&self) -> &str { &self.key }
///     fn set_key(&mut self, key: String) { self.key = key; }
/// }
/// impl Record for Player {
///     const KIND: &'static str = "player";
///     fn key(&self) -> &str { &self.key }
///     fn set_key(&mut self, key: String) { self.key = key; }
/// }
///
/// let members: Relation<Team, Player> =
///     Relation::new("members", |t| &t.members, |t| &mut t.members);
/// let mut team = Team::default();
/// members.children_mut(&mut team).push(RecordId::new("player", "p1"));
/// assert_eq!(members.children(&team).len(), 1);
/// ```
pub struct Relation<P, C> {
    name: &'static str,
    get: fn(&P) -> &Vec<RecordId>,
    get_mut: fn(&mut P) -> &mut Vec<RecordId>,
    _child: PhantomData<fn() -> C>,
}

impl<P: Record, C: Record> Relation<P, C> {
    /// Create a relation selector
    pub fn new(
        name: &'static str,
        get: fn(&P) -> &Vec<RecordId>,
        get_mut: fn(&mut P) -> &mut Vec<RecordId>,
    ) -> Self {
        Self {
            name,
            get,
            get_mut,
            _child: PhantomData,
        }
    }

    /// Relationship name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current child ids of `parent`
    pub fn children<'a>(&self, parent: &'a P) -> &'a Vec<RecordId> {
        (self.get)(parent)
    }

    /// Mutable child ids of `parent`
    pub fn children_mut<'a>(&self, parent: &'a mut P) -> &'a mut Vec<RecordId> {
        (self.get_mut)(parent)
    }

    /// Append children to `parent` that it does not already hold
    ///
    /// Returns the number of ids appended.
    pub fn link<I>(&self, parent: &mut P, children: I) -> usize
    where
        I: IntoIterator<Item = RecordId>,
    {
        extend_unique(self.children_mut(parent), children)
    }
}

impl<P, C> Clone for Relation<P, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, C> Copy for Relation<P, C> {}

impl<P: Record, C: Record> fmt::Debug for Relation<P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Relation({}.{} -> {})", P::KIND, self.name, C::KIND)
    }
}

/// Return `existing` followed by every candidate not already present
///
/// Candidates keep their given order; the first occurrence of a duplicate
/// candidate wins.
pub fn merge_unique<T: PartialEq + Clone>(existing: &[T], candidates: &[T]) -> Vec<T> {
    let mut merged = existing.to_vec();
    extend_unique(&mut merged, candidates.iter().cloned());
    merged
}

/// Append each candidate not already present in `existing`
///
/// Existing entries are never moved or removed. Returns the number of
/// entries appended.
pub fn extend_unique<T, I>(existing: &mut Vec<T>, candidates: I) -> usize
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    let before = existing.len();
    for candidate in candidates {
        if !existing.contains(&candidate) {
            existing.push(candidate);
        }
    }
    existing.len() - before
}
