//! Query descriptors for fetching records

use std::cmp::Ordering;
use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Description of a fetch over all records of type `T`
///
/// Applied as filter, then stable sort, then offset, then limit. An empty
/// descriptor matches every record in store order.
///
/// ```
/// use tessera_core::FetchDescriptor;
///
/// let descriptor = FetchDescriptor::<u32>::new()
///     .filter(|n| n % 2 == 0)
///     .sort_by(|a, b| b.cmp(a))
///     .limit(2);
///
/// assert_eq!(descriptor.apply(vec![1, 2, 3, 4, 6]), vec![6, 4]);
/// ```
pub struct FetchDescriptor<T> {
    predicate: Option<Predicate<T>>,
    comparator: Option<Comparator<T>>,
    offset: usize,
    limit: Option<usize>,
}

impl<T> FetchDescriptor<T> {
    /// Descriptor matching every record
    pub fn new() -> Self {
        Self {
            predicate: None,
            comparator: None,
            offset: 0,
            limit: None,
        }
    }

    /// Keep only records for which `predicate` holds
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Order matches with `comparator`
    pub fn sort_by(
        mut self,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.comparator = Some(Box::new(comparator));
        self
    }

    /// Skip the first `offset` matches
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Return at most `limit` matches
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a single record against the predicate
    pub fn matches(&self, record: &T) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(record))
    }

    /// Run the descriptor over `records`
    pub fn apply(&self, records: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut matched: Vec<T> = records.into_iter().filter(|r| self.matches(r)).collect();
        if let Some(comparator) = &self.comparator {
            matched.sort_by(|a, b| comparator(a, b));
        }
        matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

impl<T> Default for FetchDescriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FetchDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchDescriptor")
            .field("filtered", &self.predicate.is_some())
            .field("sorted", &self.comparator.is_some())
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .finish()
    }
}
