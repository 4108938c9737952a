//! Defines the source store trait.

use crate::{Error, source::IncomeSource};

/// The fixed collections an income source can be stored under.
///
/// The keys match the identifiers the original dashboard persisted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Catalog-backed platform sources.
    Platforms,
    /// Manually entered income streams.
    ManualIncomes,
}

impl Collection {
    /// The storage key for the collection.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Platforms => "platforms",
            Collection::ManualIncomes => "manualIncomes",
        }
    }
}

/// Handles loading and saving the income source collections.
///
/// The caller owns read/modify/write sequencing: [SourceStore::save]
/// replaces the whole collection, so add, edit and delete are expressed by
/// loading the array, changing it, and saving it back.
pub trait SourceStore {
    /// Retrieve every source in `collection`, in the order they were saved.
    fn load(&self, collection: Collection) -> Result<Vec<IncomeSource>, Error>;

    /// Replace the contents of `collection` with `sources`.
    fn save(&mut self, collection: Collection, sources: &[IncomeSource]) -> Result<(), Error>;
}
