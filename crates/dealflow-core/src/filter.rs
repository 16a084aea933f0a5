//! Catalog search by sector tags and free-text query.

use crate::domain::{OpportunityRecord, Sector};

/// Predicates applied to the catalog during discovery.
#[derive(Debug, Clone, Copy)]
pub struct CatalogFilter<'a> {
    /// Accepted sectors; empty accepts every sector.
    pub tags: &'a [Sector],
    /// Case-insensitive substring of the record name or sector label.
    pub query: &'a str,
}

impl<'a> CatalogFilter<'a> {
    pub fn new(tags: &'a [Sector], query: &'a str) -> Self {
        Self { tags, query }
    }

    /// Whether a single record passes both predicates.
    pub fn matches(&self, record: &OpportunityRecord) -> bool {
        let sector_ok = self.tags.is_empty() || self.tags.contains(&record.sector);
        if !sector_ok {
            return false;
        }
        let needle = self.query.to_lowercase();
        record.name.to_lowercase().contains(&needle)
            || record.sector.label().to_lowercase().contains(&needle)
    }

    /// The ordered sub-sequence of `records` that passes the filter.
    pub fn apply<'r>(&self, records: &'r [OpportunityRecord]) -> Vec<&'r OpportunityRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Convenience wrapper over [`CatalogFilter::apply`].
pub fn filter_catalog<'r>(
    records: &'r [OpportunityRecord],
    tags: &[Sector],
    query: &str,
) -> Vec<&'r OpportunityRecord> {
    CatalogFilter::new(tags, query).apply(records)
}
