//! Search and per-field filter predicate.

use super::QueryState;
use crate::model::FieldDescriptor;
use crate::model::Fields;

/// The search and filter part of a query, compiled once per derivation.
///
/// Lower-cases the search term and every active filter value up front, and
/// drops filters on fields that are unknown or not filterable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria<'f> {
    /// Fields searched by the free-text term.
    searchable: Vec<&'f str>,
    /// Lower-cased search term, `None` when empty.
    term: Option<String>,
    /// Active filters as (field key, lower-cased needle).
    filters: Vec<(&'f str, String)>,
}

impl<'f> Criteria<'f> {
    /// Compile the search term and field filters of `query`.
    pub fn new(fields: &'f [FieldDescriptor], query: &QueryState) -> Self {
        let filters = fields
            .iter()
            .filter(|field| field.filterable)
            .filter_map(|field| {
                query
                    .field_filters
                    .get(&field.key)
                    .filter(|needle| !needle.is_empty())
                    .map(|needle| (field.key.as_str(), needle.to_lowercase()))
            })
            .collect();

        Self {
            filters,
            ..Self::search(fields, &query.search_term)
        }
    }

    /// Compile a search-only predicate over every field in `fields`.
    pub fn search(fields: &'f [FieldDescriptor], term: &str) -> Self {
        Self {
            searchable: fields.iter().map(|f| f.key.as_str()).collect(),
            term: (!term.is_empty()).then(|| term.to_lowercase()),
            filters: Vec::new(),
        }
    }

    /// Returns `true` if this predicate accepts every record.
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.filters.is_empty()
    }

    /// Returns the number of active per-field filters.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Test one record against the search term and every filter.
    pub fn matches<R: Fields + ?Sized>(&self, record: &R) -> bool {
        if let Some(term) = &self.term
            && !self
                .searchable
                .iter()
                .any(|key| field_contains(record, key, term))
        {
            return false;
        }

        self.filters
            .iter()
            .all(|(key, needle)| field_contains(record, key, needle))
    }
}

/// Case-insensitive substring test on one field. `needle` is lower-case.
///
/// A missing or null field contains nothing.
fn field_contains<R: Fields + ?Sized>(record: &R, key: &str, needle: &str) -> bool {
    match record.field(key) {
        Some(value) if !value.is_null() => value.as_text().to_lowercase().contains(needle),
        _ => false,
    }
}
