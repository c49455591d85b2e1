//! Query state for one view.

use std::collections::BTreeMap;

use chrono::format::Item;
use chrono::format::StrftimeItems;
use serde::Deserialize;
use serde::Serialize;

use super::Direction;
use super::Pagination;
use crate::error::Operation;
use crate::error::QueryError;
use crate::model::FieldDescriptor;
use crate::model::find_field;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// How records are bucketed when a group key is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// One group per distinct stringified value, in first-seen order.
    #[default]
    Value,
    /// Today / Yesterday / This Week / literal date buckets of a timestamp field.
    Date,
}

/// The search, filter, sort, group and page parameters of one view.
///
/// Plain data: the caller owns it, changes it in response to user input and
/// passes it to [`derive`](crate::view::derive) again. Serializes with
/// camelCase keys; every key is optional when deserializing.
///
/// # Example
///
/// ```
/// use mero_lib::query::{Direction, QueryState};
///
/// let query = QueryState::new()
///     .with_search("alp")
///     .with_filter("status", "active")
///     .sorted_by("name", Direction::Desc)
///     .with_page_size(25);
///
/// assert_eq!(query.page, 1);
/// assert!(query.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryState {
    /// Free-text search.
    ///
    /// Covers the fields named by the descriptors passed to `derive`, not
    /// every field a record happens to carry. Describe a field to make it
    /// searchable; its capability flags do not matter.
    pub search_term: String,
    /// Per-field substring filters, ANDed together.
    pub field_filters: BTreeMap<String, String>,
    pub sort_key: Option<String>,
    pub sort_direction: Direction,
    pub group_key: Option<String>,
    pub grouping: Grouping,
    /// strftime format for literal date bucket labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            field_filters: BTreeMap::new(),
            sort_key: None,
            sort_direction: Direction::Asc,
            group_key: None,
            grouping: Grouping::Value,
            date_format: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Create a query that matches everything, unsorted, ungrouped, page 1.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Set the free-text search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Add a per-field filter.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    /// Sort by a field.
    pub fn sorted_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort_key = Some(field.into());
        self.sort_direction = direction;
        self
    }

    /// Group by the distinct values of a field.
    pub fn grouped_by(mut self, field: impl Into<String>) -> Self {
        self.group_key = Some(field.into());
        self.grouping = Grouping::Value;
        self
    }

    /// Group by date buckets of a timestamp field.
    pub fn grouped_by_date(mut self, field: impl Into<String>) -> Self {
        self.group_key = Some(field.into());
        self.grouping = Grouping::Date;
        self
    }

    /// Set the strftime format of literal date bucket labels.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Select a 1-based page.
    pub fn at_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    // -------------------------------------------------------------------------
    // Interaction
    //
    // Anything that changes the matched set returns to the first page.
    // -------------------------------------------------------------------------

    /// Replace the search term and return to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Set or clear (empty value) a per-field filter and return to page 1.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let field = field.into();
        if value.is_empty() {
            self.field_filters.remove(&field);
        } else {
            self.field_filters.insert(field, value);
        }
        self.page = 1;
    }

    /// Remove the search term and every filter.
    pub fn clear_filters(&mut self) {
        self.search_term.clear();
        self.field_filters.clear();
        self.page = 1;
    }

    /// Column-header style sort toggle.
    ///
    /// A new key sorts ascending; the current key flips direction.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_key.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.reverse();
        } else {
            self.sort_key = Some(field.to_string());
            self.sort_direction = Direction::Asc;
        }
    }

    /// Returns the page request, with zero page or page size read as 1.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }

    /// Returns `true` if search or any non-empty filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty() || self.field_filters.values().any(|v| !v.is_empty())
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Check the query's own values.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page == 0 {
            return Err(QueryError::ZeroPage);
        }
        if self.page_size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        if let Some(format) = &self.date_format
            && StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
        {
            return Err(QueryError::InvalidDateFormat {
                format: format.clone(),
            });
        }
        Ok(())
    }

    /// List every operation that derivation will skip for these fields.
    pub fn ignored_operations(&self, fields: &[FieldDescriptor]) -> Vec<QueryError> {
        let mut problems = Vec::new();

        let mut check = |key: &str, operation: Operation| match find_field(fields, key) {
            None => problems.push(QueryError::unknown_field(key)),
            Some(field) => {
                let allowed = match operation {
                    Operation::Sort => field.sortable,
                    Operation::Filter => field.filterable,
                    Operation::Group => field.groupable,
                };
                if !allowed {
                    problems.push(QueryError::not_allowed(key, operation));
                }
            }
        };

        if let Some(key) = &self.sort_key {
            check(key, Operation::Sort);
        }
        for (key, value) in &self.field_filters {
            if !value.is_empty() {
                check(key, Operation::Filter);
            }
        }
        if let Some(key) = &self.group_key {
            check(key, Operation::Group);
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial() {
        let query: QueryState =
            serde_json::from_str(r#"{"searchTerm":"a","sortDirection":"desc"}"#).unwrap();
        assert_eq!(query.search_term, "a");
        assert_eq!(query.sort_direction, Direction::Desc);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = QueryState::new();
        query.toggle_sort("name");
        assert_eq!(query.sort_direction, Direction::Asc);
        query.toggle_sort("name");
        assert_eq!(query.sort_direction, Direction::Desc);
        query.toggle_sort("age");
        assert_eq!(query.sort_key.as_deref(), Some("age"));
        assert_eq!(query.sort_direction, Direction::Asc);
    }

    #[test]
    fn test_set_filter_resets_page() {
        let mut query = QueryState::new().at_page(4);
        query.set_filter("name", "al");
        assert_eq!(query.page, 1);
        query.set_filter("name", "");
        assert!(query.field_filters.is_empty());
    }

    #[test]
    fn test_validate() {
        assert_eq!(QueryState::new().at_page(0).validate(), Err(QueryError::ZeroPage));
        assert_eq!(
            QueryState::new().with_page_size(0).validate(),
            Err(QueryError::ZeroPageSize)
        );
        assert!(matches!(
            QueryState::new().with_date_format("%Q").validate(),
            Err(QueryError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_ignored_operations() {
        let fields = vec![
            FieldDescriptor::new("name").sortable(),
            FieldDescriptor::new("status"),
        ];
        let query = QueryState::new()
            .sorted_by("name", Direction::Asc)
            .with_filter("status", "x")
            .grouped_by("missing");
        assert_eq!(
            query.ignored_operations(&fields),
            vec![
                QueryError::not_allowed("status", Operation::Filter),
                QueryError::unknown_field("missing"),
            ]
        );
    }
}
