//! The list view engine.
//!
//! [`derive`] turns a record collection, its field descriptors and a
//! [`QueryState`] into a [`ViewResult`]:
//!
//! 1. search and per-field filters ([`Criteria`])
//! 2. stable sort on the sort key
//! 3. grouping by value or by date bucket
//! 4. pagination of the flat sorted sequence
//!
//! Every step is skipped when the query does not ask for it or the field
//! descriptor does not allow it.

mod compare;
mod group;

use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;
use log::debug;
use log::trace;
use serde::Serialize;

use crate::model::FieldDescriptor;
use crate::model::Fields;
use crate::query::Criteria;
use crate::query::Direction;
use crate::query::Grouping;
use crate::query::QueryState;
use compare::SortKey;

pub use group::ALL_GROUP;
pub use group::DEFAULT_DATE_FORMAT;
pub use group::Group;
pub use group::OTHER_GROUP;
pub use group::THIS_WEEK;
pub use group::TODAY;
pub use group::YESTERDAY;
pub use group::date_bucket;

/// The render-ready slice of a record collection for one query.
///
/// Holds references into the records passed to [`derive`].
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResult<'a, R> {
    /// Number of records that passed search and filters.
    pub total_matched: usize,
    /// Every matched record, sorted.
    pub records: Vec<&'a R>,
    /// Matched records partitioned by the group key (a single `All` group
    /// when grouping is off). Not paginated.
    pub groups: Vec<Group<'a, R>>,
    /// The requested page of `records`.
    pub page_records: Vec<&'a R>,
    /// The page `page_records` was cut from (1-based).
    pub page: usize,
    /// Number of pages, at least 1.
    pub page_count: usize,
}

impl<R> ViewResult<'_, R> {
    /// Returns `true` if no record matched.
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }

    /// Returns `true` if a page follows the current one.
    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count
    }

    /// Returns the group labels in order.
    pub fn group_labels(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.label.as_str()).collect()
    }
}

/// Derive the view of `records` for `query`, bucketing dates against the
/// local clock.
///
/// # Example
///
/// ```
/// use mero_lib::derive;
/// use mero_lib::model::{FieldDescriptor, Record};
/// use mero_lib::query::{Direction, QueryState};
///
/// let records = vec![
///     Record::new().set("name", "Beta").set("score", 2i64),
///     Record::new().set("name", "Alpha").set("score", 10i64),
///     Record::new().set("name", "gamma").set("score", 1i64),
/// ];
/// let fields = vec![
///     FieldDescriptor::new("name").filterable(),
///     FieldDescriptor::new("score").sortable(),
/// ];
/// let query = QueryState::new()
///     .with_search("a")
///     .sorted_by("score", Direction::Desc)
///     .with_page_size(2);
///
/// let view = derive(&records, &fields, &query);
/// assert_eq!(view.total_matched, 3);
/// assert_eq!(view.page_count, 2);
/// assert_eq!(view.page_records[0].get_string("name").unwrap(), Some("Alpha"));
/// ```
pub fn derive<'a, R, I>(records: I, fields: &[FieldDescriptor], query: &QueryState) -> ViewResult<'a, R>
where
    R: Fields + 'a,
    I: IntoIterator<Item = &'a R>,
{
    derive_at(records, fields, query, &Local::now())
}

/// Derive the view of `records` for `query`, bucketing dates against `now`.
///
/// Days for date grouping are calendar days in `now`'s time zone.
pub fn derive_at<'a, R, I, Tz>(
    records: I,
    fields: &[FieldDescriptor],
    query: &QueryState,
    now: &DateTime<Tz>,
) -> ViewResult<'a, R>
where
    R: Fields + 'a,
    I: IntoIterator<Item = &'a R>,
    Tz: TimeZone,
{
    let criteria = Criteria::new(fields, query);
    let mut matched: Vec<&'a R> = if criteria.is_empty() {
        records.into_iter().collect()
    } else {
        records.into_iter().filter(|r| criteria.matches(*r)).collect()
    };
    debug!(
        "derive: {} matched ({} filters, search {:?})",
        matched.len(),
        criteria.filter_count(),
        query.search_term
    );

    if let Some(key) = allowed(fields, query.sort_key.as_deref(), |f| f.sortable) {
        sort_records(&mut matched, key, query.sort_direction);
    }

    let groups = match allowed(fields, query.group_key.as_deref(), |f| f.groupable) {
        None => group::single_group(&matched),
        Some(key) => match query.grouping {
            Grouping::Value => group::group_by_value(&matched, key),
            Grouping::Date => {
                let format = query.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
                group::group_by_date(&matched, key, now, format)
            }
        },
    };
    trace!("derive: {} groups", groups.len());

    let pagination = query.pagination();
    let range = pagination.range(matched.len());
    let page_records = matched[range].to_vec();

    ViewResult {
        total_matched: matched.len(),
        page_count: pagination.page_count(matched.len()),
        page: pagination.page(),
        page_records,
        groups,
        records: matched,
    }
}

/// Resolve a query key to a field that allows the operation.
///
/// Unknown keys and disallowed operations resolve to `None`.
fn allowed<'k>(
    fields: &[FieldDescriptor],
    key: Option<&'k str>,
    permits: impl Fn(&FieldDescriptor) -> bool,
) -> Option<&'k str> {
    let key = key?;
    match fields.iter().find(|f| f.key == key) {
        Some(field) if permits(field) => Some(key),
        _ => {
            debug!("derive: ignoring operation on field {:?}", key);
            None
        }
    }
}

/// Stable sort by one field.
///
/// Keys are read once per record, then sorted with the direction applied to
/// the comparator so ties keep their input order.
fn sort_records<R: Fields>(records: &mut Vec<&R>, key: &str, direction: Direction) {
    let mut keyed: Vec<(SortKey, &R)> = records
        .iter()
        .map(|&record| (SortKey::of(record.field(key).as_deref()), record))
        .collect();
    keyed.sort_by(|a, b| direction.apply(a.0.cmp(&b.0)));
    *records = keyed.into_iter().map(|(_, record)| record).collect();
}
