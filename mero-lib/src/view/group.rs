//! Grouping strategies.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Serialize;

use crate::model::Fields;

/// Label of the single group produced when grouping is disabled.
pub const ALL_GROUP: &str = "All";
/// Label for records whose group field is absent, null or not a date.
pub const OTHER_GROUP: &str = "Other";

pub const TODAY: &str = "Today";
pub const YESTERDAY: &str = "Yesterday";
pub const THIS_WEEK: &str = "This Week";

/// Default strftime format for literal date bucket labels, e.g. `May 1, 2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Fallback used when a caller-supplied date format cannot be rendered.
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Days back (inclusive) that still count as "This Week".
const WEEK_DAYS: i64 = 7;

/// A labelled run of records.
#[derive(Debug, PartialEq, Serialize)]
pub struct Group<'a, R> {
    pub label: String,
    pub records: Vec<&'a R>,
}

impl<R> Clone for Group<'_, R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            records: self.records.clone(),
        }
    }
}

impl<R> Group<'_, R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Accumulates groups in first-seen order of their label.
struct GroupBuilder<'a, R> {
    groups: Vec<Group<'a, R>>,
    index: HashMap<String, usize>,
}

impl<'a, R> GroupBuilder<'a, R> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn push(&mut self, label: String, record: &'a R) {
        match self.index.get(&label) {
            Some(&i) => self.groups[i].records.push(record),
            None => {
                self.index.insert(label.clone(), self.groups.len());
                self.groups.push(Group {
                    label,
                    records: vec![record],
                });
            }
        }
    }

    fn finish(self) -> Vec<Group<'a, R>> {
        self.groups
    }
}

/// A single group holding every record, or nothing when there are none.
pub(crate) fn single_group<'a, R>(records: &[&'a R]) -> Vec<Group<'a, R>> {
    if records.is_empty() {
        return Vec::new();
    }
    vec![Group {
        label: ALL_GROUP.to_string(),
        records: records.to_vec(),
    }]
}

/// One group per distinct stringified value of `key`, in first-seen order.
pub(crate) fn group_by_value<'a, R: Fields>(records: &[&'a R], key: &str) -> Vec<Group<'a, R>> {
    let mut builder = GroupBuilder::new();
    for &record in records {
        let label = match record.field(key) {
            Some(value) if !value.is_null() => value.as_text().into_owned(),
            _ => OTHER_GROUP.to_string(),
        };
        builder.push(label, record);
    }
    builder.finish()
}

/// Date buckets of the timestamp field `key`, relative to `now`.
///
/// Today, Yesterday and This Week come first in that order; every other
/// label follows in first-seen order.
pub(crate) fn group_by_date<'a, R, Tz>(
    records: &[&'a R],
    key: &str,
    now: &DateTime<Tz>,
    format: &str,
) -> Vec<Group<'a, R>>
where
    R: Fields,
    Tz: TimeZone,
{
    let mut builder = GroupBuilder::new();
    for &record in records {
        let label = match record.field(key).and_then(|v| v.as_datetime()) {
            Some(ts) => date_bucket(ts, now, format),
            None => OTHER_GROUP.to_string(),
        };
        builder.push(label, record);
    }

    let mut groups = builder.finish();
    // Stable: labels of equal priority keep their first-seen order.
    groups.sort_by_key(|group| bucket_priority(&group.label));
    groups
}

fn bucket_priority(label: &str) -> u8 {
    match label {
        TODAY => 0,
        YESTERDAY => 1,
        THIS_WEEK => 2,
        _ => 3,
    }
}

/// Bucket label of a timestamp relative to `now`.
///
/// Days are calendar days in `now`'s time zone. Same day is `Today`, the
/// previous day `Yesterday`, two to seven days back `This Week`; anything
/// else, including future days, is the date formatted with `format`.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mero_lib::view::{date_bucket, DEFAULT_DATE_FORMAT};
///
/// let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
/// let ts = Utc.with_ymd_and_hms(2024, 6, 9, 23, 0, 0).unwrap();
/// assert_eq!(date_bucket(ts, &now, DEFAULT_DATE_FORMAT), "Yesterday");
/// ```
pub fn date_bucket<Tz: TimeZone>(ts: DateTime<Utc>, now: &DateTime<Tz>, format: &str) -> String {
    let today = now.date_naive();
    let day = ts.with_timezone(&now.timezone()).date_naive();

    match today.signed_duration_since(day).num_days() {
        0 => TODAY.to_string(),
        1 => YESTERDAY.to_string(),
        2..=WEEK_DAYS => THIS_WEEK.to_string(),
        _ => {
            let mut label = String::new();
            if write!(label, "{}", day.format(format)).is_err() {
                log::warn!("invalid date format {:?}, using {}", format, FALLBACK_DATE_FORMAT);
                label = day.format(FALLBACK_DATE_FORMAT).to_string();
            }
            label
        }
    }
}
