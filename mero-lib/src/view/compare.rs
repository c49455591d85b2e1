//! Ordering strategy for sorting by a field.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::Utc;

use crate::model::Value;

/// The sortable reading of a field value.
///
/// Numbers (and numeric strings) compare numerically, timestamps (and RFC 3339
/// strings) chronologically, everything else by its string representation.
/// The ranks `Missing < Number < Time < Text` make the order total: comparing
/// across kinds by rank keeps the comparison transitive, which a stable sort
/// relies on.
#[derive(Debug, Clone)]
pub(crate) enum SortKey {
    /// Absent or null field; sorts smallest.
    Missing,
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
}

impl SortKey {
    pub(crate) fn of(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return SortKey::Missing;
        };
        match value {
            Value::Null => SortKey::Missing,
            Value::DateTime(ts) => SortKey::Time(*ts),
            Value::String(s) => {
                if let Some(n) = value.as_number() {
                    SortKey::Number(n)
                } else if let Some(ts) = value.as_datetime() {
                    SortKey::Time(ts)
                } else {
                    SortKey::Text(s.clone())
                }
            }
            other => match other.as_number() {
                Some(n) => SortKey::Number(n),
                None => SortKey::Text(other.as_text().into_owned()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Time(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
