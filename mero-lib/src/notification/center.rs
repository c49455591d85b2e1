//! Notification center view.

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Local;
use chrono::TimeZone;
use serde::Deserialize;
use serde::Serialize;

use super::Notification;
use super::NotificationStore;
use super::Priority;
use super::Status;
use crate::model::FieldDescriptor;
use crate::query::Direction;
use crate::query::QueryState;
use crate::view::Group;
use crate::view::derive_at;

/// Which notifications to show by read state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl StatusFilter {
    fn accepts(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Unread => status == Status::Unread,
            StatusFilter::Read => status == Status::Read,
        }
    }
}

/// Filter controls of a notification panel.
///
/// Status, category and priority match exactly; `search` is the engine's
/// case-insensitive search over title, message, category, priority,
/// status and timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationFilter {
    pub status: StatusFilter,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub search: String,
}

impl NotificationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Test the exact-match parts of the filter.
    pub fn accepts(&self, notification: &Notification) -> bool {
        self.status.accepts(notification.status())
            && self
                .category
                .as_ref()
                .is_none_or(|c| *c == notification.category)
            && self.priority.is_none_or(|p| p == notification.priority)
    }
}

/// What a notification panel renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView<'a> {
    /// Date buckets, newest notification first within each.
    pub groups: Vec<Group<'a, Notification>>,
    /// Number of notifications passing the filter.
    pub total: usize,
    /// Unread notifications in the whole store, regardless of filter.
    pub unread_count: usize,
    /// Unread notifications per category, by category name.
    pub category_counts: Vec<(String, usize)>,
}

/// Field descriptors of [`Notification`] as seen by the engine.
pub fn notification_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("title").filterable(),
        FieldDescriptor::new("message").filterable(),
        FieldDescriptor::new("category").filterable().groupable(),
        FieldDescriptor::new("priority").filterable(),
        FieldDescriptor::new("status").filterable(),
        FieldDescriptor::new("timestamp").sortable().groupable(),
    ]
}

/// Derives notification panel views.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    fields: Vec<FieldDescriptor>,
    date_format: Option<String>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            fields: notification_fields(),
            date_format: None,
        }
    }

    /// Set the strftime format of literal date bucket labels.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Derive the view against the local clock.
    pub fn view<'a>(
        &self,
        store: &'a NotificationStore,
        filter: &NotificationFilter,
    ) -> NotificationView<'a> {
        self.view_at(store, filter, &Local::now())
    }

    /// Derive the view with date buckets relative to `now`.
    pub fn view_at<'a, Tz: TimeZone>(
        &self,
        store: &'a NotificationStore,
        filter: &NotificationFilter,
        now: &DateTime<Tz>,
    ) -> NotificationView<'a> {
        let mut query = QueryState::new()
            .with_search(filter.search.as_str())
            .sorted_by("timestamp", Direction::Desc)
            .grouped_by_date("timestamp");
        query.date_format = self.date_format.clone();

        let candidates = store.iter().filter(|n| filter.accepts(n));
        let result = derive_at(candidates, &self.fields, &query, now);

        NotificationView {
            total: result.total_matched,
            groups: result.groups,
            unread_count: store.unread_count(),
            category_counts: unread_by_category(store),
        }
    }
}

fn unread_by_category(store: &NotificationStore) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for notification in store.iter().filter(|n| !n.read) {
        *counts.entry(notification.category.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| (category.to_string(), count))
        .collect()
}
