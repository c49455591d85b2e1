//! Notification item.

use std::borrow::Cow;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::model::Fields;
use crate::model::Value;

/// Default category for notifications created without one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Notification priority, lowest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Read state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unread,
    Read,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unread => "unread",
            Status::Read => "read",
        }
    }
}

/// A single notification.
///
/// # Example
///
/// ```
/// use mero_lib::notification::{Notification, Priority};
///
/// let n = Notification::new("Build failed", "main is red")
///     .with_category("ci")
///     .with_priority(Priority::High);
/// assert!(!n.read);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification stamped with the current time.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            category: DEFAULT_CATEGORY.to_string(),
            priority: Priority::default(),
            read: false,
            timestamp: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn status(&self) -> Status {
        if self.read { Status::Read } else { Status::Unread }
    }
}

impl Fields for Notification {
    fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        let value = match key {
            "id" => Value::String(self.id.to_string()),
            "title" => Value::from(self.title.as_str()),
            "message" => Value::from(self.message.as_str()),
            "category" => Value::from(self.category.as_str()),
            "priority" => Value::from(self.priority.as_str()),
            "status" => Value::from(self.status().as_str()),
            "timestamp" => Value::DateTime(self.timestamp),
            _ => return None,
        };
        Some(Cow::Owned(value))
    }
}
