//! Notification store and notification center view.
//!
//! [`NotificationStore`] holds the notifications of one session: push,
//! mark read, dismiss. [`NotificationCenter`] derives what a notification
//! panel shows: status/category/priority filters, search, date buckets and
//! unread counts.

mod center;
mod item;
mod store;

pub use center::*;
pub use item::*;
pub use store::*;
