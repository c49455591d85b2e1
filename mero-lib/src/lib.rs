//! List view engine
//!
//! Derives the visible slice of an in-memory record collection: free-text
//! search, per-field filters, stable sorting, grouping (by value or by date
//! bucket) and pagination. The engine is a pure function of its inputs; the
//! caller owns the [`QueryState`](query::QueryState) and re-derives whenever
//! it changes.

pub mod error;
pub mod model;
pub mod notification;
pub mod palette;
pub mod query;
pub mod tree;
pub mod view;

pub use view::Group;
pub use view::ViewResult;
pub use view::derive;
pub use view::derive_at;
