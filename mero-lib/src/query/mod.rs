//! Query state and the predicates derived from it.
//!
//! - [`QueryState`] - Search, filter, sort, group and page parameters for one view
//! - [`Direction`] - Sort direction
//! - [`Grouping`] - Bucketing strategy used when a group key is set
//! - [`Criteria`] - The search and filter predicate compiled from a query
//! - [`Pagination`] - Page arithmetic over a matched sequence

mod criteria;
mod order;
mod page;
mod state;

pub use criteria::Criteria;
pub use order::Direction;
pub use page::Pagination;
pub use state::DEFAULT_PAGE_SIZE;
pub use state::Grouping;
pub use state::QueryState;
