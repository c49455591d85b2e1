//! Command palette: fuzzy-ranked commands with keyboard navigation.

mod command;
mod filter;
mod state;

pub use command::*;
pub use filter::FilterMatch;
pub use filter::MatchMode;
pub use filter::fuzzy_filter;
pub use filter::rank;
pub use filter::substring_filter;
pub use state::Palette;
