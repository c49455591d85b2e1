//! Error types

mod field;
mod notification;
mod query;

pub use field::*;
pub use notification::*;
pub use query::*;
