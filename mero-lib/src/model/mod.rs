//! Record model

mod fields;
mod record;
mod value;

pub use fields::*;
pub use record::*;
pub use value::*;
