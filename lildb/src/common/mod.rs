//! Common types shared across LilDb: the [Value] model, field paths, constants and
//! small utilities.

mod constants;
mod field_path;
mod sort_order;
pub mod stream;
mod util;
mod value;

pub use constants::*;
pub use field_path::*;
pub use sort_order::*;
pub use util::*;
pub use value::*;
