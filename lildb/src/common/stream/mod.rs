//! Result shaping over matched documents: sorting, grouping and projection.

mod grouped_stream;
mod projected_stream;
mod sorted_stream;

pub use grouped_stream::*;
pub use projected_stream::*;
pub(crate) use sorted_stream::*;
