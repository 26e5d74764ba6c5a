mod id_utils;
mod task_util;

pub use id_utils::*;
pub use task_util::*;
