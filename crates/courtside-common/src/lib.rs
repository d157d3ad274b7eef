pub mod format;
pub mod id;

pub use format::{format_cost, format_duration, format_secs};
pub use id::{new_id, SessionId};
