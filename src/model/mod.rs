//! Data model for probed recordings
//!
//! These types are independent of the container backend used to read them.

mod format;
mod record;

pub use format::AudioFormat;
pub use record::{ProbeStatus, RecordInfo};
