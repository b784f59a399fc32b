//! Recording metadata probing
//!
//! Turns a recording path into a [`RecordInfo`](crate::model::RecordInfo).
//! The container backend sits behind the [`StreamReader`] trait; the default
//! reader demuxes with symphonia and reads bitrate with lofty.
//!
//! Probing is best-effort: a file whose container cannot be read still yields
//! a record with zeroed stream fields, so one broken recording never aborts a
//! directory scan.

mod container;
pub mod extension;
mod prober;
mod traits;

pub use container::SymphoniaReader;
pub use prober::{probe, ProbeError, Prober};
pub use traits::{StreamInfo, StreamReader};
