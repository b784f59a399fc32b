//! Waveform generation for recording overlays
//!
//! Reduces captured amplitude samples to a fixed number of 0-255 columns for a
//! display of known width, and packs columns into signed bytes for storage.

mod buffer;
mod bytes;
mod config;
mod reduce;

pub use buffer::WaveformBuffer;
pub use bytes::{pack, unpack};
pub use config::ReducerConfig;
pub use reduce::{reduce, Reducer};
