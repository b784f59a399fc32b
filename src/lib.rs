//! Recording Probe - metadata and waveforms for voice recordings
//!
//! This library probes recorded audio files into catalog entries and reduces
//! captured amplitude samples into display-width waveforms.

pub mod model;
pub mod probe;
pub mod waveform;

pub use model::{AudioFormat, ProbeStatus, RecordInfo};
pub use probe::{probe, ProbeError, Prober};
pub use waveform::{reduce, Reducer, ReducerConfig, WaveformBuffer};
