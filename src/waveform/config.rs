//! Waveform reduction configuration

/// Recordings longer than this many seconds are downsampled
pub const LONG_RECORDING_SECS: u32 = 20;

/// Columns per display pixel for long recordings
pub const OVERSAMPLE: f64 = 1.5;

/// Amplitude that maps to a full-height column
pub const FULL_SCALE: f64 = 32767.0;

/// Configuration for the waveform reducer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducerConfig {
    /// Durations strictly above this are downsampled to the display width
    pub long_recording_secs: u32,

    /// Output columns per pixel of target width
    pub oversample: f64,

    /// Sample value normalized to 255
    pub full_scale: f64,
}

impl ReducerConfig {
    pub fn new() -> Self {
        Self {
            long_recording_secs: LONG_RECORDING_SECS,
            oversample: OVERSAMPLE,
            full_scale: FULL_SCALE,
        }
    }

    /// Set the duration threshold for downsampling
    pub fn with_long_recording_secs(mut self, secs: u32) -> Self {
        self.long_recording_secs = secs;
        self
    }

    /// Set the columns-per-pixel factor
    pub fn with_oversample(mut self, factor: f64) -> Self {
        self.oversample = factor;
        self
    }

    /// Set the sample value drawn as a full-height column
    pub fn with_full_scale(mut self, full_scale: f64) -> Self {
        self.full_scale = full_scale;
        self
    }

    /// Number of output columns for a long recording on `target_width_px`
    pub fn column_count(&self, target_width_px: u32) -> usize {
        (self.oversample * target_width_px as f64).round().max(0.0) as usize
    }
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self::new()
    }
}
