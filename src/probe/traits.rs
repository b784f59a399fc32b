//! Container reader trait and the stream facts it produces

use anyhow::Result;
use std::path::Path;

/// Container reader trait - allows swapping the demuxing backend
pub trait StreamReader {
    /// Read the first audio track of the container at `path`.
    ///
    /// `Ok(None)` means the container was read but holds no audio track.
    /// Any `Err` is treated as a probe failure and degrades the record.
    fn read_stream(&self, path: &Path, extension_hint: Option<&str>) -> Result<Option<StreamInfo>>;
}

/// Facts about the selected audio track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    /// Media type string, e.g. `audio/mp4a-latm`
    pub media_type: String,

    pub channel_count: u32,

    pub sample_rate_hz: u32,

    /// Bits per second, 0 if unknown
    pub bitrate_bps: u32,

    pub duration_micros: u64,
}
