use super::format::AudioFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog entry describing one recording file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInfo {
    /// File name with the recognized audio and/or trash extension stripped
    pub display_name: String,

    /// Container/codec tag, `None` when undetermined
    pub format: Option<AudioFormat>,

    /// Stream duration in microseconds (0 if unknown)
    pub duration_micros: u64,

    /// Size on disk in bytes
    pub file_size_bytes: u64,

    /// Resolved absolute path
    pub absolute_path: PathBuf,

    /// Last modification time in milliseconds since the Unix epoch
    pub last_modified_millis: i64,

    /// Sample rate in Hz (0 if unknown)
    pub sample_rate_hz: u32,

    /// Channel count (0 if unknown)
    pub channel_count: u32,

    /// Bitrate in bits per second (0 if unknown)
    pub bitrate_bps: u32,

    /// Whether the file carries the trash marker extension
    pub is_trashed: bool,

    /// Whether the stream fields were actually read
    pub status: ProbeStatus,
}

/// Outcome of reading the container for a [`RecordInfo`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Stream fields come from the container
    Complete,

    /// The container could not be read; stream fields are zeroed
    Degraded { reason: String },
}

impl RecordInfo {
    /// Format tag as a string, empty when undetermined
    pub fn format_tag(&self) -> &'static str {
        self.format.map(|f| f.tag()).unwrap_or("")
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, ProbeStatus::Degraded { .. })
    }

    /// Duration in whole seconds, as used by the waveform reducer
    pub fn duration_secs(&self) -> u64 {
        self.duration_micros / 1_000_000
    }
}
