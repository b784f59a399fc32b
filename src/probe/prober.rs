//! Recording metadata prober

use super::container::SymphoniaReader;
use super::extension::{self, ExtensionKind};
use super::traits::{StreamInfo, StreamReader};
use crate::model::{AudioFormat, ProbeStatus, RecordInfo};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a path yields no [`RecordInfo`]
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("unsupported extension: {0:?}")]
    UnsupportedExtension(PathBuf),

    #[error("no audio track in {0:?}")]
    NoAudioTrack(PathBuf),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File system facts that survive a failed container read
struct FileFacts {
    display_name: String,
    file_name: String,
    absolute_path: PathBuf,
    file_size_bytes: u64,
    last_modified_millis: i64,
    is_trashed: bool,
}

impl FileFacts {
    fn read(path: &Path, kind: ExtensionKind) -> Result<Self, ProbeError> {
        let io_err = |source| ProbeError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(path).map_err(io_err)?;
        let absolute_path = std::fs::canonicalize(path).map_err(io_err)?;
        let modified: DateTime<Utc> = metadata.modified().map_err(io_err)?.into();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            display_name: extension::display_name(&file_name),
            file_name,
            absolute_path,
            file_size_bytes: metadata.len(),
            last_modified_millis: modified.timestamp_millis(),
            is_trashed: kind == ExtensionKind::Trash,
        })
    }

    fn into_record(self, stream: Option<StreamInfo>, status: ProbeStatus) -> RecordInfo {
        let stream = stream.unwrap_or_default();
        let format = match status {
            ProbeStatus::Complete => {
                AudioFormat::detect(&self.file_name, Some(stream.media_type.as_str()))
            }
            ProbeStatus::Degraded { .. } => None,
        };

        RecordInfo {
            display_name: self.display_name,
            format,
            duration_micros: stream.duration_micros,
            file_size_bytes: self.file_size_bytes,
            absolute_path: self.absolute_path,
            last_modified_millis: self.last_modified_millis,
            sample_rate_hz: stream.sample_rate_hz,
            channel_count: stream.channel_count,
            bitrate_bps: stream.bitrate_bps,
            is_trashed: self.is_trashed,
            status,
        }
    }
}

/// Probes recording files into [`RecordInfo`] entries.
///
/// Stateless: one prober can serve any number of concurrent calls as long as
/// its reader is `Sync`.
pub struct Prober<R = SymphoniaReader> {
    reader: R,
}

impl Prober<SymphoniaReader> {
    pub fn new() -> Self {
        Self {
            reader: SymphoniaReader::new(),
        }
    }
}

impl Default for Prober<SymphoniaReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StreamReader> Prober<R> {
    /// Use a different container reader
    pub fn with_reader<T: StreamReader>(self, reader: T) -> Prober<T> {
        Prober { reader }
    }

    /// Probe a recording, returning `None` for anything that is not one.
    ///
    /// Container read failures do not count: they produce a degraded record.
    pub fn probe(&self, path: &Path) -> Option<RecordInfo> {
        match self.inspect(path) {
            Ok(info) => Some(info),
            Err(e) => {
                log::debug!("Skipping {:?}: {}", path, e);
                None
            }
        }
    }

    /// Probe a recording, reporting why a path was rejected
    pub fn inspect(&self, path: &Path) -> Result<RecordInfo, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::NotFound(path.to_path_buf()));
        }

        let kind = extension::classify(path)
            .ok_or_else(|| ProbeError::UnsupportedExtension(path.to_path_buf()))?;

        let facts = FileFacts::read(path, kind)?;
        let hint = extension::audio_extension_hint(&facts.file_name);

        match self.reader.read_stream(path, hint) {
            Ok(Some(stream)) => Ok(facts.into_record(Some(stream), ProbeStatus::Complete)),
            Ok(None) => Err(ProbeError::NoAudioTrack(path.to_path_buf())),
            Err(e) => {
                log::warn!("Metadata unavailable for {:?}: {:#}", path, e);
                let reason = format!("{:#}", e);
                Ok(facts.into_record(None, ProbeStatus::Degraded { reason }))
            }
        }
    }
}

/// Probe a recording with the default container reader
pub fn probe(path: &Path) -> Option<RecordInfo> {
    Prober::new().probe(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    /// Reader returning canned results instead of parsing containers
    struct FixedReader(fn() -> Result<Option<StreamInfo>>);

    impl StreamReader for FixedReader {
        fn read_stream(&self, _path: &Path, _hint: Option<&str>) -> Result<Option<StreamInfo>> {
            (self.0)()
        }
    }

    fn aac_stream() -> Result<Option<StreamInfo>> {
        Ok(Some(StreamInfo {
            media_type: "audio/mp4a-latm".to_string(),
            channel_count: 2,
            sample_rate_hz: 44_100,
            bitrate_bps: 128_000,
            duration_micros: 42_000_000,
        }))
    }

    fn write_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"0123456789").expect("Failed to write test file");
        path
    }

    #[test]
    fn test_complete_record() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "Interview.MP4");
        let prober = Prober::new().with_reader(FixedReader(aac_stream));

        let info = prober.inspect(&path).unwrap();

        assert_eq!(info.display_name, "Interview");
        // "mp4a" media type outranks the "mp4" name hint
        assert_eq!(info.format, Some(AudioFormat::M4a));
        assert_eq!(info.sample_rate_hz, 44_100);
        assert_eq!(info.channel_count, 2);
        assert_eq!(info.bitrate_bps, 128_000);
        assert_eq!(info.duration_micros, 42_000_000);
        assert_eq!(info.file_size_bytes, 10);
        assert!(info.absolute_path.is_absolute());
        assert!(!info.is_trashed);
        assert_eq!(info.status, ProbeStatus::Complete);
    }

    #[test]
    fn test_reader_failure_degrades() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "memo.aac.del");
        let prober =
            Prober::new().with_reader(FixedReader(|| Err(anyhow::anyhow!("truncated header"))));

        let info = prober.probe(&path).expect("degraded record expected");

        assert_eq!(info.display_name, "memo");
        assert!(info.is_trashed);
        assert_eq!(info.format, None);
        assert_eq!(info.sample_rate_hz, 0);
        assert_eq!(info.channel_count, 0);
        assert_eq!(info.bitrate_bps, 0);
        assert_eq!(info.duration_micros, 0);
        assert_eq!(info.file_size_bytes, 10);
        assert!(matches!(
            info.status,
            ProbeStatus::Degraded { ref reason } if reason.contains("truncated header")
        ));
    }

    #[test]
    fn test_no_audio_track() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "video.mp4");
        let prober = Prober::new().with_reader(FixedReader(|| Ok(None)));

        assert!(matches!(prober.inspect(&path), Err(ProbeError::NoAudioTrack(_))));
        assert!(prober.probe(&path).is_none());
    }

    #[test]
    fn test_rejected_paths() {
        let dir = TempDir::new().unwrap();
        let prober = Prober::new().with_reader(FixedReader(aac_stream));

        let missing = dir.path().join("missing.mp3");
        assert!(matches!(prober.inspect(&missing), Err(ProbeError::NotFound(_))));

        let text = write_file(&dir, "notes.txt");
        assert!(matches!(
            prober.inspect(&text),
            Err(ProbeError::UnsupportedExtension(_))
        ));

        let bare = write_file(&dir, "recording");
        assert!(prober.probe(&bare).is_none());
    }
}
