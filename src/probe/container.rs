//! Container inspection backed by symphonia (tracks) and lofty (properties)

use super::traits::{StreamInfo, StreamReader};
use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::codecs::{self, CodecParameters, CodecType};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Media type strings for the codecs symphonia can identify
const MEDIA_TYPES: &[(CodecType, &str)] = &[
    (codecs::CODEC_TYPE_AAC, "audio/mp4a-latm"),
    (codecs::CODEC_TYPE_MP3, "audio/mpeg"),
    (codecs::CODEC_TYPE_MP2, "audio/mpeg-L2"),
    (codecs::CODEC_TYPE_MP1, "audio/mpeg-L1"),
    (codecs::CODEC_TYPE_FLAC, "audio/flac"),
    (codecs::CODEC_TYPE_VORBIS, "audio/vorbis"),
    (codecs::CODEC_TYPE_OPUS, "audio/opus"),
    (codecs::CODEC_TYPE_ALAC, "audio/alac"),
    (codecs::CODEC_TYPE_PCM_ALAW, "audio/g711-alaw"),
    (codecs::CODEC_TYPE_PCM_MULAW, "audio/g711-mlaw"),
    (codecs::CODEC_TYPE_PCM_U8, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S8, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S16LE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S16BE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S24LE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S24BE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S32LE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_S32BE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_F32LE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_F32BE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_F64LE, "audio/raw"),
    (codecs::CODEC_TYPE_PCM_F64BE, "audio/raw"),
];

/// Media type of a track, `None` for tracks without a known codec
fn media_type(codec: CodecType) -> Option<String> {
    if codec == codecs::CODEC_TYPE_NULL {
        return None;
    }
    let known = MEDIA_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == codec)
        .map(|(_, mime)| (*mime).to_string());

    // Symphonia only exposes audio tracks, so unknown codecs are still audio
    Some(known.unwrap_or_else(|| format!("audio/x-{}", codec_short_name(codec))))
}

fn codec_short_name(codec: CodecType) -> &'static str {
    symphonia::default::get_codecs()
        .get_codec(codec)
        .map(|descriptor| descriptor.short_name)
        .unwrap_or("unknown")
}

/// Duration from frame count and time base, falling back to the sample rate.
///
/// Header values that overflow a microsecond count are treated as unknown.
fn duration_micros(params: &CodecParameters) -> Option<u64> {
    let n_frames = params.n_frames?;
    if let Some(time_base) = params.time_base {
        let time = time_base.calc_time(n_frames);
        return time
            .seconds
            .checked_mul(1_000_000)?
            .checked_add((time.frac * 1_000_000.0) as u64);
    }
    let sample_rate = params.sample_rate.filter(|&rate| rate > 0)?;
    u64::try_from(n_frames as u128 * 1_000_000 / sample_rate as u128).ok()
}

/// Audio properties reported by lofty
#[derive(Debug, Default)]
struct Properties {
    bitrate_bps: Option<u32>,
    duration_micros: Option<u64>,
}

fn read_properties(path: &Path) -> Result<Properties> {
    use lofty::prelude::*;

    let tagged_file = lofty::probe::Probe::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open file for properties: {}", e))?
        .guess_file_type()
        .with_context(|| format!("Failed to guess file type: {:?}", path))?
        .read()
        .map_err(|e| anyhow::anyhow!("Failed to read properties: {}", e))?;

    let properties = tagged_file.properties();
    let duration = properties.duration();

    Ok(Properties {
        bitrate_bps: properties
            .audio_bitrate()
            .filter(|&kbps| kbps > 0)
            .map(|kbps| kbps.saturating_mul(1000)),
        duration_micros: (!duration.is_zero()).then(|| duration.as_micros() as u64),
    })
}

/// Reads the first audio track with symphonia, filling gaps from lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaReader;

impl SymphoniaReader {
    pub fn new() -> Self {
        Self
    }
}

impl StreamReader for SymphoniaReader {
    fn read_stream(&self, path: &Path, extension_hint: Option<&str>) -> Result<Option<StreamInfo>> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open audio file: {:?}", path))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .with_context(|| format!("Failed to probe audio format: {:?}", path))?;

        let selected = probed.format.tracks().iter().find_map(|track| {
            media_type(track.codec_params.codec).map(|mime| (mime, track.codec_params.clone()))
        });

        // The format reader (and its file handle) is released here
        drop(probed);

        let Some((media_type, params)) = selected else {
            return Ok(None);
        };

        let properties = match read_properties(path) {
            Ok(properties) => properties,
            Err(e) => {
                log::debug!("No container properties for {:?}: {:#}", path, e);
                Properties::default()
            }
        };

        let info = StreamInfo {
            media_type,
            channel_count: params.channels.map(|c| c.count() as u32).unwrap_or(0),
            sample_rate_hz: params.sample_rate.unwrap_or(0),
            bitrate_bps: properties.bitrate_bps.unwrap_or(0),
            duration_micros: duration_micros(&params)
                .or(properties.duration_micros)
                .unwrap_or(0),
        };

        log::debug!("Selected audio track in {:?}: {:?}", path, info);

        Ok(Some(info))
    }
}
