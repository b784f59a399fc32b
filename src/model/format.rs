use serde::{Deserialize, Serialize};
use std::fmt;

/// Container/codec tag reported for a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioFormat {
    #[serde(rename = "m4a")]
    M4a,
    #[serde(rename = "wav")]
    Wav,
    #[serde(rename = "3gp")]
    ThreeGp,
    #[serde(rename = "3gpp")]
    ThreeGpp,
    #[serde(rename = "mp3")]
    Mp3,
    #[serde(rename = "amr")]
    Amr,
    #[serde(rename = "aac")]
    Aac,
    #[serde(rename = "mp4")]
    Mp4,
    #[serde(rename = "ogg")]
    Ogg,
    #[serde(rename = "flac")]
    Flac,
}

/// One row of the format matching table.
///
/// A row matches when the lowercased file name contains the tag, or when the
/// media type is an audio type containing `media_hint`.
struct FormatRule {
    format: AudioFormat,
    media_hint: Option<&'static str>,
}

/// Matching order; first hit wins.
const FORMAT_RULES: &[FormatRule] = &[
    FormatRule { format: AudioFormat::M4a, media_hint: Some("mp4a") },
    FormatRule { format: AudioFormat::Wav, media_hint: Some("raw") },
    FormatRule { format: AudioFormat::ThreeGp, media_hint: Some("3gpp") },
    FormatRule { format: AudioFormat::ThreeGpp, media_hint: None },
    FormatRule { format: AudioFormat::Mp3, media_hint: Some("mpeg") },
    FormatRule { format: AudioFormat::Amr, media_hint: None },
    FormatRule { format: AudioFormat::Aac, media_hint: None },
    FormatRule { format: AudioFormat::Mp4, media_hint: None },
    FormatRule { format: AudioFormat::Ogg, media_hint: None },
    FormatRule { format: AudioFormat::Flac, media_hint: Some("flac") },
];

impl FormatRule {
    fn matches(&self, name: &str, media_type: Option<&str>) -> bool {
        if name.contains(self.format.tag()) {
            return true;
        }
        match (self.media_hint, media_type) {
            (Some(hint), Some(mime)) => mime.contains("audio") && mime.contains(hint),
            _ => false,
        }
    }
}

impl AudioFormat {
    /// Short tag used in catalogs ("m4a", "wav", "3gp", ...)
    pub fn tag(&self) -> &'static str {
        match self {
            AudioFormat::M4a => "m4a",
            AudioFormat::Wav => "wav",
            AudioFormat::ThreeGp => "3gp",
            AudioFormat::ThreeGpp => "3gpp",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Amr => "amr",
            AudioFormat::Aac => "aac",
            AudioFormat::Mp4 => "mp4",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Flac => "flac",
        }
    }

    /// Resolve the format tag from a file name and the selected track's media type.
    ///
    /// The name is compared case-insensitively. Returns `None` when no rule
    /// matches, which callers report as an empty tag.
    pub fn detect(file_name: &str, media_type: Option<&str>) -> Option<AudioFormat> {
        let name = file_name.to_lowercase();
        FORMAT_RULES
            .iter()
            .find(|rule| rule.matches(&name, media_type))
            .map(|rule| rule.format)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
