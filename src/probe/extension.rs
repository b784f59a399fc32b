//! Extension vocabulary for recording files

use std::path::Path;

/// Playable audio extensions, matched case-insensitively
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "3gpp", "3gp", "amr", "aac", "m4a", "mp4", "ogg", "flac",
];

/// Marker extension of a soft-deleted recording
pub const TRASH_EXTENSION: &str = "del";

/// How a file name's extension classifies the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionKind {
    /// A recognized audio extension
    Audio,
    /// The trash marker
    Trash,
}

pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(ext))
}

pub fn is_trash_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case(TRASH_EXTENSION)
}

/// Classify a path by its last extension.
///
/// Returns `None` when there is no extension or it is neither a supported
/// audio extension nor the trash marker.
pub fn classify(path: &Path) -> Option<ExtensionKind> {
    let ext = path.extension()?.to_str()?;
    if is_trash_extension(ext) {
        Some(ExtensionKind::Trash)
    } else if is_supported_extension(ext) {
        Some(ExtensionKind::Audio)
    } else {
        None
    }
}

/// Split a trailing recognized extension off `name`.
fn strip_extension<'a>(name: &'a str, recognized: fn(&str) -> bool) -> Option<&'a str> {
    let (stem, ext) = name.rsplit_once('.')?;
    (!ext.is_empty() && recognized(ext)).then_some(stem)
}

/// File name without its recognized extension.
///
/// A trash marker is stripped together with a recognized audio extension in
/// front of it, so `memo.m4a.del` displays as `memo`. Unrecognized
/// extensions are kept.
pub fn display_name(file_name: &str) -> String {
    let name = strip_extension(file_name, is_trash_extension).unwrap_or(file_name);
    strip_extension(name, is_supported_extension)
        .unwrap_or(name)
        .to_string()
}

/// Extension to hand to the container probe as a hint, skipping the trash marker
pub fn audio_extension_hint(file_name: &str) -> Option<&str> {
    let name = strip_extension(file_name, is_trash_extension).unwrap_or(file_name);
    let (_, ext) = name.rsplit_once('.')?;
    is_supported_extension(ext).then_some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(Path::new("a/memo.MP3")), Some(ExtensionKind::Audio));
        assert_eq!(classify(Path::new("memo.3gpp")), Some(ExtensionKind::Audio));
        assert_eq!(classify(Path::new("memo.wav.DEL")), Some(ExtensionKind::Trash));
        assert_eq!(classify(Path::new("memo.txt")), None);
        assert_eq!(classify(Path::new("memo")), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("memo.mp3"), "memo");
        assert_eq!(display_name("memo.m4a.del"), "memo");
        assert_eq!(display_name("memo.del"), "memo");
        assert_eq!(display_name("take.2.flac"), "take.2");
        assert_eq!(display_name("notes.txt"), "notes.txt");
        assert_eq!(display_name("memo"), "memo");
        assert_eq!(display_name("memo."), "memo.");
    }

    #[test]
    fn test_audio_extension_hint() {
        assert_eq!(audio_extension_hint("memo.wav.del"), Some("wav"));
        assert_eq!(audio_extension_hint("memo.Ogg"), Some("Ogg"));
        assert_eq!(audio_extension_hint("memo.del"), None);
    }
}
