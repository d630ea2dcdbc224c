use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
    Flac,
    Ogg,
    Webm,
    Mp4,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 7] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::M4a,
        AudioFormat::Flac,
        AudioFormat::Ogg,
        AudioFormat::Webm,
        AudioFormat::Mp4,
    ];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "m4a" => Some(Self::M4a),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }

    /// Resolves the format from an upload filename. A filename without an
    /// extension is treated as WAV; an unknown extension is returned as the error.
    pub fn from_filename(filename: &str) -> Result<Self, String> {
        match Path::new(filename).extension().and_then(|e| e.to_str()) {
            None => Ok(Self::Wav),
            Some(ext) => Self::from_extension(ext).ok_or_else(|| format!(".{}", ext.to_lowercase())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::Mp4 => "mp4",
        }
    }

    pub fn supported_extensions() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|f| format!(".{}", f.extension()))
            .collect()
    }
}
