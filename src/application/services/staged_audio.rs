use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::AudioFormat;

/// Uploaded audio written to a temp file. The file is removed when this value
/// is dropped, including during unwinding.
pub struct StagedAudio {
    file: NamedTempFile,
}

impl StagedAudio {
    pub fn write(data: &[u8], format: AudioFormat) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("ielts-audio-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()?;
        file.write_all(data)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), bytes = data.len(), "Audio staged");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
