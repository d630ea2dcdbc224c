use axum::extract::Multipart;

use super::error::ApiError;

pub const AUDIO_FIELD: &str = "audio";

#[derive(Debug)]
pub struct AudioUpload {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Reads the `audio` field of a multipart body. A missing filename becomes an
/// empty string, which validation treats as wav.
pub async fn read_audio_field(mut multipart: Multipart) -> Result<AudioUpload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?.to_vec();

        tracing::debug!(filename = %filename, size_bytes = data.len(), "Received audio upload");

        return Ok(AudioUpload { filename, data });
    }

    Err(ApiError::validation(format!(
        "Missing multipart field '{}'",
        AUDIO_FIELD
    )))
}
