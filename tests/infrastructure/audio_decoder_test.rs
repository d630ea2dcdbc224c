use std::io::Write;

use ielts_scoring::application::ports::{AudioDecoder, AudioDecoderError};
use ielts_scoring::infrastructure::audio::SymphoniaAudioDecoder;

use crate::helpers::wav::{build_wav, tone};

fn write_temp(bytes: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn given_16khz_mono_wav_when_decoding_then_returns_one_sample_per_frame() {
    let wav = build_wav(16_000, 1, &tone(16_000, 1.0));
    let file = write_temp(&wav, ".wav");

    let pcm = SymphoniaAudioDecoder.decode(file.path()).unwrap();

    assert_eq!(pcm.len(), 16_000);
    assert!(pcm.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(pcm.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn given_8khz_stereo_wav_when_decoding_then_downmixes_and_resamples_to_16khz() {
    let mono = tone(8_000, 0.5);
    let interleaved: Vec<i16> = mono.iter().flat_map(|&s| [s, s]).collect();
    let wav = build_wav(8_000, 2, &interleaved);
    let file = write_temp(&wav, ".wav");

    let pcm = SymphoniaAudioDecoder.decode(file.path()).unwrap();

    // 0.5 s at 16 kHz
    assert!(
        (7_900..=8_000).contains(&pcm.len()),
        "unexpected sample count {}",
        pcm.len()
    );
}

#[test]
fn given_corrupted_bytes_when_decoding_then_returns_decoding_error() {
    let file = write_temp(&[0xFFu8; 128], ".wav");

    let result = SymphoniaAudioDecoder.decode(file.path());

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

#[test]
fn given_missing_file_when_decoding_then_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = SymphoniaAudioDecoder.decode(&dir.path().join("gone.wav"));

    assert!(matches!(result, Err(AudioDecoderError::Io(_))));
}
