use ielts_scoring::application::services::StagedAudio;
use ielts_scoring::domain::AudioFormat;

#[test]
fn given_audio_bytes_when_staging_then_file_has_matching_suffix_and_content() {
    let staged = StagedAudio::write(b"fake-mp3-bytes", AudioFormat::Mp3).unwrap();

    let path = staged.path().to_path_buf();
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), b"fake-mp3-bytes");
}

#[test]
fn given_staged_audio_when_dropped_then_file_is_deleted() {
    let staged = StagedAudio::write(b"RIFF", AudioFormat::Wav).unwrap();
    let path = staged.path().to_path_buf();

    drop(staged);

    assert!(!path.exists());
}

#[test]
fn given_staged_audio_when_panicking_holder_unwinds_then_file_is_deleted() {
    let mut captured = None;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let staged = StagedAudio::write(b"OggS", AudioFormat::Ogg).unwrap();
        captured = Some(staged.path().to_path_buf());
        panic!("decoder crashed");
    }));

    assert!(result.is_err());
    assert!(!captured.unwrap().exists());
}
