mod audio_decoder_test;
mod text_sanitizer_test;
