mod audio_decoder;
mod candle_whisper_engine;

pub use audio_decoder::SymphoniaAudioDecoder;
pub use candle_whisper_engine::{
    CandleWhisperEngine, language_token, mel_filter_file, read_mel_filters,
};
