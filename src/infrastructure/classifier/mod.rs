mod candle_sequence_classifier;

pub use candle_sequence_classifier::{
    CONFIG_FILE, CandleSequenceClassifier, TOKENIZER_FILE, WEIGHTS_FILE, configure_tokenizer,
    effective_max_length,
};
