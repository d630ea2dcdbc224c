use std::path::{Path, PathBuf};

use serde_json::json;

/// Whitespace-split word-level vocabulary. Id 0 is `<pad>`, id 1 is `<unk>`.
pub const WORDS: [&str; 6] = ["hello", "world", "<|en|>", "<|vi|>", "the", "park"];

/// Writes a minimal `tokenizer.json` into `dir` and returns its path.
pub fn write_word_level_tokenizer(dir: &Path) -> PathBuf {
    let mut vocab = serde_json::Map::new();
    vocab.insert("<pad>".to_string(), json!(0));
    vocab.insert("<unk>".to_string(), json!(1));
    for (i, word) in WORDS.iter().enumerate() {
        vocab.insert(word.to_string(), json!(i + 2));
    }

    let tokenizer = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "<unk>"
        }
    });

    let path = dir.join("tokenizer.json");
    std::fs::write(&path, tokenizer.to_string()).unwrap();
    path
}
