mod candle_model_loader;
mod device;

pub use candle_model_loader::{CandleModelConfig, CandleModelLoader, resolve_whisper_model_id};
pub use device::{device_label, select_device, select_dtype};
