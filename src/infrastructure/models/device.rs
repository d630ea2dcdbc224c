use candle_core::{DType, Device};

/// Picks CUDA, then Metal, falling back to CPU.
pub fn select_device(use_gpu: bool) -> Device {
    if !use_gpu {
        return Device::Cpu;
    }
    if let Ok(device) = Device::new_cuda(0) {
        return device;
    }
    Device::new_metal(0).unwrap_or(Device::Cpu)
}

pub fn select_dtype(device: &Device) -> DType {
    if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    }
}

pub fn device_label(device: &Device) -> &'static str {
    if device.is_cuda() {
        "cuda"
    } else if device.is_metal() {
        "metal"
    } else {
        "cpu"
    }
}
