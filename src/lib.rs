// Fixed-point requantization: scalar reference kernels plus buffer helpers
pub mod batch;
pub mod config;
pub mod error;
pub mod rescale;
pub mod trace;

pub use config::{RescaleConfig, RoundingMode};
pub use error::RescaleError;
pub use rescale::quantize::{dequantize_multiplier, quantize_multiplier};
pub use rescale::{multiply_by_quantized_multiplier, Rescaler};
