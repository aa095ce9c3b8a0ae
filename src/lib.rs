pub mod luminary;

pub use luminary::{ConvertError, ConverterConfig, LuminaryConverter};
