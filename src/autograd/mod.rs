//! Parameter tensors shared between a model and its optimizer

mod tensor;

pub use tensor::Tensor;
