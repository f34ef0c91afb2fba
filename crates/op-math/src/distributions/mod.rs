//! Probability distributions.

pub mod normal;

pub use normal::{error_function, normal_cdf, normal_pdf};
