//! Stats Module
//!
//! Latency sample collection and summary statistics.
//!
//! ## Responsibilities
//! - Hold one phase's duration samples in measurement order
//! - Track how many operations produced no usable sample
//! - Reduce a sample set to min / max / mean with exact integer math

mod sample_set;
mod summary;

pub use sample_set::SampleSet;
pub use summary::{summarize, Summary};
pub(crate) use summary::as_nanos;
