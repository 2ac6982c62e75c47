//! Native container encoders.

#[cfg(feature = "wav")]
pub mod wav;
