//! # Imaging Module
//!
//! Turns uploaded bytes into an immutable pixel array that the analyzers
//! derive luma planes and region statistics from.

pub mod decoder;
pub mod types;

pub use decoder::ImageDecoder;
pub use types::{luma, DecodedImage};
