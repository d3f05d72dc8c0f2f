//! # Ad Image Analyzer
//!
//! Score ad images on simple composition and color heuristics and serve the
//! results over a small HTTP API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ad_image_analyzer::{config::Config, server};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! server::serve(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`imaging`] - Decoding uploads into pixel arrays
//! - [`analysis`] - Composition and color heuristics
//! - [`server`] - Axum routes, multipart uploads and error mapping
//! - [`config`] - Configuration management
//!
//! ## Scoring Without the Server
//!
//! ```rust,no_run
//! use ad_image_analyzer::analysis::AnalysisEngine;
//!
//! # fn main() -> anyhow::Result<()> {
//! let engine = AnalysisEngine::default();
//! let bytes = std::fs::read("banner.jpg")?;
//!
//! let composition = engine.composition_from_bytes(&bytes)?;
//! let color = engine.color_from_bytes(&bytes, Some("#1DA1F2"))?;
//! println!("{:?} {:?}", composition.feedback, color.performance_tips);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod imaging;
pub mod server;

// Re-export commonly used types for convenience
pub use crate::{
    analysis::{AnalysisEngine, BrandColor, ColorAnalyzer, CompositionAnalyzer},
    config::Config,
    error::{AnalyzerError, ErrorKind, Result},
    imaging::{DecodedImage, ImageDecoder},
};
