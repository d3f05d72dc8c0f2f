//! # Analysis Module
//!
//! The scoring heuristics behind both endpoints.
//!
//! - **Composition**: horizontal symmetry of the luma plane and variance in
//!   the four rule-of-thirds corner regions, averaged into an aesthetic score
//! - **Color**: dominant color, channel means and deviations, and a
//!   predictive score with an optional brand-color match
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ad_image_analyzer::analysis::{BrandColor, ColorAnalyzer, CompositionAnalyzer};
//! use ad_image_analyzer::imaging::ImageDecoder;
//!
//! # fn main() -> anyhow::Result<()> {
//! let bytes = std::fs::read("ad.png")?;
//! let image = ImageDecoder::decode(&bytes)?;
//!
//! let composition = CompositionAnalyzer::new().analyze(&image)?;
//! println!("Aesthetic score: {:.2}", composition.aesthetic_score);
//!
//! let brand: BrandColor = "#FF5733".parse()?;
//! let color = ColorAnalyzer::new().analyze(&image, Some(brand))?;
//! println!("Predictive score: {}", color.predictive_score);
//! # Ok(())
//! # }
//! ```

pub mod brand;
pub mod color;
pub mod composition;
pub mod engine;
pub mod types;

pub use brand::BrandColor;
pub use color::ColorAnalyzer;
pub use composition::CompositionAnalyzer;
pub use engine::AnalysisEngine;
pub use types::{ChannelStatistics, ChannelTriple, ColorAnalysisResult, CompositionResult};
