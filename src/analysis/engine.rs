use tracing::{error, info, warn};

use crate::{
    analysis::{
        BrandColor, ColorAnalysisResult, ColorAnalyzer, CompositionAnalyzer, CompositionResult,
    },
    config::Config,
    error::{AnalyzerError, Result},
    imaging::{DecodedImage, ImageDecoder},
};

/// Decodes uploads and runs the analyzers configured for this service
///
/// Each call owns its decoded image; the engine itself holds only
/// immutable configuration and can be shared across requests.
pub struct AnalysisEngine {
    composition: CompositionAnalyzer,
    color: ColorAnalyzer,
}

impl AnalysisEngine {
    /// Create an engine from the analyzer sections of the configuration
    pub fn new(config: &Config) -> Self {
        Self {
            composition: CompositionAnalyzer::with_config(config.composition.clone()),
            color: ColorAnalyzer::with_config(config.color.clone()),
        }
    }

    /// Decode `bytes` and score its composition
    pub fn composition_from_bytes(&self, bytes: &[u8]) -> Result<CompositionResult> {
        let outcome =
            ImageDecoder::decode(bytes).and_then(|image| self.composition.analyze(&image));
        log_composition(&outcome);
        outcome
    }

    /// Score the composition of an already decoded image
    pub fn composition_of(&self, image: &DecodedImage) -> Result<CompositionResult> {
        let outcome = self.composition.analyze(image);
        log_composition(&outcome);
        outcome
    }

    /// Decode `bytes` and score its colors, optionally against a `#RRGGBB` brand color
    ///
    /// The brand color is validated before the image is decoded.
    pub fn color_from_bytes(
        &self,
        bytes: &[u8],
        brand_color: Option<&str>,
    ) -> Result<ColorAnalysisResult> {
        let outcome = BrandColor::parse_optional(brand_color).and_then(|brand| {
            let image = ImageDecoder::decode(bytes)?;
            self.color.analyze(&image, brand)
        });
        log_color(&outcome);
        outcome
    }

    /// Score the colors of an already decoded image
    pub fn color_of(
        &self,
        image: &DecodedImage,
        brand_color: Option<&str>,
    ) -> Result<ColorAnalysisResult> {
        let outcome = BrandColor::parse_optional(brand_color)
            .and_then(|brand| self.color.analyze(image, brand));
        log_color(&outcome);
        outcome
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

fn log_composition(outcome: &Result<CompositionResult>) {
    match outcome {
        Ok(result) => info!(
            "Composition analysis: aesthetic {:.3} (symmetry {:.3}, thirds {:.3})",
            result.aesthetic_score, result.symmetry_score, result.rule_of_thirds_score
        ),
        Err(e) => log_failure("Composition", e),
    }
}

fn log_color(outcome: &Result<ColorAnalysisResult>) {
    match outcome {
        Ok(result) => info!(
            "Color analysis: dominant {:?}, predictive score {}, {} tips",
            result.dominant_color,
            result.predictive_score,
            result.performance_tips.len()
        ),
        Err(e) => log_failure("Color", e),
    }
}

/// Bad uploads are the caller's problem and only warrant a warning
fn log_failure(analysis: &str, e: &AnalyzerError) {
    if e.is_client_error() {
        warn!("{} analysis failed [{}]: {}", analysis, e.kind(), e);
    } else {
        error!("{} analysis failed [{}]: {}", analysis, e.kind(), e);
    }
}
