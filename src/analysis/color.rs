use tracing::debug;

use crate::analysis::brand::BrandColor;
use crate::analysis::types::{ChannelStatistics, ColorAnalysisResult, TIP_BRIGHTNESS_CONTRAST};
use crate::config::ColorConfig;
use crate::error::{ComputeError, Result};
use crate::imaging::DecodedImage;

/// Score every image starts from
pub const BASE_SCORE: u32 = 50;

/// Added once for a brand match and once for balanced channel means
pub const BONUS: u32 = 25;

/// Extracts dominant color and channel statistics and derives a predictive score
pub struct ColorAnalyzer {
    config: ColorConfig,
}

impl ColorAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::with_config(ColorConfig::default())
    }

    /// Create a new analyzer with custom configuration
    pub fn with_config(config: ColorConfig) -> Self {
        Self { config }
    }

    pub fn analyze(
        &self,
        image: &DecodedImage,
        brand_color: Option<BrandColor>,
    ) -> Result<ColorAnalysisResult> {
        let stats = self.channel_statistics(image)?;
        let dominant_color = stats.dominant_color();

        let tolerance = self.config.brand_tolerance;
        let brand_match = brand_color.map(|brand| brand.matches(dominant_color, tolerance));
        let predictive_score = self.predictive_score(&stats, brand_match);

        let mut performance_tips = Vec::new();
        if predictive_score < BASE_SCORE + BONUS {
            performance_tips.push(TIP_BRIGHTNESS_CONTRAST.to_string());
            if let (Some(brand), Some(false)) = (brand_color, brand_match) {
                performance_tips.push(format!(
                    "Ensure the ad image aligns closer to the brand color {:?} \
                     for better brand consistency.",
                    brand.rgb()
                ));
            }
        }

        debug!(
            "Color: dominant {:?}, brand match {:?}, score {}",
            dominant_color, brand_match, predictive_score
        );

        Ok(ColorAnalysisResult {
            dominant_color,
            average_colors: stats.mean.into(),
            color_variation: stats.std_dev.into(),
            predictive_score,
            performance_tips,
        })
    }

    /// Per-channel mean and population standard deviation of R, G and B
    pub fn channel_statistics(&self, image: &DecodedImage) -> Result<ChannelStatistics> {
        image.require_color("color analysis")?;

        let count = image.pixel_count();
        if count == 0 {
            return Err(ComputeError::NoPixels {
                operation: "color analysis".to_string(),
            }
            .into());
        }

        let mut sums = [0u64; 3];
        for px in image.pixels() {
            for (sum, &v) in sums.iter_mut().zip(px) {
                *sum += v as u64;
            }
        }
        let mean = sums.map(|sum| sum as f64 / count as f64);

        let mut squared = [0.0f64; 3];
        for px in image.pixels() {
            for c in 0..3 {
                let d = px[c] as f64 - mean[c];
                squared[c] += d * d;
            }
        }
        let std_dev = squared.map(|sq| (sq / count as f64).sqrt());

        Ok(ChannelStatistics { mean, std_dev })
    }

    /// 50, plus 25 for a brand match, plus 25 when no channel mean is extreme
    pub fn predictive_score(&self, stats: &ChannelStatistics, brand_match: Option<bool>) -> u32 {
        let mut score = BASE_SCORE;
        if brand_match == Some(true) {
            score += BONUS;
        }
        if !self.has_extreme_channel(stats) {
            score += BONUS;
        }
        score
    }

    /// Whether any channel mean sits at or beyond the configured bounds
    pub fn has_extreme_channel(&self, stats: &ChannelStatistics) -> bool {
        stats
            .mean
            .iter()
            .any(|&m| m <= self.config.extreme_low || m >= self.config.extreme_high)
    }
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::{ImageBuffer, Rgb, Rgba};

    #[test]
    fn test_solid_color() {
        let image = DecodedImage::new_filled(7, 5, &[12, 200, 99]).unwrap();
        let result = ColorAnalyzer::new().analyze(&image, None).unwrap();

        assert_eq!(result.dominant_color, [12, 200, 99]);
        assert_eq!(result.average_colors.to_array(), [12.0, 200.0, 99.0]);
        assert_eq!(result.color_variation.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_all_white() {
        let image = DecodedImage::new_filled(10, 10, &[255, 255, 255]).unwrap();
        let result = ColorAnalyzer::new().analyze(&image, None).unwrap();

        assert_eq!(result.dominant_color, [255, 255, 255]);
        assert!(result.color_variation.to_array().iter().all(|&v| v < 5.0));
        // Extreme means and no brand color
        assert_eq!(result.predictive_score, 50);
        assert_eq!(result.performance_tips, vec![TIP_BRIGHTNESS_CONTRAST.to_string()]);
    }

    #[test]
    fn test_half_black_half_white_has_high_variation() {
        let image = DecodedImage::from_rgb(ImageBuffer::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([255u8, 255, 255])
            }
        }));
        let result = ColorAnalyzer::new().analyze(&image, None).unwrap();

        assert_eq!(result.average_colors.to_array(), [127.5, 127.5, 127.5]);
        assert_eq!(result.color_variation.to_array(), [127.5, 127.5, 127.5]);
        assert!(result.color_variation.red > 100.0);
        assert_eq!(result.dominant_color, [127, 127, 127]);
    }

    #[test]
    fn test_balanced_image_without_brand_scores_75() {
        let image = DecodedImage::new_filled(4, 4, &[120, 120, 120]).unwrap();
        let result = ColorAnalyzer::new().analyze(&image, None).unwrap();
        assert_eq!(result.predictive_score, 75);
        assert!(result.performance_tips.is_empty());
    }

    #[test]
    fn test_brand_match_and_balanced_scores_100() {
        let image = DecodedImage::new_filled(4, 4, &[120, 100, 80]).unwrap();
        let brand = BrandColor::new(150, 60, 90);
        let result = ColorAnalyzer::new().analyze(&image, Some(brand)).unwrap();
        assert_eq!(result.predictive_score, 100);
        assert!(result.performance_tips.is_empty());
    }

    #[test]
    fn test_brand_match_with_extreme_mean_scores_75() {
        let image = DecodedImage::new_filled(4, 4, &[250, 30, 30]).unwrap();
        let brand: BrandColor = "#FF1E1E".parse().unwrap();
        let result = ColorAnalyzer::new().analyze(&image, Some(brand)).unwrap();
        assert_eq!(result.predictive_score, 75);
        assert!(result.performance_tips.is_empty());
    }

    #[test]
    fn test_brand_mismatch_with_extreme_mean_adds_brand_tip() {
        let image = DecodedImage::new_filled(4, 4, &[10, 10, 10]).unwrap();
        let brand: BrandColor = "#FF5733".parse().unwrap();
        let result = ColorAnalyzer::new().analyze(&image, Some(brand)).unwrap();

        assert_eq!(result.predictive_score, 50);
        assert_eq!(result.performance_tips.len(), 2);
        assert_eq!(result.performance_tips[0], TIP_BRIGHTNESS_CONTRAST);
        assert_eq!(
            result.performance_tips[1],
            "Ensure the ad image aligns closer to the brand color [255, 87, 51] \
             for better brand consistency."
        );
    }

    #[test]
    fn test_brand_mismatch_with_balanced_mean_has_no_tips() {
        let image = DecodedImage::new_filled(4, 4, &[120, 120, 120]).unwrap();
        let brand: BrandColor = "#FF5733".parse().unwrap();
        let result = ColorAnalyzer::new().analyze(&image, Some(brand)).unwrap();
        assert_eq!(result.predictive_score, 75);
        assert!(result.performance_tips.is_empty());
    }

    #[test]
    fn test_extreme_bounds_are_inclusive() {
        let analyzer = ColorAnalyzer::new();
        let at_low = ChannelStatistics { mean: [50.0, 100.0, 100.0], std_dev: [0.0; 3] };
        let at_high = ChannelStatistics { mean: [100.0, 200.0, 100.0], std_dev: [0.0; 3] };
        let inside = ChannelStatistics { mean: [50.5, 199.9, 100.0], std_dev: [0.0; 3] };

        assert!(analyzer.has_extreme_channel(&at_low));
        assert!(analyzer.has_extreme_channel(&at_high));
        assert!(!analyzer.has_extreme_channel(&inside));
    }

    #[test]
    fn test_predictive_score_values() {
        let analyzer = ColorAnalyzer::new();
        let balanced = ChannelStatistics { mean: [100.0; 3], std_dev: [0.0; 3] };
        let extreme = ChannelStatistics { mean: [0.0; 3], std_dev: [0.0; 3] };

        for stats in [balanced, extreme] {
            for brand_match in [None, Some(false), Some(true)] {
                let score = analyzer.predictive_score(&stats, brand_match);
                assert!([50, 75, 100].contains(&score));
                if brand_match != Some(true) {
                    assert!(score < 100);
                }
            }
        }
    }

    #[test]
    fn test_alpha_channel_is_ignored() {
        let image = DecodedImage::from_rgba(ImageBuffer::from_fn(4, 4, |x, _| {
            Rgba([100u8, 110, 120, (x * 60) as u8])
        }));
        let result = ColorAnalyzer::new().analyze(&image, None).unwrap();
        assert_eq!(result.dominant_color, [100, 110, 120]);
        assert_eq!(result.color_variation.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_grayscale_is_shape_mismatch() {
        let image = DecodedImage::new_filled(4, 4, &[128, 255]).unwrap();
        let err = ColorAnalyzer::new().analyze(&image, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn test_custom_tolerance() {
        let image = DecodedImage::new_filled(2, 2, &[100, 100, 100]).unwrap();
        let brand = BrandColor::new(130, 100, 100);
        let tight = ColorAnalyzer::with_config(ColorConfig {
            brand_tolerance: 20,
            ..ColorConfig::default()
        });
        assert_eq!(tight.analyze(&image, Some(brand)).unwrap().predictive_score, 75);
        let default = ColorAnalyzer::new().analyze(&image, Some(brand)).unwrap();
        assert_eq!(default.predictive_score, 100);
    }
}
