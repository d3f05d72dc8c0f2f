use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::analysis::types::{
    CompositionResult, FEEDBACK_GOOD_COMPOSITION, FEEDBACK_NEEDS_IMPROVEMENT,
};
use crate::config::CompositionConfig;
use crate::error::{ComputeError, Result};
use crate::imaging::DecodedImage;

/// Scores an image on horizontal symmetry and rule-of-thirds variance
pub struct CompositionAnalyzer {
    config: CompositionConfig,
}

impl CompositionAnalyzer {
    /// Create a new analyzer with default configuration
    pub fn new() -> Self {
        Self::with_config(CompositionConfig::default())
    }

    /// Create a new analyzer with custom configuration
    pub fn with_config(config: CompositionConfig) -> Self {
        Self { config }
    }

    /// Compute both scores, their mean and the matching feedback line
    pub fn analyze(&self, image: &DecodedImage) -> Result<CompositionResult> {
        let symmetry_score = self.symmetry_score(image)?;
        let rule_of_thirds_score = self.rule_of_thirds_score(image)?;
        let aesthetic_score = (symmetry_score + rule_of_thirds_score) / 2.0;

        let feedback = if aesthetic_score < self.config.feedback_cutoff {
            FEEDBACK_NEEDS_IMPROVEMENT
        } else {
            FEEDBACK_GOOD_COMPOSITION
        };

        debug!(
            "Composition: symmetry {:.4}, thirds {:.4}, aesthetic {:.4}",
            symmetry_score, rule_of_thirds_score, aesthetic_score
        );

        Ok(CompositionResult {
            symmetry_score,
            rule_of_thirds_score,
            aesthetic_score,
            feedback: vec![feedback.to_string()],
        })
    }

    /// Fraction of mirrored luma pairs whose difference stays within the threshold
    ///
    /// The left half is columns `[0, width / 2)`. Column `j` is compared with
    /// column `width - 1 - j`, so for odd widths the center column is never
    /// compared and both halves are trimmed to `width / 2` columns.
    pub fn symmetry_score(&self, image: &DecodedImage) -> Result<f64> {
        image.require_color("symmetry score")?;

        let width = image.width() as usize;
        let half = width / 2;
        let compared = half * image.height() as usize;
        if compared == 0 {
            return Err(ComputeError::NoPixels {
                operation: "symmetry score".to_string(),
            }
            .into());
        }

        let luma = image.luma_plane()?;
        let threshold = self.config.symmetry_threshold;

        let asymmetric: usize = luma
            .par_chunks_exact(width)
            .map(|row| {
                (0..half)
                    .filter(|&x| row[x].abs_diff(row[width - 1 - x]) > threshold)
                    .count()
            })
            .sum();

        debug!(
            "Symmetry: {} of {} mirrored pairs exceed {}",
            asymmetric, compared, threshold
        );
        Ok(1.0 - asymmetric as f64 / compared as f64)
    }

    /// Mean population variance of the four corner regions of the thirds grid, over 255
    pub fn rule_of_thirds_score(&self, image: &DecodedImage) -> Result<f64> {
        let (width, height) = (image.width(), image.height());
        let (third_x, two_third_x) = thirds(width);
        let (third_y, two_third_y) = thirds(height);

        let regions = [
            ("top-left", 0..third_x, 0..third_y),
            ("top-right", two_third_x..width, 0..third_y),
            ("bottom-left", 0..third_x, two_third_y..height),
            ("bottom-right", two_third_x..width, two_third_y..height),
        ];

        let mut total = 0.0;
        for (name, xs, ys) in regions {
            let variance =
                region_variance(image, xs, ys).ok_or_else(|| ComputeError::EmptyRegion {
                    region: name.to_string(),
                    width,
                    height,
                })?;
            debug!("Rule of thirds: {} variance {:.3}", name, variance);
            total += variance;
        }

        Ok(total / 4.0 / 255.0)
    }
}

impl Default for CompositionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// `(floor(n / 3), floor(2n / 3))`
fn thirds(n: u32) -> (u32, u32) {
    let n = n as u64;
    ((n / 3) as u32, (2 * n / 3) as u32)
}

/// Population variance of every sample in the region, `None` when it is empty
fn region_variance(image: &DecodedImage, xs: Range<u32>, ys: Range<u32>) -> Option<f64> {
    let (count, sum) = image
        .region_samples(xs.clone(), ys.clone())
        .fold((0usize, 0u64), |(count, sum), v| (count + 1, sum + v as u64));
    if count == 0 {
        return None;
    }

    let mean = sum as f64 / count as f64;
    let squared: f64 = image
        .region_samples(xs, ys)
        .map(|v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum();
    Some(squared / count as f64)
}
