use serde::{Deserialize, Serialize};

/// Feedback emitted when the aesthetic score falls below the cutoff
pub const FEEDBACK_NEEDS_IMPROVEMENT: &str =
    "Consider improving the image's composition for better aesthetic appeal.";

/// Feedback emitted when the aesthetic score reaches the cutoff
pub const FEEDBACK_GOOD_COMPOSITION: &str = "The image has good compositional elements.";

/// Tip emitted for every predictive score below 75
pub const TIP_BRIGHTNESS_CONTRAST: &str =
    "Consider enhancing the image brightness and contrast for better ad performance.";

/// Result of the composition heuristics for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    /// 1.0 means the left half mirrors the right half within the threshold
    pub symmetry_score: f64,

    /// Mean corner-region variance divided by 255; not bounded above
    pub rule_of_thirds_score: f64,

    /// Unweighted mean of the two scores above
    pub aesthetic_score: f64,

    /// Always exactly one entry
    pub feedback: Vec<String>,
}

/// A value per RGB channel, serialized as `{red, green, blue}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelTriple {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl From<[f64; 3]> for ChannelTriple {
    fn from([red, green, blue]: [f64; 3]) -> Self {
        Self { red, green, blue }
    }
}

impl ChannelTriple {
    pub fn to_array(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Result of the color heuristics for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysisResult {
    /// Single-cluster centroid, truncated to integers
    pub dominant_color: [u8; 3],

    /// Per-channel means
    pub average_colors: ChannelTriple,

    /// Per-channel population standard deviations
    pub color_variation: ChannelTriple,

    /// One of 50, 75 or 100
    pub predictive_score: u32,

    pub performance_tips: Vec<String>,
}

/// Per-channel mean and population standard deviation over all pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStatistics {
    pub mean: [f64; 3],
    pub std_dev: [f64; 3],
}

impl ChannelStatistics {
    /// The centroid of a single color cluster is the channel mean
    pub fn dominant_color(&self) -> [u8; 3] {
        self.mean.map(|m| m.trunc().clamp(0.0, 255.0) as u8)
    }
}
