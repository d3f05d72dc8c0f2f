use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyzerError, InputError, Result};

/// A brand color supplied as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandColor([u8; 3]);

impl BrandColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue])
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Parse an optional form value; blank values mean no brand color was supplied
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(hex) => hex.parse().map(Some),
        }
    }

    /// Whether every channel of `color` is within `tolerance` of this brand color
    pub fn matches(&self, color: [u8; 3], tolerance: u8) -> bool {
        self.0
            .iter()
            .zip(color.iter())
            .all(|(brand, actual)| brand.abs_diff(*actual) <= tolerance)
    }
}

impl FromStr for BrandColor {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |reason: String| InputError::InvalidBrandColor {
            value: s.to_string(),
            reason,
        };

        if !s.is_ascii() {
            return Err(invalid("contains non-ASCII characters".to_string()).into());
        }
        if s.len() != 7 {
            return Err(invalid(format!("expected 7 characters, got {}", s.len())).into());
        }
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| invalid("must start with '#'".to_string()))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("contains non-hexadecimal digits".to_string()).into());
        }

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|e| invalid(e.to_string()))?;
        }
        Ok(Self(rgb))
    }
}

impl fmt::Display for BrandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}
