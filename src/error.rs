use thiserror::Error;

/// Main error type for the ad image analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Image decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Image shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Computation error: {0}")]
    Compute(#[from] ComputeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised while turning uploaded bytes into pixels
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("No image data was provided")]
    EmptyInput,

    #[error("Unsupported image format: {reason}")]
    UnsupportedFormat { reason: String },

    #[error("Malformed image data: {reason}")]
    Malformed { reason: String },

    #[error("Decoded image has zero area ({width}x{height})")]
    ZeroSized { width: u32, height: u32 },
}

/// The decoded image does not have the layout an operation needs
#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("{operation} requires {expected} channels, image has {actual}")]
    ChannelCount {
        operation: String,
        expected: String,
        actual: usize,
    },
}

/// Caller-supplied values that fail validation
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid brand color '{value}': {reason}")]
    InvalidBrandColor { value: String, reason: String },
}

/// Arithmetic that cannot produce a meaningful number
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("Region '{region}' is empty for a {width}x{height} image")]
    EmptyRegion {
        region: String,
        width: u32,
        height: u32,
    },

    #[error("No pixels available for {operation}")]
    NoPixels { operation: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Coarse classification of analysis failures, used by the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bytes are not a decodable image
    DecodeFailure,
    /// Decoded image lacks the channels an operation needs
    ShapeMismatch,
    /// Malformed caller input such as a brand color
    InputValidation,
    /// Anything else that went wrong while computing
    ComputeFailure,
}

/// Convenience type alias for Results using AnalyzerError
pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Classify this error into one of the four analysis failure kinds
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) => ErrorKind::DecodeFailure,
            Self::Shape(_) => ErrorKind::ShapeMismatch,
            Self::Input(_) => ErrorKind::InputValidation,
            Self::Compute(_) | Self::Config(_) | Self::Io(_) | Self::Generic(_) => {
                ErrorKind::ComputeFailure
            }
        }
    }

    /// Whether the caller sent something we could never process
    pub fn is_client_error(&self) -> bool {
        !matches!(self.kind(), ErrorKind::ComputeFailure)
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Decode(DecodeError::EmptyInput) => {
                "The uploaded file is empty. Please upload a PNG, JPEG, BMP, GIF or WebP image."
                    .to_string()
            }
            Self::Decode(DecodeError::UnsupportedFormat { .. }) => {
                "The uploaded file is not in a supported image format (PNG, JPEG, BMP, GIF, WebP)."
                    .to_string()
            }
            Self::Input(InputError::InvalidBrandColor { value, .. }) => {
                format!("Brand color '{}' is not a valid hex color. Use the form #RRGGBB.", value)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecodeFailure => "decode_failure",
            Self::ShapeMismatch => "shape_mismatch",
            Self::InputValidation => "input_validation",
            Self::ComputeFailure => "compute_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let decode: AnalyzerError = DecodeError::EmptyInput.into();
        assert_eq!(decode.kind(), ErrorKind::DecodeFailure);

        let shape: AnalyzerError = ShapeError::ChannelCount {
            operation: "color analysis".to_string(),
            expected: "3 or 4".to_string(),
            actual: 1,
        }
        .into();
        assert_eq!(shape.kind(), ErrorKind::ShapeMismatch);

        let input: AnalyzerError = InputError::InvalidBrandColor {
            value: "notacolor".to_string(),
            reason: "missing '#'".to_string(),
        }
        .into();
        assert_eq!(input.kind(), ErrorKind::InputValidation);

        let compute: AnalyzerError = ComputeError::NoPixels {
            operation: "symmetry".to_string(),
        }
        .into();
        assert_eq!(compute.kind(), ErrorKind::ComputeFailure);
        assert_eq!(AnalyzerError::generic("boom").kind(), ErrorKind::ComputeFailure);
    }

    #[test]
    fn test_client_errors() {
        assert!(AnalyzerError::from(DecodeError::EmptyInput).is_client_error());
        assert!(!AnalyzerError::generic("boom").is_client_error());
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let err: AnalyzerError = InputError::InvalidBrandColor {
            value: "#12".to_string(),
            reason: "expected 7 characters, got 3".to_string(),
        }
        .into();
        assert!(err.to_string().contains("#12"));
        assert!(err.user_message().contains("#RRGGBB"));
    }
}
