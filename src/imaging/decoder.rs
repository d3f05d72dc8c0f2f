use std::path::Path;

use image::ImageError;
use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::imaging::types::DecodedImage;

/// Decodes uploaded bytes (PNG, JPEG, BMP, GIF, WebP) into a [`DecodedImage`]
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode an in-memory image, guessing the format from its signature
    pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyInput.into());
        }

        let dynamic = image::load_from_memory(bytes).map_err(map_image_error)?;
        let image = DecodedImage::from_dynamic(dynamic);

        if image.width() == 0 || image.height() == 0 {
            return Err(DecodeError::ZeroSized {
                width: image.width(),
                height: image.height(),
            }
            .into());
        }

        debug!(
            "Decoded {} bytes into {}x{} image with {} channels",
            bytes.len(),
            image.width(),
            image.height(),
            image.channels()
        );
        Ok(image)
    }

    /// Read and decode an image file from disk
    pub async fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::decode(&bytes)
    }
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => DecodeError::UnsupportedFormat { reason: e.to_string() },
        other => DecodeError::Malformed { reason: other.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnalyzerError, ErrorKind};
    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, Rgba};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png_rgb() {
        let buffer = ImageBuffer::from_fn(5, 3, |x, _| Rgb([x as u8 * 10, 0, 255]));
        let bytes = encode_png(DynamicImage::ImageRgb8(buffer));

        let image = ImageDecoder::decode(&bytes).unwrap();
        assert_eq!((image.width(), image.height(), image.channels()), (5, 3, 3));
        assert_eq!(image.pixel(4, 2), &[40, 0, 255]);
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let buffer = ImageBuffer::from_pixel(2, 2, Rgba([1u8, 2, 3, 128]));
        let bytes = encode_png(DynamicImage::ImageRgba8(buffer));

        let image = ImageDecoder::decode(&bytes).unwrap();
        assert_eq!(image.channels(), 4);
        assert_eq!(image.pixel(0, 0), &[1, 2, 3, 128]);
    }

    #[test]
    fn test_decode_empty_input() {
        let err = ImageDecoder::decode(&[]).unwrap_err();
        assert!(matches!(err, AnalyzerError::Decode(DecodeError::EmptyInput)));
    }

    #[test]
    fn test_decode_garbage_is_decode_failure() {
        let err = ImageDecoder::decode(b"definitely not an image").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[test]
    fn test_decode_truncated_png() {
        let buffer = ImageBuffer::from_pixel(16, 16, Rgb([9u8, 9, 9]));
        let bytes = encode_png(DynamicImage::ImageRgb8(buffer));

        let err = ImageDecoder::decode(&bytes[..bytes.len() / 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[tokio::test]
    async fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("white.png");
        let buffer = ImageBuffer::from_pixel(3, 3, Rgb([255u8, 255, 255]));
        std::fs::write(&path, encode_png(DynamicImage::ImageRgb8(buffer))).unwrap();

        let image = ImageDecoder::decode_file(&path).await.unwrap();
        assert_eq!(image.pixel_count(), 9);

        let missing = ImageDecoder::decode_file(dir.path().join("missing.png")).await;
        assert!(matches!(missing, Err(AnalyzerError::Io(_))));
    }
}
