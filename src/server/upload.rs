use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart},
    http::StatusCode,
};
use tracing::debug;

use super::error::ApiError;

/// Multipart field carrying the image bytes
pub const FILE_FIELD: &str = "file";

/// Optional multipart field carrying a `#RRGGBB` brand color
pub const BRAND_COLOR_FIELD: &str = "brand_color";

/// The form fields both analysis endpoints accept
#[derive(Debug)]
pub struct UploadForm {
    pub file: Bytes,
    pub brand_color: Option<String>,
}

impl UploadForm {
    /// Collect the known fields from a multipart body, ignoring any others
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        let mut multipart = multipart.map_err(|rejection| {
            ApiError::upload(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
        })?;

        let mut file = None;
        let mut brand_color = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::upload(e.status(), e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some(FILE_FIELD) if file.is_none() => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::upload(e.status(), e.body_text()))?;
                    file = Some(bytes);
                }
                Some(BRAND_COLOR_FIELD) if brand_color.is_none() => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::upload(e.status(), e.body_text()))?;
                    brand_color = Some(text);
                }
                other => debug!("Ignoring multipart field {:?}", other),
            }
        }

        let file = file.ok_or_else(|| {
            ApiError::upload(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing required form field '{}'", FILE_FIELD),
            )
        })?;

        debug!("Received upload of {} bytes (brand color: {:?})", file.len(), brand_color);
        Ok(Self { file, brand_color })
    }
}
