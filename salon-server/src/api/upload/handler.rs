//! Image Upload Handler
//!
//! Accepts PNG, JPEG and WebP; everything is re-encoded to JPEG with a
//! fresh UUID filename, so stored files never keep user-supplied names.

use std::io::Cursor;
use std::path::PathBuf;

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    Ok(())
}

fn compress_to_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }
    Ok(buffer)
}

pub async fn upload(
    State(state): State<ServerState>,
    _user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let images_dir = state.config.uploads_dir();
    tokio::fs::create_dir_all(&images_dir)
        .await
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;

    validate_image(&data, &ext)?;
    let compressed = compress_to_jpeg(&data)?;

    let new_filename = format!("{}.jpg", Uuid::new_v4());
    let file_path = images_dir.join(&new_filename);
    tokio::fs::write(&file_path, &compressed)
        .await
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %filename,
        stored = %new_filename,
        size = compressed.len(),
        "Image uploaded"
    );

    let url = format!("/api/image/{}", new_filename);
    Ok(Json(UploadResponse {
        filename: new_filename,
        original_name: filename,
        size: compressed.len(),
        url,
    }))
}
