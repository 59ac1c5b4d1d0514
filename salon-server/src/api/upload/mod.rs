//! Upload Routes
//!
//! Image upload for authenticated users plus public serving of stored
//! images (logos appear on pages rendered before login).

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::core::ServerState;

enum ImageResponse {
    Ok(&'static str, Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ImageResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ImageResponse::Ok(content_type, content) => {
                (http::StatusCode::OK, [(header::CONTENT_TYPE, content_type)], content)
                    .into_response()
            }
            ImageResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ImageResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ImageResponse {
    // Prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ImageResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.uploads_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_raw()
                .unwrap_or("application/octet-stream");
            ImageResponse::Ok(content_type, content.into())
        }
        Err(_) => ImageResponse::NotFound,
    }
}

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/upload/image", post(handler::upload))
        .route("/api/image/{filename}", get(serve_image))
}
