//! Range-aware video delivery
//!
//! The dense route: resolves the movie, interprets the `Range` header, emits
//! partial-content headers, and streams the computed byte window to the
//! response through a bounded in-memory pipe.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use stream::{resolve_range, stream_window, StreamOutcome};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::error::AppError;
use crate::state::ServerState;

/// Capacity of the pipe between the copy loop and the response body; a few
/// chunks of slack lets reads and writes overlap.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Stream a byte window of a movie file with range request support
///
/// Without a `Range` header the response is a 200 carrying the leading
/// window of the file rather than the whole thing; players that understand
/// `Accept-Ranges` follow up with range requests to seek. A valid range
/// answers 206 with `Content-Range`, capped at the configured window.
pub async fn serve_video(
    State(state): State<ServerState>,
    Path(movie): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let movie_file = state.resolver().resolve(&movie).await?;
    let file_size = movie_file.size;

    let range_header = match headers.get(header::RANGE) {
        Some(value) => Some(value.to_str().map_err(|_| {
            AppError::BadRequest("Invalid Range header: not valid UTF-8".to_string())
        })?),
        None => None,
    };

    let settings = state.settings();
    let interval = resolve_range(range_header, file_size, settings.window)?;

    let mut file = File::open(&movie_file.path)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to open video file: {}", e)))?;

    // The response body reads from one end of an in-memory pipe while a
    // request-scoped task copies the window into the other end. Dropping the
    // body on client disconnect breaks the pipe, so the next write fails and
    // the copy loop stops.
    let (mut writer, reader) = tokio::io::duplex(PIPE_CAPACITY);
    let chunk_size = settings.chunk_size;
    tokio::spawn(async move {
        match stream_window(&mut file, interval, &mut writer, chunk_size).await {
            StreamOutcome::Completed { bytes_sent } => {
                tracing::debug!("served {} bytes of '{}'", bytes_sent, movie);
            }
            StreamOutcome::Truncated { bytes_sent, cause } => {
                // Headers are already committed; the response just truncates
                tracing::warn!(
                    "stream of '{}' truncated after {} of {} bytes: {}",
                    movie,
                    bytes_sent,
                    interval.len(),
                    cause
                );
            }
        }
        let _ = writer.shutdown().await;
    });

    let body = Body::from_stream(ReaderStream::new(reader));

    let builder = Response::builder()
        .header(header::CONTENT_TYPE, movie_file.content_type)
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, interval.len());

    let builder = if range_header.is_some() {
        builder.status(StatusCode::PARTIAL_CONTENT).header(
            header::CONTENT_RANGE,
            format!("bytes {}-{}/{}", interval.start, interval.end, file_size),
        )
    } else {
        builder.status(StatusCode::OK)
    };

    builder
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
