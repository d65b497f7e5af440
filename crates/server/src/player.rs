//! HTML player page rendering

use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::AppError;
use crate::state::ServerState;

const PLAYER_TEMPLATE: &str = include_str!("../templates/player.html");

/// Render the browser player page for a movie
///
/// Resolves the movie first so a missing title answers 404 instead of an
/// empty player pointing at a dead video URL.
pub async fn player_page(
    State(state): State<ServerState>,
    Path(movie): Path<String>,
) -> Result<Html<String>, AppError> {
    let movie_file = state.resolver().resolve(&movie).await?;

    let page = PLAYER_TEMPLATE
        .replace("{{ title }}", &format!("Streaming {}", movie))
        .replace("{{ movie }}", &movie)
        .replace("{{ content_type }}", movie_file.content_type);

    Ok(Html(page))
}
