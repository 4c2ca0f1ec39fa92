// {{{ Imports
use axum::extract::{Query, State};
use axum::Json;
use kagura::arcaea::chart::Song;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::AppError;
// }}}

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 25;

#[derive(Deserialize)]
pub struct SearchParams {
	q: String,
	limit: Option<usize>,
}

pub async fn search_songs(
	State(state): State<AppContext>,
	Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Song>>, AppError> {
	let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
	let songs = state.ctx.songs.snapshot();

	let result = songs
		.search(&params.q, limit)
		.into_iter()
		.cloned()
		.collect();

	Ok(Json(result))
}
