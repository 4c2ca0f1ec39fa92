// {{{ Imports
use anyhow::anyhow;
use axum::extract::{Path, State};
use axum::Json;
use kagura::arcaea::chart::{Chart, Song};
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;
// }}}

#[derive(Serialize)]
pub struct ChartWithSong {
	song: Song,
	chart: Chart,
}

pub async fn get_chart(
	State(state): State<AppContext>,
	Path(chart_id): Path<u32>,
) -> Result<Json<ChartWithSong>, AppError> {
	let songs = state.ctx.songs.snapshot();
	let (song, chart) = songs
		.lookup_chart(chart_id)
		.ok_or_else(|| AppError::not_found(anyhow!("Could not find chart with id {chart_id}")))?;

	Ok(Json(ChartWithSong {
		song: song.clone(),
		chart: chart.clone(),
	}))
}
