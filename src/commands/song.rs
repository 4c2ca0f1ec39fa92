// {{{ Imports
use anyhow::anyhow;
use poise::serenity_prelude::CreateEmbed;
use rand::seq::IndexedRandom;
use tracing::{info, warn};

use crate::arcaea::chart::{Chart, Difficulty, Level, Song};
use crate::context::{Error, ErrorKind, PoiseContext, TagError, TaggedError};

use super::args::{forward, parse_difficulty, parse_level, usage_error, Take};
use super::discord::MessageContext;
use super::utils::{chart_details, chart_summary, find_song};
// }}}

// {{{ Song
// {{{ Implementation
pub async fn song_impl<C: MessageContext>(ctx: &mut C, query: &str) -> Result<u32, TaggedError> {
	let query = query.trim();
	if query.is_empty() {
		return Err(usage_error(&ctx.data().prefix, "song [query]"));
	}

	let songs = ctx.data().songs.snapshot();
	let song = find_song(&songs, query)?;

	let mut charts: Vec<&Chart> = song.charts.iter().collect();
	charts.sort_by_key(|chart| chart.difficulty);

	let mut embed = CreateEmbed::default()
		.field("Title", &song.title, false)
		.field("Artist", &song.artist, false);

	for chart in charts {
		embed = embed.field(chart.difficulty.display_name(), chart_details(chart), true);
	}

	ctx.send_embed(embed).await?;

	Ok(song.id)
}
// }}}
// {{{ Discord wrapper
/// Show a song and its charts
#[poise::command(prefix_command, slash_command)]
pub async fn song(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Name of the song"]
	query: Option<String>,
) -> Result<(), Error> {
	let res = song_impl(&mut ctx, query.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ Random
// {{{ Implementation
const RANDOM_USAGE: &str = "random [level] (diff)";

fn random_candidates<'a>(
	songs: impl Iterator<Item = &'a Song>,
	level: Level,
	difficulty: Option<Difficulty>,
) -> Vec<(&'a Song, &'a Chart)> {
	songs
		.flat_map(|song| song.charts.iter().map(move |chart| (song, chart)))
		.filter(|(_, chart)| chart.level == level)
		.filter(|(_, chart)| difficulty.map_or(true, |d| chart.difficulty == d))
		.collect()
}

pub async fn random_impl<C: MessageContext>(ctx: &mut C, params: &str) -> Result<u32, TaggedError> {
	let (level, rest) = forward(params, Take::Words(1))
		.ok_or_else(|| usage_error(&ctx.data().prefix, RANDOM_USAGE))?;
	let level = parse_level(level)?;
	let difficulty = match forward(rest, Take::Words(1)) {
		Some((difficulty, _)) => Some(parse_difficulty(difficulty)?),
		None => None,
	};

	let songs = ctx.data().songs.snapshot();
	let candidates = random_candidates(songs.songs(), level, difficulty);
	let picked = candidates.choose(&mut rand::rng()).copied();
	let Some((song, chart)) = picked else {
		let message = match difficulty {
			Some(difficulty) => format!(
				"There are no Lv{level} charts with the difficulty {}!",
				difficulty.display_name()
			),
			None => format!("There are no Lv{level} charts!"),
		};

		return Err(anyhow!(message).tag(ErrorKind::User));
	};

	let embed = CreateEmbed::default()
		.title("Randomly Selected Chart")
		.field("Title", &song.title, false)
		.field("Artist", &song.artist, false)
		.field("Difficulty", chart_summary(chart), false);

	ctx.send_embed(embed).await?;

	Ok(chart.id)
}
// }}}
// {{{ Discord wrapper
/// Pick a random chart of some level
#[poise::command(prefix_command, slash_command)]
pub async fn random(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Level, optionally followed by a difficulty"]
	args: Option<String>,
) -> Result<(), Error> {
	let res = random_impl(&mut ctx, args.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ Reload
// {{{ Implementation
pub async fn reload_impl<C: MessageContext>(ctx: &mut C) -> Result<usize, TaggedError> {
	let path = ctx.data().paths.songdata_path().clone();
	let songs = ctx.data().songs.reload(&path).map_err(|e| {
		warn!("Song data reload failed: {e:?}");
		anyhow!("Failed to reload song data: {e:#}").tag(ErrorKind::User)
	})?;

	info!("Song data reloaded by user {}", ctx.author_id());
	ctx.reply(&format!(
		"Reloaded song data: {} songs, {} charts.",
		songs.len(),
		songs.charts().count()
	))
	.await?;

	Ok(songs.len())
}
// }}}
// {{{ Discord wrapper
/// Reload the song data from disk
#[poise::command(prefix_command, slash_command, owners_only, hide_in_help)]
pub async fn reload(mut ctx: PoiseContext<'_>) -> Result<(), Error> {
	let res = reload_impl(&mut ctx).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
