// {{{ Imports
use std::fmt::Write;

use anyhow::anyhow;
use chrono::Utc;
use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};
use tracing::debug;

use crate::arcaea::play::{
	average_rating, best_of, best_plays, save_score, scores_for_chart, scores_for_user,
	unsave_score, StoredScore, RETAINED_SCORES,
};
use crate::arcaea::rating::{display_chart_constant, display_rating, Rating};
use crate::context::{Error, ErrorKind, PoiseContext, TagError, TaggedError};

use super::args::{
	backward, parse_difficulty, parse_score, parse_score_id, song_and_difficulty, usage_error,
	Take,
};
use super::discord::MessageContext;
use super::utils::{chart_summary, find_chart, find_song, rating_or_unknown};
// }}}

// {{{ Save
// {{{ Implementation
const SAVE_USAGE: &str = "save [song] [diff] [score]";

pub async fn save_impl<C: MessageContext>(
	ctx: &mut C,
	params: &str,
) -> Result<StoredScore, TaggedError> {
	let prefix = ctx.data().prefix.clone();
	let (score, params) =
		backward(params, Take::Words(1)).ok_or_else(|| usage_error(&prefix, SAVE_USAGE))?;
	let (song, difficulty) = song_and_difficulty(&prefix, SAVE_USAGE, params)?;

	let score = parse_score(score)?;
	let songs = ctx.data().songs.snapshot();
	let song = find_song(&songs, song)?;
	let chart = find_chart(song, parse_difficulty(difficulty)?)?;

	let saved = {
		let mut conn = ctx.data().db.get()?;
		save_score(&mut conn, ctx.author_id(), chart.id, score, Utc::now())?
	};
	debug!("Saved score {} for user {}", saved.id, saved.user_id);

	let embed = CreateEmbed::default()
		.title("Score saved")
		.field("Song", song.to_string(), false)
		.field("Chart", chart_summary(chart), false)
		.field("Score", score.to_string(), true)
		.field("Play Rating", rating_or_unknown(chart, score), true)
		.field("Timestamp", saved.relative_timestamp(), true)
		.footer(CreateEmbedFooter::new(format!(
			"Send `{prefix}unsave {}` to delete this score.",
			saved.id
		)));

	ctx.send_embed(embed).await?;

	Ok(saved)
}
// }}}
// {{{ Tests
#[cfg(test)]
mod save_tests {
	use super::*;
	use crate::arcaea::score::Score;
	use crate::context::testing::get_mock_context;

	#[tokio::test]
	async fn saves_scores_for_the_author() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		let saved = save_impl(&mut ctx, "fracture ray ftr 995")
			.await
			.map_err(|e| e.error)?;
		assert_eq!(saved.user_id, 666);
		assert_eq!(saved.chart_id, 9);
		assert_eq!(saved.score, Score(9_950_000));

		assert_eq!(ctx.last_embed()["title"], "Score saved");
		assert_eq!(ctx.field("Score"), "9'950'000");
		assert_eq!(ctx.field("Play Rating"), "12.7500");
		assert_eq!(
			ctx.last_embed()["footer"]["text"],
			format!("Send `~unsave {}` to delete this score.", saved.id)
		);

		let conn = ctx.data.db.get()?;
		assert_eq!(scores_for_user(&conn, 666)?, vec![saved]);

		Ok(())
	}

	#[tokio::test]
	async fn unknown_constants_can_still_be_saved() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		save_impl(&mut ctx, "testify ftr 100")
			.await
			.map_err(|e| e.error)?;
		assert_eq!(ctx.field("Play Rating"), "?");

		let res = save_impl(&mut ctx, "testify 100").await;
		ctx.handle_error(res).await?;
		assert_eq!(
			ctx.last_reply(),
			"Invalid input, expecting `~save [song] [diff] [score]`!"
		);

		Ok(())
	}
}
// }}}
// {{{ Discord wrapper
/// Save a score
#[poise::command(prefix_command, slash_command)]
pub async fn save(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Song name, followed by the difficulty and the score"]
	args: Option<String>,
) -> Result<(), Error> {
	let res = save_impl(&mut ctx, args.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ Unsave
// {{{ Implementation
pub async fn unsave_impl<C: MessageContext>(
	ctx: &mut C,
	params: &str,
) -> Result<StoredScore, TaggedError> {
	let (id, _) = backward(params, Take::Rest)
		.ok_or_else(|| usage_error(&ctx.data().prefix, "unsave [score id]"))?;
	let score_id = parse_score_id(id)?;

	let deleted = {
		let mut conn = ctx.data().db.get()?;
		unsave_score(&mut conn, ctx.author_id(), score_id)?
	}
	.ok_or_else(|| anyhow!("You don't have a score with ID `{id}`!").tag(ErrorKind::User))?;

	let songs = ctx.data().songs.snapshot();
	let (song, chart) = songs
		.lookup_chart(deleted.chart_id)
		.ok_or_else(|| anyhow!("Chart id {} is not found in song data", deleted.chart_id))?;

	let embed = CreateEmbed::default()
		.title("Score deleted")
		.field("Song", song.to_string(), false)
		.field("Chart", chart_summary(chart), false)
		.field("Score", deleted.score.to_string(), true)
		.field("Timestamp", deleted.relative_timestamp(), true);

	ctx.send_embed(embed).await?;

	Ok(deleted)
}
// }}}
// {{{ Tests
#[cfg(test)]
mod unsave_tests {
	use super::*;
	use crate::context::testing::get_mock_context;

	#[tokio::test]
	async fn only_deletes_own_scores() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		let saved = save_impl(&mut ctx, "grievous lady ftr 980")
			.await
			.map_err(|e| e.error)?;
		let params = saved.id.to_string();

		ctx.user_id = 1;
		let res = unsave_impl(&mut ctx, &params).await;
		ctx.handle_error(res).await?;
		assert_eq!(
			ctx.last_reply(),
			format!("You don't have a score with ID `{}`!", saved.id)
		);

		ctx.user_id = 666;
		let deleted = unsave_impl(&mut ctx, &params)
			.await
			.map_err(|e| e.error)?;
		assert_eq!(deleted, saved);
		assert_eq!(ctx.last_embed()["title"], "Score deleted");
		assert_eq!(ctx.field("Chart"), "Future (FTR) - Lv11 (11.3) (v1.5.0)");

		let res = unsave_impl(&mut ctx, &params).await;
		ctx.handle_error(res).await?;
		assert!(ctx.last_reply().starts_with("You don't have a score with ID"));

		Ok(())
	}

	#[tokio::test]
	async fn rejects_malformed_ids() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		let res = unsave_impl(&mut ctx, "abc").await;
		ctx.handle_error(res).await?;
		assert_eq!(ctx.last_reply(), "Invalid score ID `abc`!");

		let res = unsave_impl(&mut ctx, "  ").await;
		ctx.handle_error(res).await?;
		assert_eq!(ctx.last_reply(), "Invalid input, expecting `~unsave [score id]`!");

		Ok(())
	}
}
// }}}
// {{{ Discord wrapper
/// Delete one of your saved scores
#[poise::command(prefix_command, slash_command)]
pub async fn unsave(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "ID of the score to delete"]
	id: Option<String>,
) -> Result<(), Error> {
	let res = unsave_impl(&mut ctx, id.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ Scores
// {{{ Implementation
pub async fn scores_impl<C: MessageContext>(
	ctx: &mut C,
	params: &str,
) -> Result<Vec<StoredScore>, TaggedError> {
	let (song, difficulty) =
		song_and_difficulty(&ctx.data().prefix, "scores [song] [diff]", params)?;

	let songs = ctx.data().songs.snapshot();
	let song = find_song(&songs, song)?;
	let chart = find_chart(song, parse_difficulty(difficulty)?)?;

	let mut scores = {
		let conn = ctx.data().db.get()?;
		scores_for_chart(&conn, ctx.author_id(), chart.id)?
	};

	let best = best_of(&scores).cloned().ok_or_else(|| {
		anyhow!("You don't have any scores saved for this chart!").tag(ErrorKind::User)
	})?;

	scores.sort_by(|a, b| {
		b.created_at
			.cmp(&a.created_at)
			.then_with(|| b.id.cmp(&a.id))
	});

	let mut recent = String::from("**Recent scores**\n");
	for (i, score) in scores.iter().enumerate() {
		writeln!(
			recent,
			"{}. {} ({})\n  -# Score ID: {}",
			i + 1,
			score.score,
			score.relative_timestamp(),
			score.id
		)?;
	}

	let embed = CreateEmbed::default()
		.title(format!(
			"Saved Scores for {} - {} Lv{}",
			song.alt_title,
			chart.difficulty.display_name(),
			chart.level
		))
		.field(
			"Best score",
			format!(
				"{} (Play Rating {})\n{}\n-# Score ID: {}",
				best.score,
				rating_or_unknown(chart, best.score),
				best.relative_timestamp(),
				best.id
			),
			false,
		)
		.description(recent);

	ctx.send_embed(embed).await?;

	Ok(scores)
}
// }}}
// {{{ Tests
#[cfg(test)]
mod scores_tests {
	use super::*;
	use crate::context::testing::get_mock_context;

	#[tokio::test]
	async fn shows_best_and_recent_scores() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		let mut ids = Vec::new();
		for score in ["980", "100", "950"] {
			let saved = save_impl(&mut ctx, &format!("grievous lady ftr {score}"))
				.await
				.map_err(|e| e.error)?;
			ids.push(saved.id);
		}

		let scores = scores_impl(&mut ctx, "grievous lady ftr")
			.await
			.map_err(|e| e.error)?;
		let order: Vec<_> = scores.iter().map(|s| s.id).collect();
		assert_eq!(order, vec![ids[2], ids[1], ids[0]]);

		assert_eq!(
			ctx.last_embed()["title"],
			"Saved Scores for Grievous Lady - Future (FTR) Lv11"
		);

		let best = ctx.field("Best score");
		assert!(best.starts_with("10'000'000 (Play Rating 13.3000)"));
		assert!(best.ends_with(&format!("-# Score ID: {}", ids[1])));

		let recent = ctx.last_embed()["description"].as_str().unwrap_or_default().to_owned();
		assert!(recent.starts_with("**Recent scores**\n1. 9'500'000"));

		Ok(())
	}

	#[tokio::test]
	async fn empty_charts_are_reported() -> Result<(), Error> {
		let (mut ctx, _guard) = get_mock_context()?;

		let res = scores_impl(&mut ctx, "grievous lady prs").await;
		ctx.handle_error(res).await?;
		assert_eq!(
			ctx.last_reply(),
			"You don't have any scores saved for this chart!"
		);

		Ok(())
	}
}
// }}}
// {{{ Discord wrapper
/// Show your saved scores on a chart
#[poise::command(prefix_command, slash_command)]
pub async fn scores(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Song name, followed by the difficulty"]
	args: Option<String>,
) -> Result<(), Error> {
	let res = scores_impl(&mut ctx, args.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ B30
// {{{ Implementation
pub async fn b30_impl<C: MessageContext>(ctx: &mut C) -> Result<Rating, TaggedError> {
	let scores = {
		let conn = ctx.data().db.get()?;
		scores_for_user(&conn, ctx.author_id())?
	};

	if scores.is_empty() {
		return Err(anyhow!("You don't have any scores saved!").tag(ErrorKind::User));
	}

	let songs = ctx.data().songs.snapshot();
	let plays = best_plays(&songs, scores, RETAINED_SCORES)?;
	let average = average_rating(&plays).ok_or_else(|| {
		anyhow!("None of your saved scores are on charts with a known chart constant!")
			.tag(ErrorKind::User)
	})?;

	let mut description = String::new();
	for (i, play) in plays.iter().enumerate() {
		writeln!(
			description,
			"{}. {} - {} Lv{} ({}) - {} - **{}**",
			i + 1,
			play.song.alt_title,
			play.chart.difficulty.display_name(),
			play.chart.level,
			display_chart_constant(play.chart.chart_constant),
			play.score.score,
			display_rating(play.rating)
		)?;
	}
	write!(description, "\nAverage rating: **{}**", display_rating(average))?;

	let embed = CreateEmbed::default()
		.title("Highest 30 Play Ratings from Saved Scores")
		.description(description);

	ctx.send_embed(embed).await?;

	Ok(average)
}
// }}}
// {{{ Discord wrapper
/// Show your 30 best play ratings
#[poise::command(prefix_command, slash_command, user_cooldown = 10)]
pub async fn b30(mut ctx: PoiseContext<'_>) -> Result<(), Error> {
	let res = b30_impl(&mut ctx).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
