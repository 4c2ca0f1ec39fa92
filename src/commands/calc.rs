// {{{ Imports
use num::Zero;
use poise::serenity_prelude::CreateEmbed;

use crate::arcaea::chart::{Chart, Song, SongCache};
use crate::arcaea::rating::{
	actual_play_rating, display_rating, displayed_step_progress, play_rating, rating_as_f64,
	step_progress, Rating,
};
use crate::arcaea::score::Score;
use crate::context::{Error, PoiseContext, TaggedError};

use super::args::{
	backward, forward, parse_difficulty, parse_score, parse_step, usage_error, Take,
};
use super::discord::MessageContext;
use super::utils::{chart_summary, find_chart, find_song, known_constant};
// }}}

// {{{ Shared argument parsing
/// Parses the trailing `[song] [diff] [score]` arguments, resolving
/// the chart and making sure its constant is known.
fn chart_and_score<'a, C: MessageContext>(
	ctx: &C,
	songs: &'a SongCache,
	usage: &str,
	params: &str,
) -> Result<(&'a Song, &'a Chart, Rating, Score), TaggedError> {
	let prefix = &ctx.data().prefix;
	let (score, params) =
		backward(params, Take::Words(1)).ok_or_else(|| usage_error(prefix, usage))?;
	let (difficulty, params) =
		backward(params, Take::Words(1)).ok_or_else(|| usage_error(prefix, usage))?;
	let (name, _) = backward(params, Take::Rest).ok_or_else(|| usage_error(prefix, usage))?;

	let score = parse_score(score)?;
	let song = find_song(songs, name)?;
	let chart = find_chart(song, parse_difficulty(difficulty)?)?;
	let cc = known_constant(song, chart)?;

	Ok((song, chart, cc, score))
}
// }}}
// {{{ Play rating
// {{{ Implementation
const PTT_USAGE: &str = "ptt [song] [diff] [score]";

fn rating_formula(score: Score, cc: Rating) -> String {
	let rating = play_rating(score, cc);
	let cc = rating_as_f64(cc);
	let score = score.0;

	if score >= 10_000_000 {
		format!("{cc:.1} + 2.0 = **{}**", display_rating(rating))
	} else if score >= 9_800_000 {
		format!(
			"{cc:.1} + 1.0 + (({score} - 9800000) / 200000) = **{}**",
			display_rating(rating)
		)
	} else if rating >= Rating::zero() {
		format!(
			"{cc:.1} + ({score} - 9500000) / 300000 = **{}**",
			display_rating(rating)
		)
	} else {
		format!(
			"{cc:.1} + ({score} - 9500000) / 300000 = {} (considered as **0.0**)",
			display_rating(rating)
		)
	}
}

pub async fn ptt_impl<C: MessageContext>(ctx: &mut C, params: &str) -> Result<Rating, TaggedError> {
	let songs = ctx.data().songs.snapshot();
	let (song, chart, cc, score) = chart_and_score(ctx, &songs, PTT_USAGE, params)?;

	let embed = CreateEmbed::default()
		.field("Song", song.to_string(), false)
		.field("Chart", chart_summary(chart), false)
		.field("Score", score.0.to_string(), false)
		.field("Play Rating", rating_formula(score, cc), false);

	ctx.send_embed(embed).await?;

	Ok(actual_play_rating(score, cc))
}
// }}}
// {{{ Discord wrapper
/// Compute the play rating of a score
#[poise::command(prefix_command, slash_command, aliases("rating"))]
pub async fn ptt(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Song name, followed by the difficulty and the score"]
	args: Option<String>,
) -> Result<(), Error> {
	let res = ptt_impl(&mut ctx, args.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
// {{{ Step
// {{{ Implementation
const STEP_USAGE: &str = "step [step] [song] [diff] [score]";

const STEP_NOTES: &str = "\
-# - There might be a ±0.1 difference in actual progress gained due to differences in calculation performed by the game.
-# - For partner progression bonuses, __add__ them to the value above before calculating Play+ and fragment boosts.
-# - For Play+ boost, __multiply__ the value by stamina used. For fragment boost, further __multiply__ the value by boost multiplier.";

pub async fn step_impl<C: MessageContext>(ctx: &mut C, params: &str) -> Result<f64, TaggedError> {
	let (step, params) = forward(params, Take::Words(1))
		.ok_or_else(|| usage_error(&ctx.data().prefix, STEP_USAGE))?;
	let step = parse_step(step)?;

	let songs = ctx.data().songs.snapshot();
	let (song, chart, cc, score) = chart_and_score(ctx, &songs, STEP_USAGE, params)?;

	let rating = actual_play_rating(score, cc);
	let progress = step_progress(rating, step);
	let formula = format!(
		"(2.45 * sqrt({}) + 2.5) * ({step} / 50) = **{progress:.4}** (shown as **{:.1}**)",
		display_rating(rating),
		displayed_step_progress(progress)
	);

	let embed = CreateEmbed::default()
		.field("Song", song.to_string(), false)
		.field("Chart", chart_summary(chart), false)
		.field("Score", score.0.to_string(), true)
		.field("Play Rating", display_rating(rating), true)
		.field("Step stat", step.to_string(), true)
		.field("Progress gained", format!("{formula}\n\n{STEP_NOTES}"), false);

	ctx.send_embed(embed).await?;

	Ok(progress)
}
// }}}
// {{{ Discord wrapper
/// Compute the world mode progress of a play
#[poise::command(prefix_command, slash_command)]
pub async fn step(
	mut ctx: PoiseContext<'_>,
	#[rest]
	#[description = "Step stat, song name, difficulty and score"]
	args: Option<String>,
) -> Result<(), Error> {
	let res = step_impl(&mut ctx, args.as_deref().unwrap_or_default()).await;
	ctx.handle_error(res).await?;

	Ok(())
}
// }}}
// }}}
