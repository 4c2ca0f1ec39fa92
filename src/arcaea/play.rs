use anyhow::anyhow;
use chrono::{DateTime, Utc};
use num::{Rational32, Zero};
use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::arcaea::chart::{Chart, Song, SongCache};
use crate::context::Error;

use super::rating::{actual_play_rating, Rating};
use super::score::Score;

/// How many of the most recent scores are kept per user and chart.
/// The best score is kept on top of these.
pub const RETAINED_SCORES: usize = 30;

// {{{ Stored score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredScore {
	pub id: i64,
	pub user_id: u64,
	pub chart_id: u32,
	pub score: Score,
	pub created_at: DateTime<Utc>,
}

impl StoredScore {
	// {{{ Row parsing
	#[inline]
	pub fn from_sql(row: &Row) -> Result<Self, rusqlite::Error> {
		let millis: i64 = row.get("created_at")?;
		let created_at = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
			rusqlite::Error::FromSqlConversionFailure(
				row.as_ref().column_index("created_at").unwrap_or_default(),
				rusqlite::types::Type::Integer,
				format!("Timestamp {millis} is out of range").into(),
			)
		})?;

		Ok(Self {
			id: row.get("id")?,
			user_id: row.get::<_, i64>("user_id")? as u64,
			chart_id: row.get("chart_id")?,
			score: Score(row.get("score")?),
			created_at,
		})
	}
	// }}}

	/// Discord timestamp markdown, rendered relative to the reader's clock.
	#[inline]
	pub fn relative_timestamp(&self) -> String {
		format!("<t:{}:R>", self.created_at.timestamp())
	}
}
// }}}
// {{{ Queries
pub fn score_by_id(conn: &Connection, id: i64) -> Result<Option<StoredScore>, Error> {
	let score = conn
		.prepare_cached("SELECT * FROM scores WHERE id=?")?
		.query_map([id], StoredScore::from_sql)?
		.next()
		.transpose()?;

	Ok(score)
}

pub fn scores_for_user(conn: &Connection, user_id: u64) -> Result<Vec<StoredScore>, Error> {
	let scores = conn
		.prepare_cached("SELECT * FROM scores WHERE user_id=? ORDER BY id")?
		.query_map([user_id as i64], StoredScore::from_sql)?
		.collect::<Result<Vec<_>, _>>()?;

	Ok(scores)
}

pub fn scores_for_chart(
	conn: &Connection,
	user_id: u64,
	chart_id: u32,
) -> Result<Vec<StoredScore>, Error> {
	let scores = conn
		.prepare_cached("SELECT * FROM scores WHERE user_id=? AND chart_id=? ORDER BY id")?
		.query_map((user_id as i64, chart_id), StoredScore::from_sql)?
		.collect::<Result<Vec<_>, _>>()?;

	Ok(scores)
}

/// Returns whether a score with the given id existed.
pub fn delete_score(conn: &Connection, id: i64) -> Result<bool, Error> {
	let rows_changed = conn
		.prepare_cached("DELETE FROM scores WHERE id=?")?
		.execute([id])?;

	Ok(rows_changed > 0)
}

/// The first score reaching the highest value, which makes older scores win ties.
pub fn best_of(scores: &[StoredScore]) -> Option<&StoredScore> {
	scores
		.iter()
		.fold(None, |best: Option<&StoredScore>, current| match best {
			Some(best) if best.score >= current.score => Some(best),
			_ => Some(current),
		})
}
// }}}
// {{{ Save score
/// Saves a new score, dropping old ones past [RETAINED_SCORES].
///
/// Everything happens inside a single transaction.
pub fn save_score(
	conn: &mut Connection,
	user_id: u64,
	chart_id: u32,
	score: Score,
	now: DateTime<Utc>,
) -> Result<StoredScore, Error> {
	let transaction = conn.transaction()?;

	// {{{ Make room for the new score
	let mut existing = scores_for_chart(&transaction, user_id, chart_id)?;
	if existing.len() >= RETAINED_SCORES {
		let best_id = best_of(&existing).map(|s| s.id);
		existing.sort_by_key(|s| (s.created_at, s.id));

		if best_id != Some(existing[0].id) {
			delete_score(&transaction, existing[0].id)?;
		} else if existing.len() > RETAINED_SCORES {
			delete_score(&transaction, existing[1].id)?;
		}
	}
	// }}}

	let id = transaction
		.prepare_cached(
			"
        INSERT INTO scores(user_id,chart_id,score,created_at)
        VALUES (?,?,?,?)
        RETURNING id
      ",
		)?
		.query_row(
			(user_id as i64, chart_id, score.0, now.timestamp_millis()),
			|row| row.get("id"),
		)?;

	transaction.commit()?;

	Ok(StoredScore {
		id,
		user_id,
		chart_id,
		score,
		created_at: DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now),
	})
}
// }}}
// {{{ Unsave score
/// Deletes a score, but only when it belongs to `user_id`.
///
/// Returns the deleted score, or `None` when the user has no score with that id.
pub fn unsave_score(
	conn: &mut Connection,
	user_id: u64,
	id: i64,
) -> Result<Option<StoredScore>, Error> {
	let transaction = conn.transaction()?;

	let score = match score_by_id(&transaction, id)? {
		Some(score) if score.user_id == user_id => score,
		_ => return Ok(None),
	};

	delete_score(&transaction, id)?;
	transaction.commit()?;

	Ok(Some(score))
}
// }}}
// {{{ Best plays
#[derive(Debug, Clone)]
pub struct BestPlay<'a> {
	pub song: &'a Song,
	pub chart: &'a Chart,
	pub score: StoredScore,
	pub rating: Rating,
}

/// Picks the best score on every chart, sorted by play rating.
///
/// Charts with unknown constants are skipped. Scores pointing to charts
/// missing from the song data are reported as errors.
pub fn best_plays<'a>(
	songs: &'a SongCache,
	scores: Vec<StoredScore>,
	limit: usize,
) -> Result<Vec<BestPlay<'a>>, Error> {
	let mut best: Vec<StoredScore> = Vec::new();
	for score in scores {
		match best.iter_mut().find(|b| b.chart_id == score.chart_id) {
			Some(current) if current.score >= score.score => {}
			Some(current) => *current = score,
			None => best.push(score),
		}
	}

	let mut plays = Vec::with_capacity(best.len());
	for score in best {
		let (song, chart) = songs.lookup_chart(score.chart_id).ok_or_else(|| {
			anyhow!("Chart id {} is not found in song data", score.chart_id)
		})?;

		let Some(cc) = chart.chart_constant else {
			continue;
		};

		plays.push(BestPlay {
			song,
			chart,
			rating: actual_play_rating(score.score, cc),
			score,
		});
	}

	plays.sort_by(|a, b| {
		b.rating
			.cmp(&a.rating)
			.then_with(|| a.chart.id.cmp(&b.chart.id))
	});
	plays.truncate(limit);

	Ok(plays)
}

/// Average rating of a collection of plays, or `None` for no plays at all.
pub fn average_rating(plays: &[BestPlay]) -> Option<Rating> {
	if plays.is_empty() {
		return None;
	}

	let sum = plays
		.iter()
		.fold(Rating::zero(), |acc, play| acc + play.rating);
	Some(sum / Rational32::from_integer(plays.len() as i32))
}
// }}}
