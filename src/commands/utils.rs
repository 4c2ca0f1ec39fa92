use anyhow::anyhow;

use crate::arcaea::chart::{Chart, Difficulty, Song, SongCache};
use crate::arcaea::rating::{display_chart_constant, display_rating, play_rating, Rating};
use crate::arcaea::score::Score;
use crate::context::{ErrorKind, TagError, TaggedError};

/// Best match for a user query.
pub fn find_song<'a>(songs: &'a SongCache, query: &str) -> Result<&'a Song, TaggedError> {
	if query.trim().is_empty() {
		return Err(anyhow!("No search query provided!").tag(ErrorKind::User));
	}

	songs
		.search(query, 1)
		.into_iter()
		.next()
		.ok_or_else(|| anyhow!("No matching song found for query `{query}`!").tag(ErrorKind::User))
}

pub fn find_chart(song: &Song, difficulty: Difficulty) -> Result<&Chart, TaggedError> {
	song.chart(difficulty).ok_or_else(|| {
		anyhow!(
			"Difficulty {difficulty} does not exist for the song {}!",
			song.alt_title
		)
		.tag(ErrorKind::User)
	})
}

/// Most calculations make no sense for charts without a known constant.
pub fn known_constant(song: &Song, chart: &Chart) -> Result<Rating, TaggedError> {
	chart.chart_constant.ok_or_else(|| {
		anyhow!(
			"Chart constant is unknown for the difficulty {} for the song {}!",
			chart.difficulty,
			song.alt_title
		)
		.tag(ErrorKind::User)
	})
}

/// `Lv9+ (9.8) (v1.0.0)`
#[inline]
pub fn chart_details(chart: &Chart) -> String {
	format!(
		"Lv{} ({}) (v{})",
		chart.level,
		display_chart_constant(chart.chart_constant),
		chart.version
	)
}

/// `Future (FTR) - Lv9+ (9.8) (v1.0.0)`
#[inline]
pub fn chart_summary(chart: &Chart) -> String {
	format!(
		"{} - {}",
		chart.difficulty.display_name(),
		chart_details(chart)
	)
}

/// Play rating of a score, or `?` for charts without a known constant.
#[inline]
pub fn rating_or_unknown(chart: &Chart, score: Score) -> String {
	match chart.chart_constant {
		Some(cc) => display_rating(play_rating(score, cc)),
		None => "?".to_owned(),
	}
}

#[cfg(test)]
mod utils_tests {
	use super::*;
	use crate::context::testing::get_test_songs;

	#[test]
	fn finds_songs_and_charts() {
		let songs = get_test_songs();

		let song = find_song(&songs, "quon dj").unwrap();
		assert_eq!(song.alt_title, "Quon (DJ Noriken)");
		assert_eq!(chart_summary(&song.charts[0]), "Future (FTR) - Lv9 (9.5) (v3.0.0)");

		let err = find_chart(song, Difficulty::BYD).unwrap_err();
		assert_eq!(err.kind, ErrorKind::User);
		assert_eq!(
			err.error.to_string(),
			"Difficulty BYD does not exist for the song Quon (DJ Noriken)!"
		);
	}

	#[test]
	fn reports_unknown_constants() {
		let songs = get_test_songs();
		let song = find_song(&songs, "testify").unwrap();
		let chart = find_chart(song, Difficulty::FTR).unwrap();

		assert_eq!(chart_details(chart), "Lv10+ (?) (v4.0.0)");
		assert_eq!(
			known_constant(song, chart).unwrap_err().error.to_string(),
			"Chart constant is unknown for the difficulty FTR for the song Testify!"
		);
	}

	#[test]
	fn empty_and_unmatched_queries_are_user_errors() {
		let songs = get_test_songs();

		assert_eq!(
			find_song(&songs, "  ").unwrap_err().error.to_string(),
			"No search query provided!"
		);
		assert_eq!(
			find_song(&songs, "xyzzy").unwrap_err().error.to_string(),
			"No matching song found for query `xyzzy`!"
		);
	}
}
