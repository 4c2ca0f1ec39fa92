//! Fuzzy song search.
//!
//! Every search key is scored against the query in a single forward pass
//! over both strings. Matches at the start of a key, at the start of a word,
//! or right after another match are rewarded; a query character that cannot
//! be found further along the key disqualifies the key entirely.

use std::collections::HashSet;

use super::chart::{Song, SongCache};

// {{{ Scoring
const START_SCORE: i32 = 30;
const WORD_SCORE: i32 = 20;
const MID_WORD_SCORE: i32 = 1;

/// Anything other than an ascii letter or digit splits words apart.
#[inline]
fn is_separator(c: char) -> bool {
	!c.is_ascii_alphanumeric()
}

/// Scores `key` against an already lowercased `query`.
///
/// Returns `0` when some query character has no match left in the key.
/// Matches far to the right of long keys can make the total negative.
pub fn score_key(query: &str, key: &str) -> i32 {
	let mut key_chars = key.chars();

	let mut at_start = true;
	let mut is_new_word = true;
	let mut word_count = 0;
	let mut last_match_score = 0;
	let mut total = 0;

	for q in query.chars() {
		let mut found = false;

		for k in key_chars.by_ref() {
			let separator = is_separator(k);
			let hit = q == k || (q.is_whitespace() && separator);

			let score = if !hit {
				0
			} else if at_start {
				START_SCORE
			} else if last_match_score > 0 {
				last_match_score + 1
			} else if is_new_word {
				WORD_SCORE - word_count
			} else {
				MID_WORD_SCORE
			};

			if separator {
				if !at_start {
					is_new_word = true;
					word_count += 1;
				}
			} else {
				is_new_word = false;
				at_start = false;
			}

			total += score;
			last_match_score = score;

			if hit {
				found = true;
				break;
			}
		}

		if !found {
			return 0;
		}
	}

	total
}
// }}}
// {{{ Ranking
/// A single scored search key.
#[derive(Debug, Clone, Copy)]
pub struct KeyMatch<'a> {
	pub key: &'a str,
	pub song: &'a Song,
	pub score: i32,
}

impl SongCache {
	/// Scores every search key against `query`, best first.
	///
	/// Ties are broken by comparing the keys themselves. Disqualified keys
	/// (score `0`) are left out. A song owning several matching keys shows
	/// up once per key.
	pub fn rank_keys(&self, query: &str) -> Vec<KeyMatch<'_>> {
		let query = query.to_lowercase();

		let mut matches: Vec<_> = self
			.search_keys
			.iter()
			.map(|search_key| KeyMatch {
				key: &search_key.key,
				song: self.song_at(search_key.song),
				score: score_key(&query, &search_key.key),
			})
			.filter(|m| m.score != 0)
			.collect();

		matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.key.cmp(b.key)));
		matches
	}

	/// Finds up to `limit` songs matching `query`, most relevant first.
	///
	/// A query equal to some song title (case-sensitive) returns that song
	/// alone, skipping fuzzy matching. Otherwise songs are returned in the
	/// order of their best scoring key, each song at most once.
	pub fn search(&self, query: &str, limit: usize) -> Vec<&Song> {
		if limit == 0 {
			return Vec::new();
		}

		if let Some(song) = self.lookup_title(query) {
			return vec![song];
		}

		let mut seen = HashSet::new();
		self.rank_keys(query)
			.into_iter()
			.filter(|m| seen.insert(m.song.id))
			.take(limit)
			.map(|m| m.song)
			.collect()
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod search_tests {
	use super::*;
	use crate::arcaea::chart::tests::song;

	fn ids(songs: &[&Song]) -> Vec<u32> {
		songs.iter().map(|s| s.id).collect()
	}

	fn catalog() -> SongCache {
		SongCache::build(vec![
			song(1, "Grievous Lady", &["grievous lady", "gl"], vec![]),
			song(2, "Lady M", &["lady m"], vec![]),
			song(3, "Fracture Ray", &["fracture ray", "fr"], vec![]),
			song(4, "Sayonara Hatsukoi", &["sayonara hatsukoi"], vec![]),
		])
	}

	// {{{ Per-key scoring
	#[test]
	fn contiguous_prefix_matches_stack_up() {
		assert_eq!(score_key("fr", "fracture ray"), 30 + 31);
		assert_eq!(score_key("lady", "lady m"), 30 + 31 + 32 + 33);
	}

	#[test]
	fn word_starts_score_by_position() {
		// `l` opens the second word
		assert_eq!(score_key("gl", "grievous lady"), 30 + 19);
		assert_eq!(score_key("lady", "grievous lady"), 19 + 20 + 21 + 22);
		assert_eq!(score_key("sh", "sayonara hatsukoi"), 30 + 19);
	}

	#[test]
	fn mid_word_matches_score_one() {
		assert_eq!(score_key("r", "fracture ray"), 1);
		assert_eq!(score_key("ray", "fracture ray"), 1 + 2 + 1);
	}

	#[test]
	fn whitespace_absorbs_any_separator() {
		assert_eq!(score_key("f r", "fracture ray"), 30 + 1 + 2);
		assert_eq!(score_key(" r", "fracture ray"), 1 + 2);
		assert_eq!(score_key("a b", "a-b"), 30 + 31 + 32);
	}

	#[test]
	fn leading_space_consumes_the_first_separator() {
		// The space eats the separator, leaving only `ray` for `f`
		assert_eq!(score_key(" fr", "fracture ray"), 0);
		// Keys are not lowercased, so `F` never matches `f` either
		assert_eq!(score_key(" fr", "Fracture Ray"), 0);
		assert_eq!(score_key("fr", "Fracture Ray"), 0);
	}

	#[test]
	fn cursor_never_moves_backwards() {
		assert_eq!(score_key("ba", "ab"), 0);
		assert_eq!(score_key("aa", "a"), 0);
		assert_eq!(score_key("ab", "ab"), 61);
	}

	#[test]
	fn empty_query_scores_nothing() {
		assert_eq!(score_key("", "fracture ray"), 0);
		assert_eq!(score_key("a", ""), 0);
	}

	#[test]
	fn far_right_words_can_go_negative() {
		let key = "a b c d e f g h i j k l m n o p q r s t u v w x y z";
		// `z` starts the 26th word, after 25 separators
		assert_eq!(score_key("z", key), 20 - 25);
	}

	#[test]
	fn non_ascii_is_scored_literally() {
		// `ö` is a separator, so the match is mid-word
		assert_eq!(score_key("ö", "föo"), 1);
		assert_eq!(score_key("ü", "föo"), 0);
	}
	// }}}
	// {{{ Search
	#[test]
	fn exact_title_short_circuits() {
		let cache = SongCache::build(vec![
			song(1, "Lady", &["ldy"], vec![]),
			song(2, "Lady Maker", &["lady"], vec![]),
		]);

		assert_eq!(ids(&cache.search("Lady", 5)), vec![1]);
		// Title matches are case sensitive, so this goes through fuzzy matching
		assert_eq!(ids(&cache.search("lady", 5)), vec![2]);
	}

	#[test]
	fn every_title_finds_itself() {
		let cache = catalog();
		for song in cache.songs() {
			assert_eq!(ids(&cache.search(&song.title, 10)), vec![song.id]);
		}
	}

	#[test]
	fn start_of_key_beats_later_words() {
		let cache = catalog();
		assert_eq!(ids(&cache.search("lady", 5)), vec![2, 1]);
		assert_eq!(ids(&cache.search("LADY", 5)), vec![2, 1]);
	}

	#[test]
	fn ties_prefer_the_smaller_key() {
		let cache = SongCache::build(vec![
			song(1, "One", &["abd"], vec![]),
			song(2, "Two", &["abc"], vec![]),
		]);

		let ranked = cache.rank_keys("ab");
		assert_eq!(ranked[0].score, ranked[1].score);
		assert_eq!(ranked[0].key, "abc");
		assert_eq!(ids(&cache.search("ab", 2)), vec![2, 1]);
	}

	#[test]
	fn songs_appear_once_even_with_several_matching_keys() {
		let cache = catalog();

		let ranked = cache.rank_keys("fr");
		assert_eq!(ranked[0].song.id, 3);
		assert_eq!(ranked[1].song.id, 3);

		let found = ids(&cache.search("fr", 5));
		assert_eq!(found[0], 3);
		assert_eq!(found.iter().filter(|id| **id == 3).count(), 1);
	}

	#[test]
	fn unmatched_queries_return_nothing() {
		let cache = catalog();
		assert!(cache.search("xyz123notfound", 5).is_empty());
		assert!(cache.search("", 5).is_empty());
		assert!(SongCache::build(Vec::new()).search("lady", 5).is_empty());
	}

	#[test]
	fn limit_is_respected() {
		let cache = catalog();
		assert!(cache.search("a", 0).is_empty());
		assert!(cache.search("Fracture Ray", 0).is_empty());
		assert_eq!(cache.search("a", 1).len(), 1);
		assert!(cache.search("a", 2).len() <= 2);
	}

	#[test]
	fn search_is_deterministic() {
		let cache = catalog();
		for query in ["a", "lady", "r", "s h", "gl"] {
			assert_eq!(ids(&cache.search(query, 4)), ids(&cache.search(query, 4)));
		}
	}
	// }}}
}
// }}}
