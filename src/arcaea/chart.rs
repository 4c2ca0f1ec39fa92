use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rating::{deserialize_chart_constant, serialize_chart_constant, Rating};

// {{{ Difficuly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	PST,
	PRS,
	FTR,
	ETR,
	BYD,
}

impl Difficulty {
	pub const DIFFICULTIES: [Difficulty; 5] =
		[Self::PST, Self::PRS, Self::FTR, Self::ETR, Self::BYD];

	pub const DIFFICULTY_SHORTHANDS: [&'static str; 5] = ["PST", "PRS", "FTR", "ETR", "BYD"];
	pub const DIFFICULTY_STRINGS: [&'static str; 5] =
		["PAST", "PRESENT", "FUTURE", "ETERNAL", "BEYOND"];
	pub const DISPLAY_NAMES: [&'static str; 5] = [
		"Past (PST)",
		"Present (PRS)",
		"Future (FTR)",
		"Eternal (ETR)",
		"Beyond (BYD)",
	];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}

	#[inline]
	pub fn shorthand(self) -> &'static str {
		Self::DIFFICULTY_SHORTHANDS[self.to_index()]
	}

	/// Name shown to users, like `Future (FTR)`.
	#[inline]
	pub fn display_name(self) -> &'static str {
		Self::DISPLAY_NAMES[self.to_index()]
	}
}

/// Accepts both shorthands (`ftr`) and full names (`future`), ignoring case.
impl FromStr for Difficulty {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		let upper = value.to_uppercase();
		for i in 0..Self::DIFFICULTIES.len() {
			if upper == Self::DIFFICULTY_SHORTHANDS[i] || upper == Self::DIFFICULTY_STRINGS[i] {
				return Ok(Self::DIFFICULTIES[i]);
			}
		}

		Err(format!("Cannot convert {} to difficulty", value))
	}
}

impl Display for Difficulty {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.shorthand())
	}
}
// }}}
// {{{ Level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
	One,
	Two,
	Three,
	Four,
	Five,
	Six,
	Seven,
	SevenP,
	Eight,
	EightP,
	Nine,
	NineP,
	Ten,
	TenP,
	Eleven,
	ElevenP,
	Twelve,
}

impl Level {
	pub const LEVELS: [Self; 17] = [
		Self::One,
		Self::Two,
		Self::Three,
		Self::Four,
		Self::Five,
		Self::Six,
		Self::Seven,
		Self::SevenP,
		Self::Eight,
		Self::EightP,
		Self::Nine,
		Self::NineP,
		Self::Ten,
		Self::TenP,
		Self::Eleven,
		Self::ElevenP,
		Self::Twelve,
	];

	pub const LEVEL_STRINGS: [&'static str; 17] = [
		"1", "2", "3", "4", "5", "6", "7", "7+", "8", "8+", "9", "9+", "10", "10+", "11", "11+",
		"12",
	];

	#[inline]
	pub fn to_index(self) -> usize {
		self as usize
	}
}

impl Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", Self::LEVEL_STRINGS[self.to_index()])
	}
}

impl FromStr for Level {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		for (i, s) in Self::LEVEL_STRINGS.iter().enumerate() {
			if value == *s {
				return Ok(Self::LEVELS[i]);
			}
		}

		Err(format!("Cannot convert {} to a level", value))
	}
}

impl TryFrom<String> for Level {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<Level> for String {
	fn from(level: Level) -> Self {
		level.to_string()
	}
}
// }}}
// {{{ Chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
	pub id: u32,

	#[serde(rename = "diff")]
	pub difficulty: Difficulty,
	pub level: Level,

	/// `None` when the constant is not known yet (stored as `0` in song data).
	#[serde(
		rename = "cc",
		deserialize_with = "deserialize_chart_constant",
		serialize_with = "serialize_chart_constant"
	)]
	pub chart_constant: Option<Rating>,

	#[serde(rename = "ver")]
	pub version: String,
}
// }}}
// {{{ Song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
	pub id: u32,
	pub title: String,

	/// Disambiguated title (`Title (Artist)`) for songs sharing a title.
	#[serde(rename = "altTitle")]
	pub alt_title: String,
	pub artist: String,

	pub charts: Vec<Chart>,

	/// Strings used purely for fuzzy matching.
	#[serde(rename = "searchKeys")]
	pub search_keys: Vec<String>,
}

impl Song {
	#[inline]
	pub fn chart(&self, difficulty: Difficulty) -> Option<&Chart> {
		self.charts.iter().find(|c| c.difficulty == difficulty)
	}
}

impl Display for Song {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} - {}", self.title, self.artist)
	}
}
// }}}
// {{{ Song cache
#[derive(Debug, Clone, Copy)]
struct ChartLocation {
	song: usize,
	chart: usize,
}

/// A search key paired with the song it resolves to.
#[derive(Debug, Clone)]
pub(super) struct SearchKey {
	pub key: String,
	pub song: usize,
}

/// Immutable lookup structures derived from a list of songs.
///
/// Songs are stored once. Every map points into `songs` by position,
/// except for the chart → song map, which only records the song id.
#[derive(Debug, Clone, Default)]
pub struct SongCache {
	songs: Vec<Song>,

	by_title: HashMap<String, usize>,
	by_key: HashMap<String, usize>,
	by_id: HashMap<u32, usize>,
	charts: HashMap<u32, ChartLocation>,
	chart_songs: HashMap<u32, u32>,

	/// Every registered search key, in song data order.
	/// Keys are not deduplicated, so a key shared by two songs appears twice,
	/// both times resolving to the song that owns the key in `by_key`.
	pub(super) search_keys: Vec<SearchKey>,
}

impl SongCache {
	// {{{ Build
	/// Builds every lookup map in one pass over `songs`.
	///
	/// Collisions follow a keep-last policy: when two songs share a title
	/// (or a search key, or an id), the one appearing later in `songs` wins.
	pub fn build(songs: Vec<Song>) -> Self {
		let mut result = Self::default();

		for (index, song) in songs.iter().enumerate() {
			result.by_title.insert(song.title.clone(), index);
			result.by_id.insert(song.id, index);

			for key in &song.search_keys {
				result.by_key.insert(key.clone(), index);
			}

			for (chart_index, chart) in song.charts.iter().enumerate() {
				result.charts.insert(
					chart.id,
					ChartLocation {
						song: index,
						chart: chart_index,
					},
				);
				result.chart_songs.insert(chart.id, song.id);
			}
		}

		// Resolved after every insert so keys follow the keep-last policy
		result.search_keys = songs
			.iter()
			.flat_map(|song| song.search_keys.iter())
			.filter_map(|key| {
				let song = *result.by_key.get(key)?;
				Some(SearchKey {
					key: key.clone(),
					song,
				})
			})
			.collect();

		result.songs = songs;
		result
	}
	// }}}
	// {{{ Lookups
	#[inline]
	pub fn len(&self) -> usize {
		self.songs.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.songs.is_empty()
	}

	#[inline]
	pub fn songs(&self) -> impl Iterator<Item = &Song> {
		self.songs.iter()
	}

	#[inline]
	pub fn charts(&self) -> impl Iterator<Item = (&Song, &Chart)> {
		self.songs
			.iter()
			.flat_map(|song| song.charts.iter().map(move |chart| (song, chart)))
	}

	#[inline]
	pub(super) fn song_at(&self, index: usize) -> &Song {
		&self.songs[index]
	}

	/// Exact, case-sensitive title lookup.
	#[inline]
	pub fn lookup_title(&self, title: &str) -> Option<&Song> {
		self.by_title.get(title).map(|i| &self.songs[*i])
	}

	#[inline]
	pub fn lookup_song(&self, id: u32) -> Option<&Song> {
		self.by_id.get(&id).map(|i| &self.songs[*i])
	}

	/// Resolves a chart id back to the chart and the song owning it.
	///
	/// The id `0` is reserved for "no chart" and never resolves.
	pub fn lookup_chart(&self, chart_id: u32) -> Option<(&Song, &Chart)> {
		if chart_id == 0 {
			return None;
		}

		let location = self.charts.get(&chart_id)?;
		let song_id = self.chart_songs.get(&chart_id)?;
		let song = self.lookup_song(*song_id)?;
		let chart = self.songs.get(location.song)?.charts.get(location.chart)?;

		Some((song, chart))
	}
	// }}}
}
// }}}
// {{{ Tests
#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::arcaea::rating::rating_from_fixed;

	pub fn chart(id: u32, difficulty: Difficulty, level: Level, cc: i32) -> Chart {
		Chart {
			id,
			difficulty,
			level,
			chart_constant: (cc != 0).then(|| rating_from_fixed(cc)),
			version: "1.0.0".to_owned(),
		}
	}

	pub fn song(id: u32, title: &str, keys: &[&str], charts: Vec<Chart>) -> Song {
		Song {
			id,
			title: title.to_owned(),
			alt_title: title.to_owned(),
			artist: "Unknown".to_owned(),
			charts,
			search_keys: keys.iter().map(|k| (*k).to_owned()).collect(),
		}
	}

	#[test]
	fn difficulty_parses_shorthands_and_names() {
		assert_eq!("ftr".parse::<Difficulty>(), Ok(Difficulty::FTR));
		assert_eq!("Beyond".parse::<Difficulty>(), Ok(Difficulty::BYD));
		assert_eq!("ETR".parse::<Difficulty>(), Ok(Difficulty::ETR));
		assert!("hard".parse::<Difficulty>().is_err());
		assert_eq!(Difficulty::PRS.display_name(), "Present (PRS)");
	}

	#[test]
	fn level_round_trips_through_strings() {
		for level in Level::LEVELS {
			assert_eq!(level.to_string().parse::<Level>(), Ok(level));
		}

		assert!("13".parse::<Level>().is_err());
		assert!("?".parse::<Level>().is_err());
	}

	#[test]
	fn deserializes_song_data_records() {
		let raw = r#"{
			"id": 7,
			"title": "Fracture Ray",
			"altTitle": "Fracture Ray",
			"artist": "Sakuzyo",
			"charts": [
				{ "id": 19, "diff": "ftr", "level": "11", "cc": 11.0, "ver": "1.5.0" },
				{ "id": 20, "diff": "byd", "level": "11+", "cc": 0, "ver": "6.0.0" }
			],
			"searchKeys": ["fracture ray", "fr"]
		}"#;

		let song: Song = serde_json::from_str(raw).unwrap();
		assert_eq!(song.charts.len(), 2);
		assert_eq!(song.charts[0].chart_constant, Some(rating_from_fixed(1100)));
		assert_eq!(song.charts[1].level, Level::ElevenP);
		assert_eq!(song.charts[1].chart_constant, None);
		assert_eq!(song.chart(Difficulty::BYD).map(|c| c.id), Some(20));
	}

	#[test]
	fn rejects_unknown_levels() {
		let raw = r#"{ "id": 1, "diff": "ftr", "level": "13", "cc": 1.0, "ver": "1.0.0" }"#;
		assert!(serde_json::from_str::<Chart>(raw).is_err());
	}

	#[test]
	fn empty_catalog_has_empty_maps() {
		let cache = SongCache::build(Vec::new());
		assert!(cache.is_empty());
		assert!(cache.lookup_title("").is_none());
		assert!(cache.lookup_chart(1).is_none());
		assert!(cache.search_keys.is_empty());
	}

	#[test]
	fn resolves_charts_to_their_song() {
		let cache = SongCache::build(vec![
			song(1, "A", &["a"], vec![chart(1, Difficulty::PST, Level::Two, 200)]),
			song(
				2,
				"B",
				&["b"],
				vec![
					chart(2, Difficulty::PST, Level::Three, 300),
					chart(3, Difficulty::FTR, Level::Nine, 950),
				],
			),
		]);

		let (song, chart) = cache.lookup_chart(3).unwrap();
		assert_eq!(song.id, 2);
		assert_eq!(chart.difficulty, Difficulty::FTR);
		assert!(cache.lookup_chart(4).is_none());
	}

	#[test]
	fn chart_id_zero_never_resolves() {
		let cache = SongCache::build(vec![song(
			1,
			"A",
			&["a"],
			vec![chart(0, Difficulty::PST, Level::One, 100)],
		)]);

		assert!(cache.lookup_chart(0).is_none());
	}

	#[test]
	fn collisions_keep_the_last_song() {
		let cache = SongCache::build(vec![
			song(1, "Quon", &["quon", "shared"], vec![]),
			song(2, "Quon", &["shared"], vec![]),
		]);

		assert_eq!(cache.lookup_title("Quon").map(|s| s.id), Some(2));

		let resolved: Vec<_> = cache
			.search_keys
			.iter()
			.map(|k| (k.key.as_str(), cache.song_at(k.song).id))
			.collect();
		assert_eq!(resolved, vec![("quon", 1), ("shared", 2), ("shared", 2)]);
	}
}
// }}}
