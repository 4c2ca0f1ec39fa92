use num::{Rational32, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serializer};

use super::score::Score;

pub type Rating = Rational32;

/// Saves a rating rational as an integer where it's multiplied by 100.
#[inline]
pub fn rating_as_fixed(rating: Rating) -> i32 {
	(rating * Rational32::from_integer(100))
		.round()
		.to_integer()
}

/// Converts a rating to a float without rounding it first.
#[inline]
pub fn rating_as_f64(rating: Rating) -> f64 {
	rating.to_f64().unwrap_or_default()
}

/// The pseudo-inverse of `rating_as_fixed`.
#[inline]
pub fn rating_from_fixed(fixed: i32) -> Rating {
	Rating::new(fixed, 100)
}

// {{{ Chart constants
/// Song data stores chart constants as floats, using `0` for unknown values.
pub fn deserialize_chart_constant<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = f64::deserialize(deserializer)?;
	if raw == 0.0 {
		Ok(None)
	} else {
		Ok(Some(rating_from_fixed((raw * 100.0).round() as i32)))
	}
}

pub fn serialize_chart_constant<S>(cc: &Option<Rating>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	serializer.serialize_f64(cc.map(rating_as_f64).unwrap_or(0.0))
}

/// Chart constants are shown with one decimal, or `?` when unknown.
#[inline]
pub fn display_chart_constant(cc: Option<Rating>) -> String {
	match cc {
		Some(cc) => format!("{:.1}", rating_as_f64(cc)),
		None => "?".to_owned(),
	}
}
// }}}
// {{{ Score => Play rating
/// The raw play rating of a score, which goes negative for low scores.
pub fn play_rating(score: Score, chart_constant: Rating) -> Rating {
	let score = score.0 as i32;
	chart_constant
		+ if score >= 10_000_000 {
			Rational32::from_integer(2)
		} else if score >= 9_800_000 {
			Rational32::from_integer(1) + Rational32::new(score - 9_800_000, 200_000)
		} else {
			Rational32::new(score - 9_500_000, 300_000)
		}
}

/// Same as [play_rating], except negative ratings are counted as zero.
#[inline]
pub fn actual_play_rating(score: Score, chart_constant: Rating) -> Rating {
	let rating = play_rating(score, chart_constant);
	if rating < Rating::zero() {
		Rating::zero()
	} else {
		rating
	}
}

#[inline]
pub fn display_rating(rating: Rating) -> String {
	format!("{:.4}", rating_as_f64(rating))
}
// }}}
// {{{ Step progress
/// World mode progress gained for a play, before any boosts.
#[inline]
pub fn step_progress(rating: Rating, step: u32) -> f64 {
	(2.45 * rating_as_f64(rating).sqrt() + 2.5) * (step as f64 / 50.0)
}

/// The game only shows progress up to one decimal, rounded down.
#[inline]
pub fn displayed_step_progress(progress: f64) -> f64 {
	(progress * 10.0).floor() / 10.0
}
// }}}
