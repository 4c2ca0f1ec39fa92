//! Helpers for pulling whitespace separated words out of text command
//! arguments, together with parsers producing user facing errors.

use anyhow::anyhow;

use crate::arcaea::chart::{Difficulty, Level};
use crate::arcaea::score::Score;
use crate::context::{ErrorKind, TagError, TaggedError};

// {{{ Word extraction
/// How many words to take off the argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Take {
	Words(usize),
	Rest,
}

/// Takes words off the front of `params`, returning them together with
/// whatever is left. Fails when there aren't enough words.
pub fn forward(params: &str, take: Take) -> Option<(&str, &str)> {
	let params = params.trim();
	if params.is_empty() {
		return None;
	}

	let count = match take {
		Take::Rest => return Some((params, "")),
		Take::Words(count) => count,
	};

	let mut end = 0;
	for _ in 0..count {
		let remaining = params[end..].trim_start();
		if remaining.is_empty() {
			return None;
		}

		let start = params.len() - remaining.len();
		end = start
			+ remaining
				.find(char::is_whitespace)
				.unwrap_or(remaining.len());
	}

	Some((&params[..end], params[end..].trim_start()))
}

/// Takes words off the back of `params`, returning them together with
/// whatever is left. Fails when there aren't enough words.
pub fn backward(params: &str, take: Take) -> Option<(&str, &str)> {
	let params = params.trim();
	if params.is_empty() {
		return None;
	}

	let count = match take {
		Take::Rest => return Some((params, "")),
		Take::Words(count) => count,
	};

	let mut start = params.len();
	for _ in 0..count {
		let remaining = params[..start].trim_end();
		if remaining.is_empty() {
			return None;
		}

		start = remaining
			.char_indices()
			.rev()
			.find(|(_, c)| c.is_whitespace())
			.map_or(0, |(i, c)| i + c.len_utf8());
	}

	Some((&params[start..], params[..start].trim_end()))
}
// }}}
// {{{ Usage
/// The error shown when arguments don't fit the shape a command expects.
pub fn usage_error(prefix: &str, usage: &str) -> TaggedError {
	anyhow!("Invalid input, expecting `{prefix}{usage}`!").tag(ErrorKind::User)
}

/// Pulls the `[song] [diff]` pair off the end of the arguments.
pub fn song_and_difficulty<'a>(
	prefix: &str,
	usage: &str,
	params: &'a str,
) -> Result<(&'a str, &'a str), TaggedError> {
	let (difficulty, params) =
		backward(params, Take::Words(1)).ok_or_else(|| usage_error(prefix, usage))?;
	let (song, _) = backward(params, Take::Rest).ok_or_else(|| usage_error(prefix, usage))?;

	Ok((song, difficulty))
}
// }}}
// {{{ Parsers
pub fn parse_difficulty(input: &str) -> Result<Difficulty, TaggedError> {
	input
		.parse()
		.map_err(|_| anyhow!("Invalid difficulty `{input}`!").tag(ErrorKind::User))
}

pub fn parse_level(input: &str) -> Result<Level, TaggedError> {
	input
		.parse()
		.map_err(|_| anyhow!("Invalid level `{input}`!").tag(ErrorKind::User))
}

#[inline]
pub fn parse_score(input: &str) -> Result<Score, TaggedError> {
	Score::parse_short(input).map_err(|e| anyhow!(e).tag(ErrorKind::User))
}

/// Step stats range from `0` to `1000`.
pub fn parse_step(input: &str) -> Result<u32, TaggedError> {
	match input.parse::<u32>() {
		Ok(step) if step <= 1000 => Ok(step),
		_ => Err(anyhow!("Invalid step `{input}`!").tag(ErrorKind::User)),
	}
}

pub fn parse_score_id(input: &str) -> Result<i64, TaggedError> {
	match input.parse::<i64>() {
		Ok(id) if id > 0 => Ok(id),
		_ => Err(anyhow!("Invalid score ID `{input}`!").tag(ErrorKind::User)),
	}
}
// }}}
// {{{ Tests
#[cfg(test)]
mod args_tests {
	use super::*;

	#[test]
	fn forward_takes_words_off_the_front() {
		assert_eq!(forward("9+  ftr", Take::Words(1)), Some(("9+", "ftr")));
		assert_eq!(
			forward("  a b  c ", Take::Words(2)),
			Some(("a b", "c"))
		);
		assert_eq!(forward("a b", Take::Words(2)), Some(("a b", "")));
		assert_eq!(forward("a", Take::Words(2)), None);
		assert_eq!(forward("   ", Take::Words(1)), None);
		assert_eq!(forward(" a b ", Take::Rest), Some(("a b", "")));
	}

	#[test]
	fn backward_takes_words_off_the_back() {
		assert_eq!(
			backward("grievous lady ftr 995", Take::Words(1)),
			Some(("995", "grievous lady ftr"))
		);
		assert_eq!(
			backward("grievous lady ftr 995", Take::Words(2)),
			Some(("ftr 995", "grievous lady"))
		);
		assert_eq!(backward("ftr", Take::Words(2)), None);
		assert_eq!(backward("", Take::Rest), None);
		assert_eq!(backward("  quon  ", Take::Rest), Some(("quon", "")));
	}

	#[test]
	fn song_and_difficulty_requires_both() {
		assert_eq!(
			song_and_difficulty("~", "scores [song] [diff]", "fracture ray ftr").unwrap(),
			("fracture ray", "ftr")
		);

		let err = song_and_difficulty("~", "scores [song] [diff]", "ftr").unwrap_err();
		assert_eq!(err.kind, ErrorKind::User);
		assert_eq!(
			err.error.to_string(),
			"Invalid input, expecting `~scores [song] [diff]`!"
		);
	}

	#[test]
	fn parsers_produce_user_errors() {
		assert_eq!(parse_difficulty("Future").unwrap(), Difficulty::FTR);
		assert_eq!(
			parse_difficulty("hard").unwrap_err().error.to_string(),
			"Invalid difficulty `hard`!"
		);

		assert_eq!(parse_level("9+").unwrap(), Level::NineP);
		assert_eq!(
			parse_level("13").unwrap_err().error.to_string(),
			"Invalid level `13`!"
		);

		assert_eq!(parse_step("1000").unwrap(), 1000);
		assert!(parse_step("1001").is_err());
		assert!(parse_step("-1").is_err());

		assert_eq!(parse_score_id("12").unwrap(), 12);
		assert_eq!(
			parse_score_id("0").unwrap_err().error.to_string(),
			"Invalid score ID `0`!"
		);

		assert_eq!(parse_score("995").unwrap(), Score(9_950_000));
		assert_eq!(
			parse_score("12").unwrap_err().error.to_string(),
			"Invalid score `12`, expecting at least 3 digits!"
		);
	}
}
// }}}
