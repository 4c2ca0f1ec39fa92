use std::fmt::Display;

use serde::Serialize;

// {{{ Score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Score(pub u32);

impl Score {
	/// Highest score possible: a pure memory with every note shiny.
	pub const MAX: u32 = 10_009_999;

	// {{{ Parsing
	/// Parses a score as typed by users.
	///
	/// Scores with three to six digits are treated as the leading digits of a
	/// seven digit score (`995` means `9'950'000`), except for `100`, which
	/// means a pure memory.
	pub fn parse_short(input: &str) -> Result<Self, String> {
		let score: u32 = match input.parse() {
			Ok(score) if score <= Self::MAX => score,
			_ => return Err(format!("Invalid score `{input}`!")),
		};

		if score < 100 {
			return Err(format!(
				"Invalid score `{input}`, expecting at least 3 digits!"
			));
		}

		if score == 100 {
			return Ok(Self(10_000_000));
		}

		let mut score = score;
		while score < 1_000_000 {
			score *= 10;
		}

		Ok(Self(score))
	}
	// }}}
}

impl Display for Score {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let score = self.0;
		write!(
			f,
			"{}'{:0>3}'{:0>3}",
			score / 1000000,
			(score / 1000) % 1000,
			score % 1000
		)
	}
}
// }}}
