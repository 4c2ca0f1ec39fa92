//! This module provides helpers for working with environment
//! variables and paths, together with a struct
//! that keeps track of all the runtime-relevant paths.

use anyhow::Context;
use std::{path::Path, path::PathBuf, str::FromStr};

/// Wrapper around [std::env::var] which adds [anyhow] context around errors.
pub fn get_var(name: &str) -> anyhow::Result<String> {
	std::env::var(name).with_context(|| format!("Missing ${name} environment variable"))
}

/// Reads an environment variable, falling back to a default when missing or empty.
pub fn get_var_or(name: &str, default: &str) -> String {
	match std::env::var(name) {
		Ok(value) if !value.is_empty() => value,
		_ => default.to_owned(),
	}
}

/// Reads an environment variable containing a directory path,
/// creating the directory if it doesn't exist.
pub fn get_env_dir_path(
	name: &str,
	fallback_var: Option<&str>,
	default_to: &str,
) -> anyhow::Result<PathBuf> {
	let var = get_var(name)
		.or_else(|e| match fallback_var {
			Some(other) => get_var(other),
			None => Err(e),
		})
		.unwrap_or_else(|_| default_to.to_owned());

	let path = PathBuf::from_str(&var).with_context(|| format!("${name} is not a valid path"))?;

	if !path.exists() {
		std::fs::create_dir_all(&path).with_context(|| format!("Could not create ${name}"))?;
	}

	Ok(path)
}

/// The prefix text commands must start with.
#[inline]
pub fn get_prefix() -> String {
	get_var_or("KAGURA_PREFIX", "~")
}

#[derive(Clone, Debug)]
pub struct KaguraPaths {
	/// This directory contains files that are entirely managed
	/// by the runtime of the app, like the score database.
	data_dir: PathBuf,

	db_path: PathBuf,

	/// The song data document the search index is built from.
	songdata_path: PathBuf,
}

impl KaguraPaths {
	/// Gets all the standard paths from the environment,
	/// creating the data directory in the process.
	pub fn new() -> anyhow::Result<Self> {
		let data_dir = get_env_dir_path("KAGURA_DATA_DIR", Some("STATE_DIRECTORY"), ".")?;
		let db_path = match get_var("KAGURA_DBPATH") {
			Ok(path) if !path.is_empty() => PathBuf::from(path),
			_ => data_dir.join("kagura.db"),
		};
		let songdata_path = PathBuf::from(get_var_or("KAGURA_SONGDATA_PATH", "data/songdata.json"));

		Ok(Self {
			data_dir,
			db_path,
			songdata_path,
		})
	}

	/// Keeps everything inside `data_dir`, which is useful for tests.
	pub fn in_dir(data_dir: &Path, songdata_path: PathBuf) -> Self {
		Self {
			data_dir: data_dir.to_path_buf(),
			db_path: data_dir.join("kagura.db"),
			songdata_path,
		}
	}

	pub fn data_dir(&self) -> &PathBuf {
		&self.data_dir
	}

	pub fn db_path(&self) -> &PathBuf {
		&self.db_path
	}

	pub fn songdata_path(&self) -> &PathBuf {
		&self.songdata_path
	}
}
