// {{{ Imports
use db::{connect_db, SqlitePool};

use crate::arcaea::song_data::SongService;
use crate::context::paths::{get_prefix, KaguraPaths};
use crate::timed;
// }}}

pub mod db;
pub mod paths;

// {{{ Common types
pub type Error = anyhow::Error;
pub type PoiseContext<'a> = poise::Context<'a, UserContext, Error>;
// }}}
// {{{ Error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	User,
	Internal,
}

#[derive(Debug)]
pub struct TaggedError {
	pub kind: ErrorKind,
	pub error: Error,
}

impl TaggedError {
	#[inline]
	pub fn new(kind: ErrorKind, error: Error) -> Self {
		Self { kind, error }
	}
}

impl<E: Into<Error>> From<E> for TaggedError {
	fn from(value: E) -> Self {
		Self::new(ErrorKind::Internal, value.into())
	}
}

pub trait TagError {
	fn tag(self, tag: ErrorKind) -> TaggedError;
}

impl TagError for Error {
	fn tag(self, tag: ErrorKind) -> TaggedError {
		TaggedError::new(tag, self)
	}
}
// }}}
// {{{ UserContext
/// Custom user data passed to all command functions
#[derive(Clone)]
pub struct UserContext {
	pub db: SqlitePool,
	pub songs: SongService,
	pub paths: KaguraPaths,

	/// Text commands start with this, and usage hints mention it.
	pub prefix: String,
}

impl UserContext {
	#[inline]
	pub fn new() -> Result<Self, Error> {
		timed!("create_context", {
			let paths = KaguraPaths::new()?;
			let db = connect_db(&paths)?;
			let songs = SongService::load(paths.songdata_path())?;

			Ok(Self {
				db,
				songs,
				paths,
				prefix: get_prefix(),
			})
		})
	}
}
// }}}
