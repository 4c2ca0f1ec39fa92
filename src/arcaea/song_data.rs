use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwap;
use tracing::info;

use crate::arcaea::chart::{Song, SongCache};
use crate::context::Error;
use crate::timed;

// {{{ Reading
pub fn read_song_data(path: &Path) -> Result<Vec<Song>, Error> {
	let file = std::fs::File::open(path)
		.with_context(|| format!("Failed to open and read {path:?}"))?;

	let songs: Vec<Song> = serde_json::from_reader(std::io::BufReader::new(file))
		.with_context(|| format!("Failed to parse {path:?}"))?;

	Ok(songs)
}

/// Reads a song data file and builds every lookup map for it.
pub fn load_song_cache(path: &Path) -> Result<SongCache, Error> {
	info!("Reloading song data from {path:?}");

	let songs = timed!("read_song_data", { read_song_data(path)? });
	let cache = timed!("build_search_maps", { SongCache::build(songs) });

	info!("✅ Loaded {} songs", cache.len());
	Ok(cache)
}
// }}}
// {{{ Song service
/// Shared handle to the current song data snapshot.
///
/// Readers grab a snapshot and keep using it for as long as they need,
/// while reloads build a complete new cache before publishing it.
#[derive(Debug, Clone)]
pub struct SongService {
	current: Arc<ArcSwap<SongCache>>,
}

impl SongService {
	#[inline]
	pub fn new(cache: SongCache) -> Self {
		Self {
			current: Arc::new(ArcSwap::from_pointee(cache)),
		}
	}

	pub fn load(path: &Path) -> Result<Self, Error> {
		Ok(Self::new(load_song_cache(path)?))
	}

	/// The snapshot every lookup of a single request should go through.
	#[inline]
	pub fn snapshot(&self) -> Arc<SongCache> {
		self.current.load_full()
	}

	/// Rebuilds the song data from disk. On failure, the current snapshot stays live.
	/// Snapshots handed out earlier keep pointing at the data they were taken from.
	pub fn reload(&self, path: &Path) -> Result<Arc<SongCache>, Error> {
		let cache = Arc::new(load_song_cache(path)?);
		self.current.store(cache.clone());
		Ok(cache)
	}
}
// }}}
