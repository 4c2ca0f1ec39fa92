// {{{ Imports
use std::path::PathBuf;

use kagura::arcaea::song_data::load_song_cache;
use kagura::context::paths::get_var_or;
use kagura::context::Error;
// }}}

#[derive(clap::Args)]
pub struct Args {
	/// Words to search for
	#[arg(required = true)]
	query: Vec<String>,

	/// Maximum number of songs to print
	#[arg(short, long, default_value_t = 5)]
	limit: usize,

	/// Print every matching search key together with its score,
	/// instead of the deduplicated song list
	#[arg(short, long)]
	keys: bool,

	/// Song data file to search. Defaults to `$KAGURA_SONGDATA_PATH`
	#[arg(long)]
	songdata: Option<PathBuf>,
}

pub fn run(args: Args) -> Result<(), Error> {
	let path = args
		.songdata
		.unwrap_or_else(|| get_var_or("KAGURA_SONGDATA_PATH", "data/songdata.json").into());
	let songs = load_song_cache(&path)?;
	let query = args.query.join(" ");

	if args.keys {
		for m in songs.rank_keys(&query).iter().take(args.limit) {
			println!("{:>5}  {:<40} {}", m.score, m.key, m.song.alt_title);
		}
	} else {
		for (i, song) in songs.search(&query, args.limit).iter().enumerate() {
			println!("{}. {} [#{}]", i + 1, song, song.id);
		}
	}

	Ok(())
}
