#[derive(clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(clap::Subcommand)]
pub enum Command {
	/// Search the song data, printing every match with its score
	Search(crate::commands::search::Args),

	/// Run a bot command, printing its replies
	Run(crate::commands::run::Args),
}
