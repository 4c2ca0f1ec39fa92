use clap::Parser;
use command::{Cli, Command};
use kagura::context::Error;
use kagura::logs::init_logging;

mod command;
mod commands;
mod context;

#[tokio::main]
async fn main() -> Result<(), Error> {
	init_logging();

	let cli = Cli::parse();
	match cli.command {
		Command::Search(args) => {
			commands::search::run(args)?;
		}
		Command::Run(args) => {
			commands::run::run(args).await?;
		}
	}

	Ok(())
}
