// {{{ Imports
use kagura::commands::discord::MessageContext;
use kagura::commands::{calc, score, song};
use kagura::context::{Error, UserContext};

use crate::context::CliContext;
// }}}

#[derive(clap::Subcommand)]
pub enum BotCommand {
	Song { args: Vec<String> },
	Random { args: Vec<String> },
	Ptt { args: Vec<String> },
	Step { args: Vec<String> },
	Save { args: Vec<String> },
	Unsave { args: Vec<String> },
	Scores { args: Vec<String> },
	B30,
	Reload,
}

#[derive(clap::Args)]
pub struct Args {
	#[command(subcommand)]
	command: BotCommand,
}

pub async fn run(args: Args) -> Result<(), Error> {
	let mut ctx = CliContext::new(UserContext::new()?)?;

	match args.command {
		BotCommand::Song { args } => {
			let res = song::song_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Random { args } => {
			let res = song::random_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Ptt { args } => {
			let res = calc::ptt_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Step { args } => {
			let res = calc::step_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Save { args } => {
			let res = score::save_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Unsave { args } => {
			let res = score::unsave_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Scores { args } => {
			let res = score::scores_impl(&mut ctx, &args.join(" ")).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::B30 => {
			let res = score::b30_impl(&mut ctx).await;
			ctx.handle_error(res).await?;
		}
		BotCommand::Reload => {
			let res = song::reload_impl(&mut ctx).await;
			ctx.handle_error(res).await?;
		}
	}

	Ok(())
}
