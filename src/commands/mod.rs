use crate::context::{Error, PoiseContext};

pub mod args;
pub mod calc;
pub mod discord;
pub mod score;
pub mod song;
pub mod utils;

// {{{ Help
/// Show this help menu
#[poise::command(prefix_command, track_edits, slash_command)]
pub async fn help(
	ctx: PoiseContext<'_>,
	#[description = "Specific command to show help about"]
	#[autocomplete = "poise::builtins::autocomplete_command"]
	command: Option<String>,
) -> Result<(), Error> {
	poise::builtins::help(
		ctx,
		command.as_deref(),
		poise::builtins::HelpConfiguration {
			extra_text_at_bottom: "Song arguments are matched fuzzily, so partial names and abbreviations work too.",
			show_subcommands: true,
			..Default::default()
		},
	)
	.await?;
	Ok(())
}
// }}}
// {{{ Command list
/// Every command the bot exposes, in help menu order.
pub fn all() -> Vec<poise::Command<crate::context::UserContext, Error>> {
	vec![
		help(),
		song::song(),
		song::random(),
		calc::ptt(),
		calc::step(),
		score::save(),
		score::unsave(),
		score::scores(),
		score::b30(),
		song::reload(),
	]
}
// }}}
