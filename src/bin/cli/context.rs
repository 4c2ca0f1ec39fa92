// {{{ Imports
use anyhow::Context;
use kagura::commands::discord::MessageContext;
use kagura::context::paths::get_var_or;
use kagura::context::{Error, UserContext};
use poise::serenity_prelude::CreateEmbed;
use serde::Serialize;
// }}}

// {{{ Embed essence
#[derive(Serialize)]
struct FieldEssence {
	name: String,
	value: String,
}

/// The parts of an embed worth printing.
#[derive(Serialize)]
struct EmbedEssence {
	title: Option<String>,
	description: Option<String>,
	footer: Option<String>,
	fields: Vec<FieldEssence>,
}

impl EmbedEssence {
	fn from_embed(embed: &CreateEmbed) -> Result<Self, Error> {
		let json = serde_json::to_value(embed)?;
		let text = |value: &serde_json::Value| value.as_str().map(str::to_owned);

		let fields = json["fields"]
			.as_array()
			.map(|fields| {
				fields
					.iter()
					.map(|field| FieldEssence {
						name: text(&field["name"]).unwrap_or_default(),
						value: text(&field["value"]).unwrap_or_default(),
					})
					.collect()
			})
			.unwrap_or_default();

		Ok(Self {
			title: text(&json["title"]),
			description: text(&json["description"]),
			footer: text(&json["footer"]["text"]),
			fields,
		})
	}
}
// }}}
// {{{ Context
/// Similar in scope to the mock context used in tests,
/// except replies and embeds are printed to the standard output.
///
/// Embeds are printed as TOML.
pub struct CliContext {
	pub user_id: u64,
	pub data: UserContext,
}

impl CliContext {
	pub fn new(data: UserContext) -> Result<Self, Error> {
		let user_id = get_var_or("KAGURA_CLI_USER_ID", "0")
			.parse()
			.with_context(|| "$KAGURA_CLI_USER_ID is not a valid user id")?;

		Ok(Self { data, user_id })
	}
}

impl MessageContext for CliContext {
	fn author_id(&self) -> u64 {
		self.user_id
	}

	fn data(&self) -> &UserContext {
		&self.data
	}

	async fn reply(&mut self, text: &str) -> Result<(), Error> {
		println!("[Reply] {text}");
		Ok(())
	}

	async fn send_embed(&mut self, embed: CreateEmbed) -> Result<(), Error> {
		let all = toml::to_string(&EmbedEssence::from_embed(&embed)?)?;
		println!("\n========== Embed ==========");
		println!("{all}");
		Ok(())
	}
}
// }}}
