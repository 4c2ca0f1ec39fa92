use poise::serenity_prelude::CreateEmbed;
use poise::CreateReply;
use tracing::error;

use crate::context::{Error, ErrorKind, TaggedError, UserContext};

// {{{ Trait
pub trait MessageContext {
	/// Get the user context held by the message
	fn data(&self) -> &UserContext;
	fn author_id(&self) -> u64;

	/// Reply to the current message
	async fn reply(&mut self, text: &str) -> Result<(), Error>;

	/// Reply to the current message with an embed
	async fn send_embed(&mut self, embed: CreateEmbed) -> Result<(), Error>;

	/// User errors are shown to the user, while internal errors are logged
	/// and propagated.
	async fn handle_error<V>(
		&mut self,
		res: Result<V, TaggedError>,
	) -> Result<Option<V>, Error> {
		match res {
			Ok(v) => Ok(Some(v)),
			Err(e) => match e.kind {
				ErrorKind::User => {
					self.reply(&format!("{}", e.error)).await?;
					Ok(None)
				}
				ErrorKind::Internal => {
					error!("Error while handling command: {:?}", e.error);
					Err(e.error)
				}
			},
		}
	}
}
// }}}
// {{{ Poise implementation
impl<'a> MessageContext for poise::Context<'a, UserContext, Error> {
	fn data(&self) -> &UserContext {
		Self::data(*self)
	}

	fn author_id(&self) -> u64 {
		self.author().id.get()
	}

	async fn reply(&mut self, text: &str) -> Result<(), Error> {
		Self::reply(*self, text).await?;
		Ok(())
	}

	async fn send_embed(&mut self, embed: CreateEmbed) -> Result<(), Error> {
		Self::send(*self, CreateReply::default().reply(true).embed(embed)).await?;
		Ok(())
	}
}
// }}}
