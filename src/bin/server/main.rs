use context::AppContext;
use kagura::context::paths::get_var;
use kagura::context::{Error, UserContext};
use kagura::logs::init_logging;
use routes::charts::get_chart;
use routes::songs::search_songs;
use tracing::info;

mod context;
mod error;
mod routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
	init_logging();

	let ctx = Box::leak(Box::new(UserContext::new()?));

	let app = axum::Router::new()
		.route("/songs/search", axum::routing::get(search_songs))
		.route("/charts/:chart_id", axum::routing::get(get_chart))
		.with_state(AppContext::new(ctx));

	let port: u16 = get_var("KAGURA_SERVER_PORT")?.parse()?;
	let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

	info!("Listening on {}", listener.local_addr()?);

	axum::serve(listener, app).await?;

	Ok(())
}
