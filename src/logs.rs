use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. The filter is read from `$KAGURA_LOG`,
/// defaulting to `info`.
pub fn init_logging() {
	let result = tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer())
		.with(
			EnvFilter::builder()
				.with_default_directive(LevelFilter::INFO.into())
				.with_env_var("KAGURA_LOG")
				.from_env_lossy(),
		)
		.try_init();

	if let Err(e) = result {
		eprintln!("Could not set up logging: {e}");
	}
}
