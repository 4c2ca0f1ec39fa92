use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use tracing::error;

pub struct AppError {
	pub error: anyhow::Error,
	pub status_code: StatusCode,
}

impl AppError {
	pub fn new(error: anyhow::Error, status_code: StatusCode) -> Self {
		Self { error, status_code }
	}

	#[inline]
	pub fn not_found(error: anyhow::Error) -> Self {
		Self::new(error, StatusCode::NOT_FOUND)
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response {
		let message = if self.status_code.is_server_error() {
			error!("Error while handling request: {:?}", self.error);
			format!("Something went wrong: {}", self.error)
		} else {
			format!("{}", self.error)
		};

		(
			self.status_code,
			Json(serde_json::json!({ "error": message })),
		)
			.into_response()
	}
}

impl<E> From<E> for AppError
where
	E: Into<anyhow::Error>,
{
	fn from(err: E) -> Self {
		Self::new(err.into(), StatusCode::INTERNAL_SERVER_ERROR)
	}
}
