use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use rs_bigram_core::DelegateError;

#[derive(Error, Debug)]
pub enum ApiError {
	#[error(transparent)]
	Delegate(#[from] DelegateError),

	#[error("Blocking task failed: {0}")]
	Blocking(#[from] BlockingError),
}

#[derive(Serialize)]
struct ErrorBody {
	error: String,
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Delegate(DelegateError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
			ApiError::Delegate(DelegateError::Processing(_)) => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(ErrorBody { error: self.to_string() })
	}
}
