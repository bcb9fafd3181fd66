// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};

use lingua_server_api::ErrorResponse;
use lingua_server_db::DbError;

/// Server error type for startup and request plumbing.
///
/// Handlers mostly build their responses directly; this type covers the
/// paths that bubble errors up instead (migrations, health, middleware).
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database operation failed.
	#[error("Database error: {0}")]
	Db(#[from] sqlx::Error),

	/// Database error from lingua-server-db.
	#[error("Database error: {0}")]
	DbError(#[from] DbError),

	/// Authentication failure.
	#[error("Authentication error: {0}")]
	Auth(#[from] lingua_server_auth::AuthError),

	/// Configuration failure.
	#[error("Configuration error: {0}")]
	Config(#[from] lingua_server_config::ConfigError),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		use lingua_server_auth::AuthError;

		let (status, code) = match &self {
			ServerError::DbError(DbError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
			ServerError::DbError(DbError::Conflict(_)) => (StatusCode::CONFLICT, "conflict"),
			// Credential failures are 401; hashing/signing breakage is not.
			ServerError::Auth(AuthError::TokenCreation(_) | AuthError::PasswordHash(_)) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
			}
			ServerError::Auth(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
			_ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		};

		if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!(error = %self, "request failed");
		}

		(status, Json(ErrorResponse::new(code, self.to_string()))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn db_not_found_maps_to_404() {
		let response =
			ServerError::DbError(DbError::NotFound("App not found".to_string())).into_response();
		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[test]
	fn db_conflict_maps_to_409() {
		let response =
			ServerError::DbError(DbError::Conflict("name taken".to_string())).into_response();
		assert_eq!(response.status(), StatusCode::CONFLICT);
	}

	#[test]
	fn internal_maps_to_500() {
		let response = ServerError::Internal("boom".to_string()).into_response();
		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
