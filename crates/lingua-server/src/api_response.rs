// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! API response helpers.
//!
//! Common error response constructors for HTTP handlers. Every error body is
//! a [`lingua_server_api::ErrorResponse`]: a machine-readable `error` code,
//! a human-readable `message`, and a per-field `errors` map for validation
//! failures.

use axum::{http::StatusCode, Json};

use lingua_server_api::ErrorResponse;

use crate::validation::FieldErrors;

/// Create a 400 Bad Request response.
pub fn bad_request(
	error: impl Into<String>,
	message: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
	(StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error, message)))
}

/// Create a 400 validation failure response from accumulated field errors.
pub fn validation_error(errors: FieldErrors) -> (StatusCode, Json<ErrorResponse>) {
	(
		StatusCode::BAD_REQUEST,
		Json(ErrorResponse::validation(errors.into_map())),
	)
}

/// Create a 404 Not Found response.
pub fn not_found(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
	(StatusCode::NOT_FOUND, Json(ErrorResponse::new("not_found", message)))
}

/// Create a 409 Conflict response.
pub fn conflict(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
	(StatusCode::CONFLICT, Json(ErrorResponse::new("conflict", message)))
}

/// Create a 401 Unauthorized response.
pub fn unauthorized(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
	(
		StatusCode::UNAUTHORIZED,
		Json(ErrorResponse::new("unauthorized", message)),
	)
}

/// Create a 500 Internal Server Error response.
pub fn internal_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		Json(ErrorResponse::new("internal_error", message)),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn helpers_pair_status_with_code() {
		assert_eq!(not_found("x").0, StatusCode::NOT_FOUND);
		assert_eq!(conflict("x").0, StatusCode::CONFLICT);
		assert_eq!(unauthorized("x").0, StatusCode::UNAUTHORIZED);
		assert_eq!(bad_request("bad", "x").0, StatusCode::BAD_REQUEST);
		assert_eq!(internal_error("x").0, StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn validation_error_carries_the_field_map() {
		let mut errors = FieldErrors::new();
		errors.required_text("name", None, 50);

		let (status, Json(body)) = validation_error(errors);
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body.error, "validation_failed");
		assert!(body.errors.unwrap().contains_key("name"));
	}
}
