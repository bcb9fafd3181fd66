// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! # lingua-server-api
//!
//! Request and response types for the lingua HTTP API, one module per
//! resource. The axum handlers live in `lingua-server`; this crate only
//! defines the wire shapes (and their OpenAPI schemas behind the `openapi`
//! feature).
//!
//! Error responses share a uniform shape: a machine-readable `error` code, a
//! human-readable `message`, and - for validation failures only - an
//! `errors` map of field name to messages.

pub mod apps;
pub mod auth;
pub mod keys;
pub mod languages;
pub mod translations;
pub mod users;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response body shared by every resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	/// Per-field validation messages; present only for validation failures.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
			errors: None,
		}
	}

	pub fn validation(errors: BTreeMap<String, Vec<String>>) -> Self {
		Self {
			error: "validation_failed".to_string(),
			message: "One or more fields are invalid".to_string(),
			errors: Some(errors),
		}
	}
}

/// Plain success message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MessageResponse {
	pub message: String,
}

impl MessageResponse {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn validation_response_carries_field_errors() {
		let mut errors = BTreeMap::new();
		errors.insert("name".to_string(), vec!["Name is required".to_string()]);
		let body = ErrorResponse::validation(errors);

		let json = serde_json::to_value(&body).unwrap();
		assert_eq!(json["error"], "validation_failed");
		assert_eq!(json["errors"]["name"][0], "Name is required");
	}

	#[test]
	fn plain_error_omits_errors_map() {
		let json = serde_json::to_value(ErrorResponse::new("not_found", "App not found")).unwrap();
		assert!(json.get("errors").is_none());
	}
}
