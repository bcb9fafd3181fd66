// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Credential extraction and request authentication context.
//!
//! This module provides:
//! - [`CurrentUser`] - authenticated user context extracted from requests
//! - [`AuthContext`] - auth state for request processing
//! - Helper functions for extracting the session cookie and bearer token
//!
//! # Authentication Flow
//!
//! ```text
//! Request -> Authorization header present? -> Bearer token -> verify claims
//!                     |
//!                     +-- else -> session cookie -> session lookup
//! ```
//!
//! A bearer token always wins over the cookie when both are present.

use http::header::{AUTHORIZATION, COOKIE};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::types::SessionId;
use crate::user::User;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "lingua_session";

/// The currently authenticated user, extracted from request context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
	/// The authenticated user.
	pub user: User,
	/// Session ID if authenticated via session cookie (None for bearer auth).
	pub session_id: Option<SessionId>,
}

impl CurrentUser {
	/// Create a CurrentUser from a session-based authentication.
	pub fn from_session(user: User, session_id: SessionId) -> Self {
		Self {
			user,
			session_id: Some(session_id),
		}
	}

	/// Create a CurrentUser from a bearer token authentication.
	pub fn from_bearer(user: User) -> Self {
		Self {
			user,
			session_id: None,
		}
	}

	/// Returns true if authenticated via session cookie.
	pub fn is_session_auth(&self) -> bool {
		self.session_id.is_some()
	}
}

/// Authentication context for request processing.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	/// The current user, if authenticated.
	pub current_user: Option<CurrentUser>,
}

impl AuthContext {
	/// Create a new unauthenticated context.
	pub fn unauthenticated() -> Self {
		Self { current_user: None }
	}

	/// Create a new authenticated context.
	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self {
			current_user: Some(current_user),
		}
	}

	/// Get the current user, if authenticated.
	pub fn user(&self) -> Option<&CurrentUser> {
		self.current_user.as_ref()
	}
}

/// Extract the session token from the Cookie header.
///
/// Parses the Cookie header to find the `lingua_session` cookie.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
	headers
		.get(COOKIE)?
		.to_str()
		.ok()?
		.split(';')
		.find_map(|cookie| {
			let cookie = cookie.trim();
			let (name, value) = cookie.split_once('=')?;

			if name == SESSION_COOKIE_NAME {
				Some(value.to_string())
			} else {
				None
			}
		})
}

/// Extract the bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::header::HeaderValue;

	fn make_test_user() -> User {
		User {
			id: crate::types::UserId::new(1),
			full_name: "Test User".to_string(),
			username: "test".to_string(),
			password: "$2b$04$hash".to_string(),
			created_at: 0,
			updated_at: None,
			deleted_at: None,
		}
	}

	mod current_user {
		use super::*;

		#[test]
		fn from_session_creates_session_auth() {
			let current = CurrentUser::from_session(make_test_user(), SessionId::new(9));
			assert!(current.is_session_auth());
			assert_eq!(current.session_id, Some(SessionId::new(9)));
		}

		#[test]
		fn from_bearer_has_no_session() {
			let current = CurrentUser::from_bearer(make_test_user());
			assert!(!current.is_session_auth());
			assert!(current.session_id.is_none());
		}
	}

	mod auth_context {
		use super::*;

		#[test]
		fn unauthenticated_has_no_user() {
			assert!(AuthContext::unauthenticated().user().is_none());
		}

		#[test]
		fn authenticated_exposes_user() {
			let ctx = AuthContext::authenticated(CurrentUser::from_bearer(make_test_user()));
			assert_eq!(ctx.user().unwrap().user.username, "test");
		}
	}

	mod cookie_extraction {
		use super::*;

		#[test]
		fn extracts_session_cookie() {
			let mut headers = HeaderMap::new();
			headers.insert(
				COOKIE,
				HeaderValue::from_static("lingua_session=abc123; other=1"),
			);
			assert_eq!(extract_session_cookie(&headers), Some("abc123".to_string()));
		}

		#[test]
		fn extracts_cookie_from_middle_of_list() {
			let mut headers = HeaderMap::new();
			headers.insert(
				COOKIE,
				HeaderValue::from_static("a=1; lingua_session=tok; b=2"),
			);
			assert_eq!(extract_session_cookie(&headers), Some("tok".to_string()));
		}

		#[test]
		fn missing_cookie_returns_none() {
			let mut headers = HeaderMap::new();
			headers.insert(COOKIE, HeaderValue::from_static("other=1"));
			assert_eq!(extract_session_cookie(&headers), None);
			assert_eq!(extract_session_cookie(&HeaderMap::new()), None);
		}
	}

	mod bearer_extraction {
		use super::*;

		#[test]
		fn extracts_bearer_token() {
			let mut headers = HeaderMap::new();
			headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok123"));
			assert_eq!(extract_bearer_token(&headers), Some("tok123".to_string()));
		}

		#[test]
		fn rejects_non_bearer_schemes() {
			let mut headers = HeaderMap::new();
			headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
			assert_eq!(extract_bearer_token(&headers), None);
		}

		#[test]
		fn missing_header_returns_none() {
			assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
		}
	}
}
