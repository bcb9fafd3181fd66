// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
	/// No authentication credentials provided.
	#[error("authentication required")]
	AuthenticationRequired,

	/// The provided credentials are invalid.
	#[error("invalid credentials")]
	InvalidCredentials,

	/// The session has expired.
	#[error("session expired")]
	SessionExpired,

	/// The session was not found.
	#[error("session not found")]
	SessionNotFound,

	/// The bearer token failed verification.
	#[error("invalid bearer token")]
	InvalidToken,

	/// Token signing failed.
	#[error("failed to issue token: {0}")]
	TokenCreation(String),

	/// Password hashing failed.
	#[error("failed to hash password: {0}")]
	PasswordHash(String),
}
