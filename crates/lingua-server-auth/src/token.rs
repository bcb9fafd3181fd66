// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Bearer token issuing and verification.
//!
//! Bearer tokens are stateless signed tokens (HS256) whose subject claim is
//! the authenticated user's id. They are never stored server-side and cannot
//! be revoked - they simply expire after the configured lifetime. The
//! revocable credential path is the session cookie (see [`crate::session`]).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::types::UserId;

/// Claims carried by a lingua bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
	/// Subject: the user id as a decimal string.
	pub sub: String,
	/// Issuer.
	pub iss: String,
	/// Issued-at (seconds since epoch).
	pub iat: i64,
	/// Expiry (seconds since epoch).
	pub exp: i64,
}

/// Signing and verification material for bearer tokens.
///
/// Built once from configuration and shared through application state.
#[derive(Clone)]
pub struct TokenKeys {
	encoding: EncodingKey,
	decoding: DecodingKey,
	issuer: String,
	ttl_secs: i64,
}

impl std::fmt::Debug for TokenKeys {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenKeys")
			.field("issuer", &self.issuer)
			.field("ttl_secs", &self.ttl_secs)
			.finish_non_exhaustive()
	}
}

impl TokenKeys {
	/// Build token material from the shared HMAC secret.
	pub fn new(secret: &str, issuer: impl Into<String>, ttl_secs: i64) -> Self {
		Self {
			encoding: EncodingKey::from_secret(secret.as_bytes()),
			decoding: DecodingKey::from_secret(secret.as_bytes()),
			issuer: issuer.into(),
			ttl_secs,
		}
	}

	/// Issue a signed bearer token for the given user.
	///
	/// # Errors
	/// Returns [`AuthError::TokenCreation`] if encoding fails.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
		let now = chrono::Utc::now().timestamp();
		let claims = Claims {
			sub: user_id.to_string(),
			iss: self.issuer.clone(),
			iat: now,
			exp: now + self.ttl_secs,
		};

		encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|e| AuthError::TokenCreation(e.to_string()))
	}

	/// Verify a bearer token and extract the user id.
	///
	/// Rejects expired tokens, wrong issuers, and bad signatures uniformly as
	/// [`AuthError::InvalidToken`].
	pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.set_issuer(&[&self.issuer]);

		let data = decode::<Claims>(token, &self.decoding, &validation)
			.map_err(|_| AuthError::InvalidToken)?;

		data
			.claims
			.sub
			.parse::<i64>()
			.map(UserId::new)
			.map_err(|_| AuthError::InvalidToken)
	}

	/// Token lifetime in seconds.
	pub fn ttl_secs(&self) -> i64 {
		self.ttl_secs
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keys() -> TokenKeys {
		TokenKeys::new("test-secret", "lingua-test", 3600)
	}

	#[test]
	fn issue_then_verify_roundtrips() {
		let keys = keys();
		let token = keys.issue(UserId::new(1234)).unwrap();
		let user_id = keys.verify(&token).unwrap();
		assert_eq!(user_id, UserId::new(1234));
	}

	#[test]
	fn rejects_token_signed_with_other_secret() {
		let token = TokenKeys::new("other-secret", "lingua-test", 3600)
			.issue(UserId::new(1))
			.unwrap();
		assert!(matches!(keys().verify(&token), Err(AuthError::InvalidToken)));
	}

	#[test]
	fn rejects_wrong_issuer() {
		let token = TokenKeys::new("test-secret", "someone-else", 3600)
			.issue(UserId::new(1))
			.unwrap();
		assert!(matches!(keys().verify(&token), Err(AuthError::InvalidToken)));
	}

	#[test]
	fn rejects_expired_token() {
		let expired = TokenKeys::new("test-secret", "lingua-test", -120);
		let token = expired.issue(UserId::new(1)).unwrap();
		assert!(matches!(keys().verify(&token), Err(AuthError::InvalidToken)));
	}

	#[test]
	fn rejects_garbage() {
		assert!(matches!(
			keys().verify("not.a.token"),
			Err(AuthError::InvalidToken)
		));
	}
}
