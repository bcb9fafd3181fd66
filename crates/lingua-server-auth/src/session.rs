// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Server-side session management for cookie authentication.
//!
//! - **Session creation**: new sessions with a sliding expiry
//! - **Session validation**: expiry checking against the stored timestamp
//! - **Token generation**: cryptographically secure random tokens
//!
//! # Security Model
//!
//! - Session tokens are generated from 32 bytes of cryptographic randomness
//! - Only the SHA-256 hash of a token is stored; the plaintext lives in the
//!   client's HttpOnly cookie
//! - Each authenticated use slides the expiry forward

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use lingua_common_core::clock::now_millis;

use crate::types::{SessionId, UserId};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A server-side cookie session.
///
/// Timestamps are milliseconds since the Unix epoch, matching every other
/// row in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
	pub id: SessionId,
	pub user_id: UserId,
	pub created_at: i64,
	pub last_used_at: i64,
	pub expires_at: i64,
}

impl Session {
	/// Create a new session expiring `ttl_days` from now.
	///
	/// The id is minted by the caller so that session rows share the
	/// process-wide snowflake generator.
	pub fn new(id: SessionId, user_id: UserId, ttl_days: i64) -> Self {
		let now = now_millis();
		Self {
			id,
			user_id,
			created_at: now,
			last_used_at: now,
			expires_at: now + ttl_days * MILLIS_PER_DAY,
		}
	}

	/// Check if the session is expired.
	pub fn is_expired(&self) -> bool {
		now_millis() > self.expires_at
	}

	/// Extend the session (sliding expiry).
	pub fn touch(&mut self, ttl_days: i64) {
		let now = now_millis();
		self.last_used_at = now;
		self.expires_at = now + ttl_days * MILLIS_PER_DAY;
	}
}

/// Generates a cryptographically secure random session token.
pub fn generate_session_token() -> String {
	let mut rng = rand::thread_rng();
	let bytes: [u8; 32] = rng.gen();
	hex::encode(bytes)
}

/// SHA-256 hash of a token, hex-encoded, as stored in the sessions table.
pub fn hash_token(token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
	use super::*;

	mod session_lifecycle {
		use super::*;

		#[test]
		fn creates_session_with_ttl() {
			let session = Session::new(SessionId::new(1), UserId::new(2), 60);
			assert_eq!(session.user_id, UserId::new(2));
			assert_eq!(session.created_at, session.last_used_at);
			assert_eq!(
				session.expires_at - session.created_at,
				60 * MILLIS_PER_DAY
			);
		}

		#[test]
		fn new_session_is_not_expired() {
			let session = Session::new(SessionId::new(1), UserId::new(2), 60);
			assert!(!session.is_expired());
		}

		#[test]
		fn expired_session_is_detected() {
			let mut session = Session::new(SessionId::new(1), UserId::new(2), 60);
			session.expires_at = now_millis() - 1;
			assert!(session.is_expired());
		}

		#[test]
		fn touch_slides_expiry_forward() {
			let mut session = Session::new(SessionId::new(1), UserId::new(2), 60);
			session.expires_at = now_millis() + MILLIS_PER_DAY;

			session.touch(60);
			assert!(session.expires_at >= now_millis() + 59 * MILLIS_PER_DAY);
			assert!(session.last_used_at >= session.created_at);
		}
	}

	mod token_generation {
		use super::*;
		use std::collections::HashSet;

		#[test]
		fn generates_64_char_hex_string() {
			let token = generate_session_token();
			assert_eq!(token.len(), 64);
			assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
		}

		#[test]
		fn generates_unique_tokens() {
			let tokens: HashSet<_> = (0..100).map(|_| generate_session_token()).collect();
			assert_eq!(tokens.len(), 100, "All tokens should be unique");
		}

		#[test]
		fn hash_is_stable_and_distinct_from_token() {
			let token = generate_session_token();
			let hash = hash_token(&token);
			assert_eq!(hash, hash_token(&token));
			assert_ne!(hash, token);
			assert_eq!(hash.len(), 64);
		}
	}
}
