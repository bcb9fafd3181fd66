// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! bcrypt password hashing.
//!
//! This module provides a centralized hashing configuration that uses:
//! - Production-strength cost in release builds
//! - Reduced cost in tests for performance
//!
//! # Security Note
//!
//! Production hashing uses `bcrypt::DEFAULT_COST` (12). The test cost is
//! intentionally weak and MUST NOT be used in production.

use crate::error::AuthError;

/// Returns the bcrypt cost appropriate for the build context.
#[inline]
fn bcrypt_cost() -> u32 {
	#[cfg(test)]
	{
		// Fast, insecure cost for tests ONLY.
		4
	}

	#[cfg(not(test))]
	{
		bcrypt::DEFAULT_COST
	}
}

/// Hash a plaintext password with bcrypt.
///
/// # Errors
/// Returns [`AuthError::PasswordHash`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
	bcrypt::hash(password, bcrypt_cost()).map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash verifies as `false` rather than erroring, so a
/// corrupt row behaves like a wrong password.
pub fn verify_password(password: &str, hash: &str) -> bool {
	bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_then_verify_roundtrips() {
		let hash = hash_password("hunter2hunter2").unwrap();
		assert!(verify_password("hunter2hunter2", &hash));
		assert!(!verify_password("wrong-password", &hash));
	}

	#[test]
	fn hashes_are_salted() {
		let a = hash_password("same-password").unwrap();
		let b = hash_password("same-password").unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn malformed_hash_verifies_false() {
		assert!(!verify_password("anything", "not-a-bcrypt-hash"));
		assert!(!verify_password("anything", ""));
	}

	#[test]
	fn hash_has_bcrypt_shape() {
		let hash = hash_password("some-password").unwrap();
		assert!(hash.starts_with("$2"));
		assert_eq!(hash.len(), 60);
	}
}
