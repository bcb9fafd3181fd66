// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authentication configuration.

use serde::Deserialize;

fn default_token_secret() -> String {
	"lingua-insecure-dev-secret".to_string()
}

fn default_token_issuer() -> String {
	"lingua-server".to_string()
}

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	/// HMAC secret for signing bearer tokens. Must be overridden outside dev.
	pub token_secret: String,
	/// Bearer token lifetime in seconds.
	pub token_ttl_secs: i64,
	/// `iss` claim stamped into issued tokens.
	pub token_issuer: String,
	/// Cookie session lifetime in days.
	pub session_ttl_days: i64,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			token_secret: default_token_secret(),
			token_ttl_secs: 86_400,
			token_issuer: default_token_issuer(),
			session_ttl_days: 60,
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub token_secret: Option<String>,
	#[serde(default)]
	pub token_ttl_secs: Option<i64>,
	#[serde(default)]
	pub token_issuer: Option<String>,
	#[serde(default)]
	pub session_ttl_days: Option<i64>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.token_secret.is_some() {
			self.token_secret = other.token_secret;
		}
		if other.token_ttl_secs.is_some() {
			self.token_ttl_secs = other.token_ttl_secs;
		}
		if other.token_issuer.is_some() {
			self.token_issuer = other.token_issuer;
		}
		if other.session_ttl_days.is_some() {
			self.session_ttl_days = other.session_ttl_days;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			token_secret: self.token_secret.unwrap_or_else(default_token_secret),
			token_ttl_secs: self.token_ttl_secs.unwrap_or(86_400),
			token_issuer: self.token_issuer.unwrap_or_else(default_token_issuer),
			session_ttl_days: self.session_ttl_days.unwrap_or(60),
		}
	}
}
