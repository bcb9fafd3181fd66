// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! The user account type shared by the persistence and API layers.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// An admin user row.
///
/// `password` holds the bcrypt hash, never a plaintext password. Usernames
/// are stored lowercased and compared case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
	pub id: UserId,
	pub full_name: String,
	pub username: String,
	/// bcrypt hash of the password.
	pub password: String,
	/// Milliseconds since the Unix epoch.
	pub created_at: i64,
	pub updated_at: Option<i64>,
	pub deleted_at: Option<i64>,
}

impl User {
	/// Returns true if the row is soft-deleted.
	pub fn is_deleted(&self) -> bool {
		self.deleted_at.is_some()
	}
}
