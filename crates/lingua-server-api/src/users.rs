// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! User resource request/response types.
//!
//! The stored password hash never appears in a response.

use serde::{Deserialize, Serialize};

use lingua_server_auth::{User, UserId};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create or update a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserRequest {
	pub full_name: Option<String>,
	pub username: Option<String>,
}

/// A user in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub id: UserId,
	pub full_name: String,
	pub username: String,
	pub created_at: i64,
	pub updated_at: Option<i64>,
}

impl From<User> for UserResponse {
	fn from(user: User) -> Self {
		Self {
			id: user.id,
			full_name: user.full_name,
			username: user.username,
			created_at: user.created_at,
			updated_at: user.updated_at,
		}
	}
}

/// Response for user list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListUsersResponse {
	pub users: Vec<UserResponse>,
}
