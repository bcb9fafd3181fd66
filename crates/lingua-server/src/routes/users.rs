// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! User management HTTP handlers.
//!
//! Users created here (as opposed to the sign-up bootstrap) receive a
//! default password; updates never touch the stored hash.

use axum::{
	extract::{Path, Query, State},
	response::{IntoResponse, Response},
	Json,
};

pub use lingua_server_api::users::*;
use lingua_server_api::MessageResponse;
use lingua_server_auth::{hash_password, User, UserId};

use lingua_common_core::clock::now_millis;

use crate::{
	api::AppState,
	api_response::{conflict, not_found, validation_error},
	auth_middleware::RequireAuth,
	error::ServerError,
	pagination::ListParams,
	validation::FieldErrors,
};

const FULL_NAME_MAX_LEN: usize = 100;
const USERNAME_MAX_LEN: usize = 50;

/// Password assigned to admin-created accounts until the owner changes it.
const DEFAULT_PASSWORD: &str = "secret123";

#[utoipa::path(
    get,
    path = "/user",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive full-name filter"),
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Page of users", body = ListUsersResponse),
        (status = 401, description = "Not authenticated", body = lingua_server_api::ErrorResponse)
    ),
    tag = "users"
)]
/// GET /user - List users.
pub async fn list_users(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Query(params): Query<ListParams>,
) -> Result<Response, ServerError> {
	let users = state
		.users
		.list_users(params.search(), params.limit(), params.offset())
		.await?;

	Ok(Json(ListUsersResponse {
		users: users.into_iter().map(UserResponse::from).collect(),
	})
	.into_response())
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "users"
)]
/// GET /user/{id} - Fetch one user.
pub async fn get_user(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Response, ServerError> {
	match state.users.get_user(UserId::new(id)).await? {
		Some(user) => Ok(Json(UserResponse::from(user)).into_response()),
		None => Ok(not_found("User not found").into_response()),
	}
}

#[utoipa::path(
    post,
    path = "/user",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Username already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "users"
)]
/// POST /user - Create a user with the default password.
pub async fn create_user(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Json(payload): Json<UserRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let full_name = errors.required_text("full_name", payload.full_name.as_deref(), FULL_NAME_MAX_LEN);
	let username = errors.required_text("username", payload.username.as_deref(), USERNAME_MAX_LEN);
	let (Some(full_name), Some(username)) = (full_name, username) else {
		return Ok(validation_error(errors).into_response());
	};

	if state.users.username_in_use(&username, None).await? {
		return Ok(conflict("Username already used").into_response());
	}

	let user = User {
		id: UserId::new(state.next_id()),
		full_name,
		username: username.to_lowercase(),
		password: hash_password(DEFAULT_PASSWORD)?,
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.users.create_user(&user).await?;

	match state.users.get_user(user.id).await? {
		Some(user) => Ok(Json(UserResponse::from(user)).into_response()),
		None => Ok(not_found("User not found").into_response()),
	}
}

#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "User not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Username already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "users"
)]
/// PUT /user/{id} - Update a user's profile (never the password).
pub async fn update_user(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
	Json(payload): Json<UserRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let full_name = errors.required_text("full_name", payload.full_name.as_deref(), FULL_NAME_MAX_LEN);
	let username = errors.required_text("username", payload.username.as_deref(), USERNAME_MAX_LEN);
	let (Some(full_name), Some(username)) = (full_name, username) else {
		return Ok(validation_error(errors).into_response());
	};

	let id = UserId::new(id);
	let Some(mut user) = state.users.get_user(id).await? else {
		return Ok(not_found("User not found").into_response());
	};

	if state.users.username_in_use(&username, Some(id)).await? {
		return Ok(conflict("Username already used").into_response());
	}

	user.full_name = full_name;
	user.username = username.to_lowercase();
	user.updated_at = Some(now_millis());
	state.users.update_user(&user).await?;

	match state.users.get_user(id).await? {
		Some(user) => Ok(Json(UserResponse::from(user)).into_response()),
		None => Ok(not_found("User not found").into_response()),
	}
}

#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "users"
)]
/// DELETE /user/{id} - Soft-delete a user.
///
/// Their sessions are revoked alongside; bootstrap stays closed because the
/// row is retained.
pub async fn delete_user(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Response, ServerError> {
	let id = UserId::new(id);
	if state.users.soft_delete_user(id).await? {
		state.sessions.delete_sessions_for_user(id).await?;
		Ok(Json(MessageResponse::new("User deleted")).into_response())
	} else {
		Ok(not_found("User not found").into_response())
	}
}
