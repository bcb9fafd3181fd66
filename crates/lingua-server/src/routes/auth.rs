// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Authentication HTTP handlers.
//!
//! Sign-up is a one-shot bootstrap: it succeeds only while zero user rows
//! exist, making the first (and only self-registered) account the admin.
//! Sign-in issues both credential forms at once: a stateless bearer token in
//! the body and a revocable server-side session in an HttpOnly cookie.
//!
//! A wrong password and an unknown username produce the identical error so
//! the caller cannot probe which usernames exist.

use axum::{
	extract::State,
	http::{header::SET_COOKIE, StatusCode},
	response::{AppendHeaders, IntoResponse, Response},
	Json,
};

pub use lingua_server_api::auth::*;
use lingua_server_api::MessageResponse;
use lingua_server_auth::{
	generate_session_token, hash_password, hash_token, verify_password, Session, SessionId, User,
	UserId, SESSION_COOKIE_NAME,
};

use lingua_common_core::clock::now_millis;

use crate::{
	api::AppState,
	api_response::{bad_request, conflict, not_found, validation_error},
	auth_middleware::RequireAuth,
	error::ServerError,
	validation::FieldErrors,
};

const CREDENTIALS_WRONG: &str = "Username or password is wrong";

#[utoipa::path(
    get,
    path = "/authentication/status",
    responses(
        (status = 200, description = "A user exists; the app is initialized", body = MessageResponse),
        (status = 404, description = "No user yet; sign-up is open", body = lingua_server_api::ErrorResponse)
    ),
    tag = "authentication"
)]
/// GET /authentication/status - Bootstrap probe.
pub async fn status(State(state): State<AppState>) -> Result<Response, ServerError> {
	let count = state.users.count_users().await?;
	if count > 0 {
		Ok(Json(MessageResponse::new("App has been initialized")).into_response())
	} else {
		Ok(not_found("No user found, app has not been initialized").into_response())
	}
}

#[utoipa::path(
    post,
    path = "/authentication/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created and signed in", body = TokenResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "A user already exists", body = lingua_server_api::ErrorResponse)
    ),
    tag = "authentication"
)]
/// POST /authentication/sign-up - One-shot first-admin bootstrap.
pub async fn sign_up(
	State(state): State<AppState>,
	Json(payload): Json<SignUpRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let full_name = errors.required_text("full_name", payload.full_name.as_deref(), 100);
	let username = errors.required_text("username", payload.username.as_deref(), 50);
	let password = errors.required_min("password", payload.password.as_deref(), 8);
	let (Some(full_name), Some(username), Some(password)) = (full_name, username, password) else {
		return Ok(validation_error(errors).into_response());
	};

	if state.users.count_users().await? > 0 {
		return Ok(conflict("Can't create an account, app has been initialized").into_response());
	}

	let password_hash = hash_password(&password)?;
	let user = User {
		id: UserId::new(state.next_id()),
		full_name,
		username: username.to_lowercase(),
		password: password_hash,
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.users.create_user(&user).await?;
	tracing::info!(user_id = %user.id, "first user created via sign-up");

	establish_identity(&state, user.id).await
}

#[utoipa::path(
    post,
    path = "/authentication/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Validation failed or credentials wrong", body = lingua_server_api::ErrorResponse)
    ),
    tag = "authentication"
)]
/// POST /authentication/sign-in - Exchange credentials for a token + cookie.
pub async fn sign_in(
	State(state): State<AppState>,
	Json(payload): Json<SignInRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let username = errors.required_text("username", payload.username.as_deref(), 50);
	let password = errors.required_min("password", payload.password.as_deref(), 8);
	let (Some(username), Some(password)) = (username, password) else {
		return Ok(validation_error(errors).into_response());
	};

	let user = state.users.get_user_by_username(&username).await?;
	// One uniform failure for both unknown user and wrong password.
	let Some(user) = user.filter(|u| verify_password(&password, &u.password)) else {
		return Ok(bad_request("invalid_credentials", CREDENTIALS_WRONG).into_response());
	};

	tracing::debug!(user_id = %user.id, "sign-in succeeded");
	establish_identity(&state, user.id).await
}

#[utoipa::path(
    post,
    path = "/authentication/sign-out",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = lingua_server_api::ErrorResponse)
    ),
    tag = "authentication"
)]
/// POST /authentication/sign-out - Revoke the cookie session.
///
/// Bearer tokens are stateless and stay valid until expiry; only the
/// server-side session is destroyed.
pub async fn sign_out(
	State(state): State<AppState>,
	RequireAuth(current_user): RequireAuth,
) -> Result<Response, ServerError> {
	if let Some(session_id) = current_user.session_id {
		state.sessions.delete_session(session_id).await?;
	}

	let expire_cookie = format!(
		"{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
	);
	Ok((
		AppendHeaders([(SET_COOKIE, expire_cookie)]),
		Json(MessageResponse::new("Signed out")),
	)
		.into_response())
}

#[utoipa::path(
    get,
    path = "/authentication/check",
    responses(
        (status = 200, description = "Credential is valid", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = lingua_server_api::ErrorResponse)
    ),
    tag = "authentication"
)]
/// GET /authentication/check - Authenticated no-op probe.
pub async fn check(RequireAuth(_current_user): RequireAuth) -> impl IntoResponse {
	Json(MessageResponse::new("Authenticated"))
}

/// Issue the bearer token and establish the cookie session for a user.
async fn establish_identity(state: &AppState, user_id: UserId) -> Result<Response, ServerError> {
	let token = state.token_keys.issue(user_id)?;

	let session_token = generate_session_token();
	let session = Session::new(
		SessionId::new(state.next_id()),
		user_id,
		state.session_ttl_days,
	);
	state
		.sessions
		.create_session(&session, &hash_token(&session_token))
		.await?;

	let max_age = state.session_ttl_days * 24 * 60 * 60;
	let cookie = format!(
		"{SESSION_COOKIE_NAME}={session_token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
	);

	Ok((
		StatusCode::OK,
		AppendHeaders([(SET_COOKIE, cookie)]),
		Json(TokenResponse { token }),
	)
		.into_response())
}
