// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Request authentication middleware.
//!
//! [`auth_layer`] inspects every request and attaches an
//! [`AuthContext`] extension. A bearer token, when the Authorization header
//! is present, always takes precedence over the session cookie; the cookie
//! path slides the session expiry on each authenticated use.
//!
//! Handlers that require authentication take the [`RequireAuth`] extractor,
//! which rejects with a 401 when the context carries no user.

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, HeaderMap, Request, StatusCode},
	middleware::Next,
	response::Response,
	Json,
};

use lingua_server_api::ErrorResponse;
use lingua_server_auth::{
	extract_bearer_token, extract_session_cookie, hash_token, AuthContext, CurrentUser,
};

use crate::api::AppState;

/// Middleware that resolves the request's credentials into an [`AuthContext`].
#[tracing::instrument(name = "auth_layer", skip_all, fields(authenticated = tracing::field::Empty))]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let context = authenticate(&state, request.headers()).await;
	tracing::Span::current().record("authenticated", context.current_user.is_some());

	request.extensions_mut().insert(context);
	next.run(request).await
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> AuthContext {
	// Bearer token wins whenever an Authorization header is present; a bad
	// token does not fall back to the cookie.
	if let Some(token) = extract_bearer_token(headers) {
		return authenticate_bearer(state, &token).await;
	}

	if let Some(token) = extract_session_cookie(headers) {
		return authenticate_session(state, &token).await;
	}

	AuthContext::unauthenticated()
}

async fn authenticate_bearer(state: &AppState, token: &str) -> AuthContext {
	let user_id = match state.token_keys.verify(token) {
		Ok(user_id) => user_id,
		Err(_) => {
			tracing::debug!("bearer token rejected");
			return AuthContext::unauthenticated();
		}
	};

	match state.users.get_user(user_id).await {
		Ok(Some(user)) => AuthContext::authenticated(CurrentUser::from_bearer(user)),
		Ok(None) => AuthContext::unauthenticated(),
		Err(e) => {
			tracing::error!(error = %e, "user lookup failed during bearer auth");
			AuthContext::unauthenticated()
		}
	}
}

async fn authenticate_session(state: &AppState, token: &str) -> AuthContext {
	let session = match state.sessions.get_session_by_token_hash(&hash_token(token)).await {
		Ok(Some(session)) => session,
		Ok(None) => return AuthContext::unauthenticated(),
		Err(e) => {
			tracing::error!(error = %e, "session lookup failed");
			return AuthContext::unauthenticated();
		}
	};

	if session.is_expired() {
		tracing::debug!(session_id = %session.id, "session expired");
		return AuthContext::unauthenticated();
	}

	let user = match state.users.get_user(session.user_id).await {
		Ok(Some(user)) => user,
		Ok(None) => return AuthContext::unauthenticated(),
		Err(e) => {
			tracing::error!(error = %e, "user lookup failed during session auth");
			return AuthContext::unauthenticated();
		}
	};

	let mut session = session;
	session.touch(state.session_ttl_days);
	if let Err(e) = state.sessions.touch_session(&session).await {
		tracing::warn!(error = %e, session_id = %session.id, "failed to slide session expiry");
	}

	AuthContext::authenticated(CurrentUser::from_session(user, session.id))
}

/// Extractor yielding the authenticated user, rejecting with 401 otherwise.
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = (StatusCode, Json<ErrorResponse>);

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<AuthContext>()
			.and_then(|context| context.current_user.clone())
			.map(RequireAuth)
			.ok_or_else(|| {
				(
					StatusCode::UNAUTHORIZED,
					Json(ErrorResponse::new("unauthorized", "Authentication required")),
				)
			})
	}
}
