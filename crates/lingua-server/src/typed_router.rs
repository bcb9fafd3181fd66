// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Typed router builders separating the public and authenticated surfaces.
//!
//! Routes registered on an [`AuthedRouter`] pass through the authentication
//! middleware and are rejected with a 401 before reaching the handler when
//! no valid credential is present. [`PublicRouter`] routes skip both layers.

use axum::{
	body::Body,
	extract::State,
	http::{Request, StatusCode},
	middleware::{from_fn_with_state, Next},
	response::{IntoResponse, Response},
	routing::MethodRouter,
	Json, Router,
};

use lingua_server_api::ErrorResponse;
use lingua_server_auth::AuthContext;

use crate::{api::AppState, auth_middleware::auth_layer};

#[tracing::instrument(
	name = "require_auth_layer",
	skip(_state, request, next),
	fields(authenticated = tracing::field::Empty)
)]
pub async fn require_auth_layer(
	State(_state): State<AppState>,
	request: Request<Body>,
	next: Next,
) -> Response {
	let authenticated = request
		.extensions()
		.get::<AuthContext>()
		.is_some_and(|context| context.current_user.is_some());
	tracing::Span::current().record("authenticated", authenticated);

	if !authenticated {
		return (
			StatusCode::UNAUTHORIZED,
			Json(ErrorResponse::new("unauthorized", "Authentication required")),
		)
			.into_response();
	}

	next.run(request).await
}

pub struct AuthedRouter(Router<AppState>);

impl AuthedRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn build(self, state: AppState) -> Router<AppState> {
		self
			.0
			.layer(from_fn_with_state(state.clone(), require_auth_layer))
			.layer(from_fn_with_state(state, auth_layer))
	}
}

impl Default for AuthedRouter {
	fn default() -> Self {
		Self::new()
	}
}

pub struct PublicRouter(Router<AppState>);

impl PublicRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn build(self) -> Router<AppState> {
		self.0
	}
}

impl Default for PublicRouter {
	fn default() -> Self {
		Self::new()
	}
}
