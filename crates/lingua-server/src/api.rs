// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Application state and router assembly.

use std::sync::Arc;

use axum::{
	routing::{get, post},
	Router,
};
use sqlx::sqlite::SqlitePool;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};

use lingua_common_core::IdGenerator;
use lingua_server_auth::TokenKeys;
use lingua_server_config::ServerConfig;

use crate::db::{
	AppRepository, KeyRepository, LanguageRepository, SessionRepository, TranslationRepository,
	UserRepository, ValueRepository,
};
use crate::error::ServerError;
use crate::routes;
use crate::typed_router::{AuthedRouter, PublicRouter};

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub id_generator: Arc<IdGenerator>,
	pub apps: Arc<AppRepository>,
	pub languages: Arc<LanguageRepository>,
	pub keys: Arc<KeyRepository>,
	pub values: Arc<ValueRepository>,
	pub users: Arc<UserRepository>,
	pub sessions: Arc<SessionRepository>,
	pub translations: Arc<TranslationRepository>,
	pub token_keys: TokenKeys,
	pub session_ttl_days: i64,
}

impl AppState {
	/// Mint the next row id.
	pub fn next_id(&self) -> i64 {
		self.id_generator.next_id()
	}
}

/// Creates the application state: repositories over the shared pool, the id
/// generator singleton, and the bearer-token key material.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let id_generator =
		IdGenerator::new(0).map_err(|e| ServerError::Internal(e.to_string()))?;

	Ok(AppState {
		apps: Arc::new(AppRepository::new(pool.clone())),
		languages: Arc::new(LanguageRepository::new(pool.clone())),
		keys: Arc::new(KeyRepository::new(pool.clone())),
		values: Arc::new(ValueRepository::new(pool.clone())),
		users: Arc::new(UserRepository::new(pool.clone())),
		sessions: Arc::new(SessionRepository::new(pool.clone())),
		translations: Arc::new(TranslationRepository::new(pool.clone())),
		id_generator: Arc::new(id_generator),
		token_keys: TokenKeys::new(
			&config.auth.token_secret,
			config.auth.token_issuer.clone(),
			config.auth.token_ttl_secs,
		),
		session_ttl_days: config.auth.session_ttl_days,
		pool,
	})
}

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
	// Public routes - no authentication required.
	let public = PublicRouter::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/translation/{app_key}/{locale}",
			get(routes::translations::list_translations),
		)
		.route("/authentication/status", get(routes::auth::status))
		.route("/authentication/sign-in", post(routes::auth::sign_in))
		.route("/authentication/sign-up", post(routes::auth::sign_up))
		.build();

	// Admin CRUD surface - authentication required.
	let authed = AuthedRouter::new()
		.route("/authentication/check", get(routes::auth::check))
		.route("/authentication/sign-out", post(routes::auth::sign_out))
		.route(
			"/app",
			get(routes::apps::list_apps).post(routes::apps::create_app),
		)
		.route(
			"/app/{app_id}",
			get(routes::apps::get_app)
				.put(routes::apps::update_app)
				.delete(routes::apps::delete_app),
		)
		.route(
			"/app/{app_id}/language",
			get(routes::languages::list_languages).post(routes::languages::create_language),
		)
		.route(
			"/app/{app_id}/language/{id}",
			get(routes::languages::get_language)
				.put(routes::languages::update_language)
				.delete(routes::languages::delete_language),
		)
		.route(
			"/app/{app_id}/key",
			get(routes::keys::list_keys).post(routes::keys::create_key),
		)
		.route(
			"/app/{app_id}/key/{id}",
			get(routes::keys::get_key)
				.put(routes::keys::update_key)
				.delete(routes::keys::delete_key),
		)
		.route("/app/{app_id}/key/{id}/value", post(routes::keys::add_value))
		.route(
			"/user",
			get(routes::users::list_users).post(routes::users::create_user),
		)
		.route(
			"/user/{id}",
			get(routes::users::get_user)
				.put(routes::users::update_user)
				.delete(routes::users::delete_user),
		)
		.build(state.clone());

	let cors = CorsLayer::new()
		.allow_methods(Any)
		.allow_headers(Any)
		.allow_origin(Any);

	Router::new()
		.merge(public)
		.merge(authed)
		.layer(TraceLayer::new_for_http())
		.layer(cors)
		.with_state(state)
}
