// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! OpenAPI document for the lingua HTTP API.

use utoipa::OpenApi;

use crate::routes;

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::health::health_check,
		routes::translations::list_translations,
		routes::auth::status,
		routes::auth::sign_up,
		routes::auth::sign_in,
		routes::auth::sign_out,
		routes::auth::check,
		routes::apps::list_apps,
		routes::apps::get_app,
		routes::apps::create_app,
		routes::apps::update_app,
		routes::apps::delete_app,
		routes::languages::list_languages,
		routes::languages::get_language,
		routes::languages::create_language,
		routes::languages::update_language,
		routes::languages::delete_language,
		routes::keys::list_keys,
		routes::keys::get_key,
		routes::keys::create_key,
		routes::keys::update_key,
		routes::keys::delete_key,
		routes::keys::add_value,
		routes::users::list_users,
		routes::users::get_user,
		routes::users::create_user,
		routes::users::update_user,
		routes::users::delete_user,
	),
	components(schemas(
		routes::health::HealthResponse,
		lingua_server_api::ErrorResponse,
		lingua_server_api::MessageResponse,
		lingua_server_api::apps::AppRequest,
		lingua_server_api::apps::AppResponse,
		lingua_server_api::apps::ListAppsResponse,
		lingua_server_api::languages::LanguageRequest,
		lingua_server_api::languages::LanguageResponse,
		lingua_server_api::languages::ListLanguagesResponse,
		lingua_server_api::keys::KeyRequest,
		lingua_server_api::keys::KeyValueRequest,
		lingua_server_api::keys::KeyValueResponse,
		lingua_server_api::keys::KeyResponse,
		lingua_server_api::keys::ListKeysResponse,
		lingua_server_api::users::UserRequest,
		lingua_server_api::users::UserResponse,
		lingua_server_api::users::ListUsersResponse,
		lingua_server_api::auth::SignInRequest,
		lingua_server_api::auth::SignUpRequest,
		lingua_server_api::auth::TokenResponse,
		lingua_server_api::translations::TranslationResponse,
		lingua_server_api::translations::ListTranslationsResponse,
	)),
	tags(
		(name = "authentication", description = "Sign-in, sign-up, and session management"),
		(name = "apps", description = "App (tenant) management"),
		(name = "languages", description = "Per-app locale management"),
		(name = "keys", description = "Translation key and value management"),
		(name = "translations", description = "Public translation resolution"),
		(name = "users", description = "Admin user management"),
		(name = "health", description = "Service health"),
	)
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn openapi_document_builds() {
		let doc = ApiDoc::openapi();
		let json = doc.to_json().unwrap();
		assert!(json.contains("/translation/{app_key}/{locale}"));
		assert!(json.contains("/authentication/sign-in"));
	}
}
