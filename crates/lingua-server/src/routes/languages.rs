// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Language CRUD HTTP handlers, nested under an app.

use axum::{
	extract::{Path, Query, State},
	response::{IntoResponse, Response},
	Json,
};

pub use lingua_server_api::languages::*;
use lingua_server_api::MessageResponse;
use lingua_server_auth::{AppId, LanguageId};
use lingua_server_db::Language;

use lingua_common_core::clock::now_millis;

use crate::{
	api::AppState,
	api_response::{conflict, not_found, validation_error},
	auth_middleware::RequireAuth,
	error::ServerError,
	pagination::ListParams,
	validation::FieldErrors,
};

const LOCALE_MAX_LEN: usize = 10;

#[utoipa::path(
    get,
    path = "/app/{app_id}/language",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("search" = Option<String>, Query, description = "Case-insensitive locale filter"),
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Page of languages", body = ListLanguagesResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "languages"
)]
/// GET /app/{app_id}/language - List an app's languages.
pub async fn list_languages(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(app_id): Path<i64>,
	Query(params): Query<ListParams>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let languages = state
		.languages
		.list_languages(app_id, params.search(), params.limit(), params.offset())
		.await?;

	Ok(Json(ListLanguagesResponse {
		languages: languages.into_iter().map(LanguageResponse::from).collect(),
	})
	.into_response())
}

#[utoipa::path(
    get,
    path = "/app/{app_id}/language/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Language id")
    ),
    responses(
        (status = 200, description = "The language", body = LanguageResponse),
        (status = 404, description = "App or language not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "languages"
)]
/// GET /app/{app_id}/language/{id} - Fetch one language.
pub async fn get_language(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	match state.languages.get_language(app_id, LanguageId::new(id)).await? {
		Some(language) => Ok(Json(LanguageResponse::from(language)).into_response()),
		None => Ok(not_found("Language not found").into_response()),
	}
}

#[utoipa::path(
    post,
    path = "/app/{app_id}/language",
    params(("app_id" = i64, Path, description = "Owning app id")),
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Created language", body = LanguageResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Locale already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "languages"
)]
/// POST /app/{app_id}/language - Add a language to an app.
pub async fn create_language(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(app_id): Path<i64>,
	Json(payload): Json<LanguageRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(locale) = errors.required_text("locale", payload.locale.as_deref(), LOCALE_MAX_LEN)
	else {
		return Ok(validation_error(errors).into_response());
	};

	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	if state.languages.locale_in_use(app_id, &locale, None).await? {
		return Ok(conflict("Language locale already used").into_response());
	}

	let language = Language {
		id: LanguageId::new(state.next_id()),
		app_id,
		locale,
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.languages.create_language(&language).await?;

	match state.languages.get_language(app_id, language.id).await? {
		Some(language) => Ok(Json(LanguageResponse::from(language)).into_response()),
		None => Ok(not_found("Language not found").into_response()),
	}
}

#[utoipa::path(
    put,
    path = "/app/{app_id}/language/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Language id")
    ),
    request_body = LanguageRequest,
    responses(
        (status = 200, description = "Updated language", body = LanguageResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App or language not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Locale already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "languages"
)]
/// PUT /app/{app_id}/language/{id} - Change a language's locale.
pub async fn update_language(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
	Json(payload): Json<LanguageRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(locale) = errors.required_text("locale", payload.locale.as_deref(), LOCALE_MAX_LEN)
	else {
		return Ok(validation_error(errors).into_response());
	};

	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let id = LanguageId::new(id);
	let Some(mut language) = state.languages.get_language(app_id, id).await? else {
		return Ok(not_found("Language not found").into_response());
	};

	if state.languages.locale_in_use(app_id, &locale, Some(id)).await? {
		return Ok(conflict("Language locale already used").into_response());
	}

	language.locale = locale;
	language.updated_at = Some(now_millis());
	state.languages.update_language(&language).await?;

	match state.languages.get_language(app_id, id).await? {
		Some(language) => Ok(Json(LanguageResponse::from(language)).into_response()),
		None => Ok(not_found("Language not found").into_response()),
	}
}

#[utoipa::path(
    delete,
    path = "/app/{app_id}/language/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Language id")
    ),
    responses(
        (status = 200, description = "Language deleted", body = MessageResponse),
        (status = 404, description = "App or language not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "languages"
)]
/// DELETE /app/{app_id}/language/{id} - Soft-delete a language.
pub async fn delete_language(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	if state
		.languages
		.soft_delete_language(app_id, LanguageId::new(id))
		.await?
	{
		Ok(Json(MessageResponse::new("Language deleted")).into_response())
	} else {
		Ok(not_found("Language not found").into_response())
	}
}
