// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Public translation resolution HTTP handler.
//!
//! This is the endpoint client applications consume. Apps are addressed by
//! their public UUID key, never by internal id. An unknown key is a 404; a
//! known app always resolves to its full key list, with `null` for keys
//! lacking a value in the requested locale.

use axum::{
	extract::{Path, State},
	response::{IntoResponse, Response},
	Json,
};
use uuid::Uuid;

pub use lingua_server_api::translations::*;

use crate::{
	api::AppState,
	api_response::{bad_request, not_found},
	error::ServerError,
};

#[utoipa::path(
    get,
    path = "/translation/{app_key}/{locale}",
    params(
        ("app_key" = String, Path, description = "Public app key (UUID)"),
        ("locale" = String, Path, description = "Locale tag, e.g. en-US")
    ),
    responses(
        (status = 200, description = "Resolved translations", body = ListTranslationsResponse),
        (status = 400, description = "Malformed app key", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "Unknown app key", body = lingua_server_api::ErrorResponse)
    ),
    tag = "translations"
)]
/// GET /translation/{app_key}/{locale} - Resolve an app's translations.
pub async fn list_translations(
	State(state): State<AppState>,
	Path((app_key, locale)): Path<(String, String)>,
) -> Result<Response, ServerError> {
	let Ok(app_key) = Uuid::parse_str(&app_key) else {
		return Ok(bad_request("invalid_key", "App key must be a UUID").into_response());
	};

	let Some(app) = state.apps.get_app_by_key(&app_key).await? else {
		return Ok(not_found("App not found").into_response());
	};

	let entries = state.translations.list_translations(app.id, &locale).await?;

	Ok(Json(ListTranslationsResponse {
		translations: entries.into_iter().map(TranslationResponse::from).collect(),
	})
	.into_response())
}
