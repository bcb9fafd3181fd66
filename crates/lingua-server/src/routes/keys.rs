// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Translation key CRUD HTTP handlers, nested under an app.
//!
//! Key responses embed the key's live values. Setting a value is modeled as
//! delete-then-insert rather than in-place mutation: the previous value row
//! for the (key, language) pair is soft-deleted and a fresh row inserted,
//! keeping the full translation history.

use std::collections::HashMap;

use axum::{
	extract::{Path, Query, State},
	response::{IntoResponse, Response},
	Json,
};

pub use lingua_server_api::keys::*;
use lingua_server_api::MessageResponse;
use lingua_server_auth::{AppId, KeyId, ValueId};
use lingua_server_db::{TranslationKey, TranslationValue};

use lingua_common_core::clock::now_millis;

use crate::{
	api::AppState,
	api_response::{conflict, not_found, validation_error},
	auth_middleware::RequireAuth,
	error::ServerError,
	pagination::ListParams,
	validation::FieldErrors,
};

#[utoipa::path(
    get,
    path = "/app/{app_id}/key",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("search" = Option<String>, Query, description = "Case-insensitive key filter"),
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Page of keys with live values", body = ListKeysResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// GET /app/{app_id}/key - List an app's keys with their live values.
pub async fn list_keys(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(app_id): Path<i64>,
	Query(params): Query<ListParams>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let keys = state
		.keys
		.list_keys(app_id, params.search(), params.limit(), params.offset())
		.await?;

	// One query for the whole page's values, grouped per key.
	let mut values_by_key: HashMap<KeyId, Vec<TranslationValue>> = HashMap::new();
	for value in state.values.list_live_values_for_app(app_id).await? {
		values_by_key
			.entry(value.translation_key_id)
			.or_default()
			.push(value);
	}

	let keys = keys
		.into_iter()
		.map(|key| {
			let values = values_by_key.remove(&key.id).unwrap_or_default();
			KeyResponse::from_parts(key, values)
		})
		.collect();

	Ok(Json(ListKeysResponse { keys }).into_response())
}

#[utoipa::path(
    get,
    path = "/app/{app_id}/key/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Key id")
    ),
    responses(
        (status = 200, description = "The key with live values", body = KeyResponse),
        (status = 404, description = "App or key not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// GET /app/{app_id}/key/{id} - Fetch one key with its live values.
pub async fn get_key(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let Some(key) = state.keys.get_key(app_id, KeyId::new(id)).await? else {
		return Ok(not_found("Key not found").into_response());
	};

	let values = state.values.list_values_for_key(key.id).await?;
	Ok(Json(KeyResponse::from_parts(key, values)).into_response())
}

#[utoipa::path(
    post,
    path = "/app/{app_id}/key",
    params(("app_id" = i64, Path, description = "Owning app id")),
    request_body = KeyRequest,
    responses(
        (status = 200, description = "Created key", body = KeyResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Key already exists", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// POST /app/{app_id}/key - Add a key to an app.
pub async fn create_key(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(app_id): Path<i64>,
	Json(payload): Json<KeyRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(key_text) = errors.required("key", payload.key.as_deref()) else {
		return Ok(validation_error(errors).into_response());
	};

	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	if state.keys.key_in_use(app_id, &key_text, None).await? {
		return Ok(conflict("Key already exists").into_response());
	}

	let key = TranslationKey {
		id: KeyId::new(state.next_id()),
		app_id,
		key: key_text,
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.keys.create_key(&key).await?;

	match state.keys.get_key(app_id, key.id).await? {
		Some(key) => Ok(Json(KeyResponse::from_parts(key, Vec::new())).into_response()),
		None => Ok(not_found("Key not found").into_response()),
	}
}

#[utoipa::path(
    put,
    path = "/app/{app_id}/key/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Key id")
    ),
    request_body = KeyRequest,
    responses(
        (status = 200, description = "Updated key", body = KeyResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App or key not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Key already exists", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// PUT /app/{app_id}/key/{id} - Rename a key.
pub async fn update_key(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
	Json(payload): Json<KeyRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(key_text) = errors.required("key", payload.key.as_deref()) else {
		return Ok(validation_error(errors).into_response());
	};

	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let id = KeyId::new(id);
	let Some(mut key) = state.keys.get_key(app_id, id).await? else {
		return Ok(not_found("Key not found").into_response());
	};

	if state.keys.key_in_use(app_id, &key_text, Some(id)).await? {
		return Ok(conflict("Key already exists").into_response());
	}

	key.key = key_text;
	key.updated_at = Some(now_millis());
	state.keys.update_key(&key).await?;

	let Some(key) = state.keys.get_key(app_id, id).await? else {
		return Ok(not_found("Key not found").into_response());
	};
	let values = state.values.list_values_for_key(key.id).await?;
	Ok(Json(KeyResponse::from_parts(key, values)).into_response())
}

#[utoipa::path(
    delete,
    path = "/app/{app_id}/key/{id}",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Key id")
    ),
    responses(
        (status = 200, description = "Key deleted", body = MessageResponse),
        (status = 404, description = "App or key not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// DELETE /app/{app_id}/key/{id} - Soft-delete a key.
pub async fn delete_key(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
) -> Result<Response, ServerError> {
	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	if state.keys.soft_delete_key(app_id, KeyId::new(id)).await? {
		Ok(Json(MessageResponse::new("Key deleted")).into_response())
	} else {
		Ok(not_found("Key not found").into_response())
	}
}

#[utoipa::path(
    post,
    path = "/app/{app_id}/key/{id}/value",
    params(
        ("app_id" = i64, Path, description = "Owning app id"),
        ("id" = i64, Path, description = "Key id")
    ),
    request_body = KeyValueRequest,
    responses(
        (status = 200, description = "The new live value", body = KeyValueResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App, key, or language not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "keys"
)]
/// POST /app/{app_id}/key/{id}/value - Set the value for a (key, language).
///
/// Replaces any existing live value for the pair: the predecessor is
/// soft-deleted, a fresh row is inserted, and history is retained.
pub async fn add_value(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path((app_id, id)): Path<(i64, i64)>,
	Json(payload): Json<KeyValueRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let language_id = errors.required_value("language_id", payload.language_id);
	let value_text = errors.required("value", payload.value.as_deref());
	let (Some(language_id), Some(value_text)) = (language_id, value_text) else {
		return Ok(validation_error(errors).into_response());
	};

	let app_id = AppId::new(app_id);
	if !state.apps.app_exists(app_id).await? {
		return Ok(not_found("App not found").into_response());
	}

	let key_id = KeyId::new(id);
	if !state.keys.key_exists(app_id, key_id).await? {
		return Ok(not_found("Key not found").into_response());
	}

	if !state.languages.language_exists(app_id, language_id).await? {
		return Ok(not_found("Language not found").into_response());
	}

	let value = TranslationValue {
		id: ValueId::new(state.next_id()),
		translation_key_id: key_id,
		translation_language_id: language_id,
		value: value_text,
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.values.replace_value(&value).await?;

	match state.values.get_value(value.id).await? {
		Some(value) => Ok(Json(KeyValueResponse::from(value)).into_response()),
		None => Ok(not_found("Value not found").into_response()),
	}
}
