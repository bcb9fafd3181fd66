// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! App CRUD HTTP handlers.

use axum::{
	extract::{Path, Query, State},
	response::{IntoResponse, Response},
	Json,
};
use uuid::Uuid;

pub use lingua_server_api::apps::*;
use lingua_server_api::MessageResponse;
use lingua_server_auth::AppId;
use lingua_server_db::App;

use lingua_common_core::clock::now_millis;

use crate::{
	api::AppState,
	api_response::{conflict, not_found, validation_error},
	auth_middleware::RequireAuth,
	error::ServerError,
	pagination::ListParams,
	validation::FieldErrors,
};

const NAME_MAX_LEN: usize = 50;

#[utoipa::path(
    get,
    path = "/app",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("page" = Option<i64>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Page of apps", body = ListAppsResponse),
        (status = 401, description = "Not authenticated", body = lingua_server_api::ErrorResponse)
    ),
    tag = "apps"
)]
/// GET /app - List apps.
pub async fn list_apps(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Query(params): Query<ListParams>,
) -> Result<Response, ServerError> {
	let apps = state
		.apps
		.list_apps(params.search(), params.limit(), params.offset())
		.await?;

	Ok(Json(ListAppsResponse {
		apps: apps.into_iter().map(AppResponse::from).collect(),
	})
	.into_response())
}

#[utoipa::path(
    get,
    path = "/app/{app_id}",
    params(("app_id" = i64, Path, description = "App id")),
    responses(
        (status = 200, description = "The app", body = AppResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "apps"
)]
/// GET /app/{app_id} - Fetch one app.
pub async fn get_app(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Response, ServerError> {
	match state.apps.get_app(AppId::new(id)).await? {
		Some(app) => Ok(Json(AppResponse::from(app)).into_response()),
		None => Ok(not_found("App not found").into_response()),
	}
}

#[utoipa::path(
    post,
    path = "/app",
    request_body = AppRequest,
    responses(
        (status = 200, description = "Created app", body = AppResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Name already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "apps"
)]
/// POST /app - Create an app.
pub async fn create_app(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Json(payload): Json<AppRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(name) = errors.required_text("name", payload.name.as_deref(), NAME_MAX_LEN) else {
		return Ok(validation_error(errors).into_response());
	};

	if state.apps.name_in_use(&name, None).await? {
		return Ok(conflict("App name already used").into_response());
	}

	let app = App {
		id: AppId::new(state.next_id()),
		name,
		key: Uuid::new_v4(),
		created_at: now_millis(),
		updated_at: None,
		deleted_at: None,
	};
	state.apps.create_app(&app).await?;

	// Re-read so the response matches what a subsequent get returns.
	match state.apps.get_app(app.id).await? {
		Some(app) => Ok(Json(AppResponse::from(app)).into_response()),
		None => Ok(not_found("App not found").into_response()),
	}
}

#[utoipa::path(
    put,
    path = "/app/{app_id}",
    params(("app_id" = i64, Path, description = "App id")),
    request_body = AppRequest,
    responses(
        (status = 200, description = "Updated app", body = AppResponse),
        (status = 400, description = "Validation failed", body = lingua_server_api::ErrorResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse),
        (status = 409, description = "Name already used", body = lingua_server_api::ErrorResponse)
    ),
    tag = "apps"
)]
/// PUT /app/{app_id} - Rename an app.
pub async fn update_app(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
	Json(payload): Json<AppRequest>,
) -> Result<Response, ServerError> {
	let mut errors = FieldErrors::new();
	let Some(name) = errors.required_text("name", payload.name.as_deref(), NAME_MAX_LEN) else {
		return Ok(validation_error(errors).into_response());
	};

	let id = AppId::new(id);
	let Some(mut app) = state.apps.get_app(id).await? else {
		return Ok(not_found("App not found").into_response());
	};

	if state.apps.name_in_use(&name, Some(id)).await? {
		return Ok(conflict("App name already used").into_response());
	}

	app.name = name;
	app.updated_at = Some(now_millis());
	state.apps.update_app(&app).await?;

	match state.apps.get_app(id).await? {
		Some(app) => Ok(Json(AppResponse::from(app)).into_response()),
		None => Ok(not_found("App not found").into_response()),
	}
}

#[utoipa::path(
    delete,
    path = "/app/{app_id}",
    params(("app_id" = i64, Path, description = "App id")),
    responses(
        (status = 200, description = "App deleted", body = MessageResponse),
        (status = 404, description = "App not found", body = lingua_server_api::ErrorResponse)
    ),
    tag = "apps"
)]
/// DELETE /app/{app_id} - Soft-delete an app.
pub async fn delete_app(
	State(state): State<AppState>,
	RequireAuth(_current_user): RequireAuth,
	Path(id): Path<i64>,
) -> Result<Response, ServerError> {
	if state.apps.soft_delete_app(AppId::new(id)).await? {
		Ok(Json(MessageResponse::new("App deleted")).into_response())
	} else {
		Ok(not_found("App not found").into_response())
	}
}
