// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Language resource request/response types.

use serde::{Deserialize, Serialize};

use lingua_server_auth::{AppId, LanguageId};
use lingua_server_db::Language;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create or update a language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LanguageRequest {
	pub locale: Option<String>,
}

/// A language in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LanguageResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub id: LanguageId,
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub app_id: AppId,
	pub locale: String,
	pub created_at: i64,
	pub updated_at: Option<i64>,
}

impl From<Language> for LanguageResponse {
	fn from(language: Language) -> Self {
		Self {
			id: language.id,
			app_id: language.app_id,
			locale: language.locale,
			created_at: language.created_at,
			updated_at: language.updated_at,
		}
	}
}

/// Response for language list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListLanguagesResponse {
	pub languages: Vec<LanguageResponse>,
}
