// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! App resource request/response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lingua_server_auth::AppId;
use lingua_server_db::App;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create or rename an app.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppRequest {
	pub name: Option<String>,
}

/// An app in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AppResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub id: AppId,
	pub name: String,
	/// Public key client applications use to fetch translations.
	pub key: Uuid,
	pub created_at: i64,
	pub updated_at: Option<i64>,
}

impl From<App> for AppResponse {
	fn from(app: App) -> Self {
		Self {
			id: app.id,
			name: app.name,
			key: app.key,
			created_at: app.created_at,
			updated_at: app.updated_at,
		}
	}
}

/// Response for app list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListAppsResponse {
	pub apps: Vec<AppResponse>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn response_drops_deleted_at() {
		let app = App {
			id: AppId::new(1),
			name: "Acme".to_string(),
			key: Uuid::new_v4(),
			created_at: 10,
			updated_at: Some(20),
			deleted_at: None,
		};

		let json = serde_json::to_value(AppResponse::from(app)).unwrap();
		assert_eq!(json["name"], "Acme");
		assert!(json.get("deleted_at").is_none());
	}
}
