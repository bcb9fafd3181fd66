// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Translation key resource request/response types.
//!
//! Key responses embed the key's live values (one per language) so the admin
//! console can render a translation grid from a single listing call.

use serde::{Deserialize, Serialize};

use lingua_server_auth::{AppId, KeyId, LanguageId, ValueId};
use lingua_server_db::{TranslationKey, TranslationValue};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create or rename a translation key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct KeyRequest {
	pub key: Option<String>,
}

/// Request to set the value of a key in one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct KeyValueRequest {
	#[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
	pub language_id: Option<LanguageId>,
	pub value: Option<String>,
}

/// A live translation value embedded in a key response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct KeyValueResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub id: ValueId,
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub language_id: LanguageId,
	pub value: String,
	pub created_at: i64,
}

impl From<TranslationValue> for KeyValueResponse {
	fn from(value: TranslationValue) -> Self {
		Self {
			id: value.id,
			language_id: value.translation_language_id,
			value: value.value,
			created_at: value.created_at,
		}
	}
}

/// A translation key in API responses, with its live values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct KeyResponse {
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub id: KeyId,
	#[cfg_attr(feature = "openapi", schema(value_type = i64))]
	pub app_id: AppId,
	pub key: String,
	pub values: Vec<KeyValueResponse>,
	pub created_at: i64,
	pub updated_at: Option<i64>,
}

impl KeyResponse {
	/// Assemble a response from a key row and its live values.
	pub fn from_parts(key: TranslationKey, values: Vec<TranslationValue>) -> Self {
		Self {
			id: key.id,
			app_id: key.app_id,
			key: key.key,
			values: values.into_iter().map(KeyValueResponse::from).collect(),
			created_at: key.created_at,
			updated_at: key.updated_at,
		}
	}
}

/// Response for key list requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListKeysResponse {
	pub keys: Vec<KeyResponse>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_parts_embeds_values() {
		let key = TranslationKey {
			id: KeyId::new(1),
			app_id: AppId::new(2),
			key: "greeting".to_string(),
			created_at: 10,
			updated_at: None,
			deleted_at: None,
		};
		let values = vec![TranslationValue {
			id: ValueId::new(3),
			translation_key_id: KeyId::new(1),
			translation_language_id: LanguageId::new(4),
			value: "Hello".to_string(),
			created_at: 11,
			updated_at: None,
			deleted_at: None,
		}];

		let response = KeyResponse::from_parts(key, values);
		assert_eq!(response.values.len(), 1);
		assert_eq!(response.values[0].value, "Hello");
		assert_eq!(response.values[0].language_id, LanguageId::new(4));
	}
}
