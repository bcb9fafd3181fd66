// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Public translation resolution response types.

use serde::{Deserialize, Serialize};

use lingua_server_db::TranslationEntry;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// One resolved key/value pair. `value` is null when the key has no live
/// value in the requested locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TranslationResponse {
	pub key: String,
	pub value: Option<String>,
}

impl From<TranslationEntry> for TranslationResponse {
	fn from(entry: TranslationEntry) -> Self {
		Self {
			key: entry.key,
			value: entry.value,
		}
	}
}

/// Response for a full app+locale resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ListTranslationsResponse {
	pub translations: Vec<TranslationResponse>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_value_serializes_as_null() {
		let response = TranslationResponse {
			key: "greeting".to_string(),
			value: None,
		};
		let json = serde_json::to_value(&response).unwrap();
		assert!(json["value"].is_null());
	}
}
