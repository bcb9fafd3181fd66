// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Public translation resolution.
//!
//! Resolves the full key -> value table an app's clients consume: for every
//! non-deleted key under the app, the most recent non-deleted value whose
//! language matches the requested locale. Keys with no value in that locale
//! resolve to `None` rather than being dropped or erroring, so a client
//! always sees its complete key set.
//!
//! Locale matching is exact (case-sensitive), unlike the admin-side
//! uniqueness checks.

use async_trait::async_trait;
use lingua_server_auth::AppId;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[async_trait]
pub trait TranslationStore: Send + Sync {
	async fn list_translations(
		&self,
		app_id: AppId,
		locale: &str,
	) -> Result<Vec<TranslationEntry>, DbError>;
}

/// One resolved (key, value) pair. `value` is `None` when the key has no
/// live value in the requested locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationEntry {
	pub key: String,
	pub value: Option<String>,
}

/// Repository for the public translation resolution query.
#[derive(Clone)]
pub struct TranslationRepository {
	pool: SqlitePool,
}

impl TranslationRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Resolve every non-deleted key of an app against one locale.
	#[tracing::instrument(skip(self), fields(app_id = %app_id, locale))]
	pub async fn list_translations(
		&self,
		app_id: AppId,
		locale: &str,
	) -> Result<Vec<TranslationEntry>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT k.key,
				   (SELECT v.value
					FROM translation_value v
					JOIN translation_language l ON l.id = v.translation_language_id
					WHERE v.translation_key_id = k.id
					  AND l.app_id = k.app_id
					  AND l.locale = ?
					  AND v.deleted_at IS NULL
					  AND l.deleted_at IS NULL
					ORDER BY v.created_at DESC, v.id DESC
					LIMIT 1) AS value
			FROM translation_key k
			WHERE k.app_id = ? AND k.deleted_at IS NULL
			ORDER BY k.key
			"#,
		)
		.bind(locale)
		.bind(app_id.into_inner())
		.fetch_all(&self.pool)
		.await?;

		let entries = rows
			.iter()
			.map(|r| {
				Ok(TranslationEntry {
					key: r.try_get("key")?,
					value: r.try_get("value")?,
				})
			})
			.collect::<Result<Vec<_>, DbError>>()?;

		tracing::debug!(count = entries.len(), "translations resolved");
		Ok(entries)
	}
}

#[async_trait]
impl TranslationStore for TranslationRepository {
	async fn list_translations(
		&self,
		app_id: AppId,
		locale: &str,
	) -> Result<Vec<TranslationEntry>, DbError> {
		self.list_translations(app_id, locale).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::key::{KeyRepository, TranslationKey};
	use crate::language::{Language, LanguageRepository};
	use crate::testing;
	use crate::value::{TranslationValue, ValueRepository};
	use lingua_common_core::clock::now_millis;
	use lingua_server_auth::{KeyId, LanguageId, ValueId};

	struct Fixture {
		translations: TranslationRepository,
		languages: LanguageRepository,
		keys: KeyRepository,
		values: ValueRepository,
	}

	async fn make_fixture() -> Fixture {
		let pool = testing::create_full_test_pool().await;
		Fixture {
			translations: TranslationRepository::new(pool.clone()),
			languages: LanguageRepository::new(pool.clone()),
			keys: KeyRepository::new(pool.clone()),
			values: ValueRepository::new(pool),
		}
	}

	impl Fixture {
		async fn seed_language(&self, id: i64, locale: &str) {
			self.languages
				.create_language(&Language {
					id: LanguageId::new(id),
					app_id: AppId::new(1),
					locale: locale.to_string(),
					created_at: now_millis(),
					updated_at: None,
					deleted_at: None,
				})
				.await
				.unwrap();
		}

		async fn seed_key(&self, id: i64, key: &str) {
			self.keys
				.create_key(&TranslationKey {
					id: KeyId::new(id),
					app_id: AppId::new(1),
					key: key.to_string(),
					created_at: now_millis(),
					updated_at: None,
					deleted_at: None,
				})
				.await
				.unwrap();
		}

		async fn seed_value(&self, id: i64, key_id: i64, language_id: i64, text: &str) {
			self.values
				.replace_value(&TranslationValue {
					id: ValueId::new(id),
					translation_key_id: KeyId::new(key_id),
					translation_language_id: LanguageId::new(language_id),
					value: text.to_string(),
					created_at: now_millis(),
					updated_at: None,
					deleted_at: None,
				})
				.await
				.unwrap();
		}
	}

	#[tokio::test]
	async fn resolves_keys_to_locale_values() {
		let fx = make_fixture().await;
		fx.seed_language(10, "en-US").await;
		fx.seed_language(11, "fr-FR").await;
		fx.seed_key(20, "greeting").await;
		fx.seed_value(30, 20, 10, "Hello").await;
		fx.seed_value(31, 20, 11, "Bonjour").await;

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].key, "greeting");
		assert_eq!(entries[0].value.as_deref(), Some("Hello"));
	}

	#[tokio::test]
	async fn key_without_value_resolves_to_none() {
		let fx = make_fixture().await;
		fx.seed_language(10, "en-US").await;
		fx.seed_key(20, "greeting").await;
		fx.seed_key(21, "farewell").await;
		fx.seed_value(30, 20, 10, "Hello").await;

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert_eq!(entries.len(), 2);
		// Ordered by key text.
		assert_eq!(entries[0].key, "farewell");
		assert!(entries[0].value.is_none());
		assert_eq!(entries[1].value.as_deref(), Some("Hello"));
	}

	#[tokio::test]
	async fn replacement_resolves_to_the_newest_value() {
		let fx = make_fixture().await;
		fx.seed_language(10, "en-US").await;
		fx.seed_key(20, "greeting").await;
		fx.seed_value(30, 20, 10, "Hello").await;
		fx.seed_value(31, 20, 10, "Hi").await;

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert_eq!(entries[0].value.as_deref(), Some("Hi"));
	}

	#[tokio::test]
	async fn locale_matching_is_exact() {
		let fx = make_fixture().await;
		fx.seed_language(10, "en-US").await;
		fx.seed_key(20, "greeting").await;
		fx.seed_value(30, 20, 10, "Hello").await;

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "EN-us")
			.await
			.unwrap();
		assert!(entries[0].value.is_none());
	}

	#[tokio::test]
	async fn deleted_keys_and_languages_are_excluded() {
		let fx = make_fixture().await;
		fx.seed_language(10, "en-US").await;
		fx.seed_key(20, "greeting").await;
		fx.seed_key(21, "farewell").await;
		fx.seed_value(30, 20, 10, "Hello").await;
		fx.seed_value(31, 21, 10, "Bye").await;

		fx.keys
			.soft_delete_key(AppId::new(1), KeyId::new(21))
			.await
			.unwrap();

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert_eq!(entries.len(), 1);
		assert_eq!(entries[0].key, "greeting");

		fx.languages
			.soft_delete_language(AppId::new(1), LanguageId::new(10))
			.await
			.unwrap();

		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert!(entries[0].value.is_none());
	}

	#[tokio::test]
	async fn app_with_no_keys_resolves_to_empty_list() {
		let fx = make_fixture().await;
		let entries = fx
			.translations
			.list_translations(AppId::new(1), "en-US")
			.await
			.unwrap();
		assert!(entries.is_empty());
	}
}
