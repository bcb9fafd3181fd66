// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Translation value repository for database operations.
//!
//! Values are append-only: replacing the text for a (key, language) pair
//! soft-deletes the live row and inserts a fresh one, so the full history of
//! every translation is retained. At most one non-deleted row exists per
//! pair, enforced here at write time rather than by a database constraint.

use async_trait::async_trait;
use lingua_server_auth::{AppId, KeyId, LanguageId, ValueId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[async_trait]
pub trait ValueStore: Send + Sync {
	async fn create_value(&self, value: &TranslationValue) -> Result<(), DbError>;
	async fn get_value(&self, id: ValueId) -> Result<Option<TranslationValue>, DbError>;
	async fn get_live_value(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Option<TranslationValue>, DbError>;
	async fn list_values_for_key(&self, key_id: KeyId) -> Result<Vec<TranslationValue>, DbError>;
	async fn list_live_values_for_app(
		&self,
		app_id: AppId,
	) -> Result<Vec<TranslationValue>, DbError>;
	async fn list_value_history(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Vec<TranslationValue>, DbError>;
	async fn replace_value(&self, value: &TranslationValue) -> Result<(), DbError>;
}

/// A translation value row: the text for a (key, language) pair at a point
/// in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationValue {
	pub id: ValueId,
	pub translation_key_id: KeyId,
	pub translation_language_id: LanguageId,
	pub value: String,
	pub created_at: i64,
	pub updated_at: Option<i64>,
	pub deleted_at: Option<i64>,
}

/// Repository for translation value database operations.
#[derive(Clone)]
pub struct ValueRepository {
	pool: SqlitePool,
}

impl ValueRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, value), fields(value_id = %value.id, key_id = %value.translation_key_id))]
	pub async fn create_value(&self, value: &TranslationValue) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO translation_value (
				id, translation_key_id, translation_language_id, value,
				created_at, updated_at, deleted_at
			) VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(value.id.into_inner())
		.bind(value.translation_key_id.into_inner())
		.bind(value.translation_language_id.into_inner())
		.bind(&value.value)
		.bind(value.created_at)
		.bind(value.updated_at)
		.bind(value.deleted_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(value_id = %value.id, "translation value created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(value_id = %id))]
	pub async fn get_value(&self, id: ValueId) -> Result<Option<TranslationValue>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, translation_key_id, translation_language_id, value,
				   created_at, updated_at, deleted_at
			FROM translation_value
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_value(&r)).transpose()
	}

	/// Get the single live value for a (key, language) pair, if any.
	#[tracing::instrument(skip(self), fields(key_id = %key_id, language_id = %language_id))]
	pub async fn get_live_value(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Option<TranslationValue>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, translation_key_id, translation_language_id, value,
				   created_at, updated_at, deleted_at
			FROM translation_value
			WHERE translation_key_id = ? AND translation_language_id = ? AND deleted_at IS NULL
			ORDER BY created_at DESC
			LIMIT 1
			"#,
		)
		.bind(key_id.into_inner())
		.bind(language_id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_value(&r)).transpose()
	}

	/// List the live values of one key (all languages), language rows that
	/// were themselves soft-deleted excluded.
	#[tracing::instrument(skip(self), fields(key_id = %key_id))]
	pub async fn list_values_for_key(
		&self,
		key_id: KeyId,
	) -> Result<Vec<TranslationValue>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT v.id, v.translation_key_id, v.translation_language_id, v.value,
				   v.created_at, v.updated_at, v.deleted_at
			FROM translation_value v
			JOIN translation_language l ON l.id = v.translation_language_id
			WHERE v.translation_key_id = ? AND v.deleted_at IS NULL AND l.deleted_at IS NULL
			ORDER BY l.locale
			"#,
		)
		.bind(key_id.into_inner())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_value).collect()
	}

	/// List every live value under an app in one query, for embedding values
	/// into a page of key DTOs without a query per key.
	#[tracing::instrument(skip(self), fields(app_id = %app_id))]
	pub async fn list_live_values_for_app(
		&self,
		app_id: AppId,
	) -> Result<Vec<TranslationValue>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT v.id, v.translation_key_id, v.translation_language_id, v.value,
				   v.created_at, v.updated_at, v.deleted_at
			FROM translation_value v
			JOIN translation_key k ON k.id = v.translation_key_id
			JOIN translation_language l ON l.id = v.translation_language_id
			WHERE k.app_id = ? AND v.deleted_at IS NULL
			  AND k.deleted_at IS NULL AND l.deleted_at IS NULL
			ORDER BY v.translation_key_id, l.locale
			"#,
		)
		.bind(app_id.into_inner())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_value).collect()
	}

	/// Full history for a (key, language) pair, newest first, deleted rows
	/// included.
	#[tracing::instrument(skip(self), fields(key_id = %key_id, language_id = %language_id))]
	pub async fn list_value_history(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Vec<TranslationValue>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, translation_key_id, translation_language_id, value,
				   created_at, updated_at, deleted_at
			FROM translation_value
			WHERE translation_key_id = ? AND translation_language_id = ?
			ORDER BY created_at DESC, id DESC
			"#,
		)
		.bind(key_id.into_inner())
		.bind(language_id.into_inner())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_value).collect()
	}

	/// Replace the live value for `value`'s (key, language) pair.
	///
	/// Soft-deletes whatever live row exists for the pair, then inserts the
	/// new row. The two statements are a single unit of work but not a
	/// transaction; a concurrent identical write can race (a documented
	/// property of the system, not a guaranteed invariant).
	#[tracing::instrument(skip(self, value), fields(value_id = %value.id, key_id = %value.translation_key_id, language_id = %value.translation_language_id))]
	pub async fn replace_value(&self, value: &TranslationValue) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE translation_value SET deleted_at = ?
			WHERE translation_key_id = ? AND translation_language_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(value.created_at)
		.bind(value.translation_key_id.into_inner())
		.bind(value.translation_language_id.into_inner())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() > 0 {
			tracing::debug!(
				key_id = %value.translation_key_id,
				language_id = %value.translation_language_id,
				"previous translation value soft-deleted"
			);
		}

		self.create_value(value).await
	}
}

fn row_to_value(row: &sqlx::sqlite::SqliteRow) -> Result<TranslationValue, DbError> {
	Ok(TranslationValue {
		id: ValueId::new(row.try_get("id")?),
		translation_key_id: KeyId::new(row.try_get("translation_key_id")?),
		translation_language_id: LanguageId::new(row.try_get("translation_language_id")?),
		value: row.try_get("value")?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		deleted_at: row.try_get("deleted_at")?,
	})
}

#[async_trait]
impl ValueStore for ValueRepository {
	async fn create_value(&self, value: &TranslationValue) -> Result<(), DbError> {
		self.create_value(value).await
	}

	async fn get_value(&self, id: ValueId) -> Result<Option<TranslationValue>, DbError> {
		self.get_value(id).await
	}

	async fn get_live_value(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Option<TranslationValue>, DbError> {
		self.get_live_value(key_id, language_id).await
	}

	async fn list_values_for_key(&self, key_id: KeyId) -> Result<Vec<TranslationValue>, DbError> {
		self.list_values_for_key(key_id).await
	}

	async fn list_live_values_for_app(
		&self,
		app_id: AppId,
	) -> Result<Vec<TranslationValue>, DbError> {
		self.list_live_values_for_app(app_id).await
	}

	async fn list_value_history(
		&self,
		key_id: KeyId,
		language_id: LanguageId,
	) -> Result<Vec<TranslationValue>, DbError> {
		self.list_value_history(key_id, language_id).await
	}

	async fn replace_value(&self, value: &TranslationValue) -> Result<(), DbError> {
		self.replace_value(value).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::language::{Language, LanguageRepository};
	use crate::testing;
	use lingua_common_core::clock::now_millis;
	use lingua_server_auth::LanguageId;

	fn make_value(id: i64, key_id: i64, language_id: i64, text: &str) -> TranslationValue {
		TranslationValue {
			id: ValueId::new(id),
			translation_key_id: KeyId::new(key_id),
			translation_language_id: LanguageId::new(language_id),
			value: text.to_string(),
			created_at: now_millis(),
			updated_at: None,
			deleted_at: None,
		}
	}

	async fn make_repos() -> (ValueRepository, LanguageRepository) {
		let pool = testing::create_full_test_pool().await;
		(
			ValueRepository::new(pool.clone()),
			LanguageRepository::new(pool),
		)
	}

	async fn seed_language(languages: &LanguageRepository, id: i64, app_id: i64, locale: &str) {
		languages
			.create_language(&Language {
				id: LanguageId::new(id),
				app_id: lingua_server_auth::AppId::new(app_id),
				locale: locale.to_string(),
				created_at: now_millis(),
				updated_at: None,
				deleted_at: None,
			})
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn create_and_get_roundtrip() {
		let (values, _) = make_repos().await;
		values.create_value(&make_value(1, 10, 20, "Hello")).await.unwrap();

		let fetched = values.get_value(ValueId::new(1)).await.unwrap().unwrap();
		assert_eq!(fetched.value, "Hello");
		assert_eq!(fetched.translation_key_id, KeyId::new(10));
	}

	#[tokio::test]
	async fn replace_keeps_exactly_one_live_value() {
		let (values, _) = make_repos().await;
		values.create_value(&make_value(1, 10, 20, "Hello")).await.unwrap();

		values.replace_value(&make_value(2, 10, 20, "Hi")).await.unwrap();

		let live = values
			.get_live_value(KeyId::new(10), LanguageId::new(20))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(live.value, "Hi");
		assert_eq!(live.id, ValueId::new(2));

		// History keeps both rows; the first is flagged deleted.
		let history = values
			.list_value_history(KeyId::new(10), LanguageId::new(20))
			.await
			.unwrap();
		assert_eq!(history.len(), 2);
		let old = history.iter().find(|v| v.id == ValueId::new(1)).unwrap();
		assert!(old.deleted_at.is_some());
		assert_eq!(old.value, "Hello");
	}

	#[tokio::test]
	async fn replace_works_without_a_predecessor() {
		let (values, _) = make_repos().await;
		values.replace_value(&make_value(1, 10, 20, "First")).await.unwrap();

		let live = values
			.get_live_value(KeyId::new(10), LanguageId::new(20))
			.await
			.unwrap();
		assert_eq!(live.unwrap().value, "First");
	}

	#[tokio::test]
	async fn replace_leaves_other_pairs_alone() {
		let (values, _) = make_repos().await;
		values.create_value(&make_value(1, 10, 20, "Hello")).await.unwrap();
		values.create_value(&make_value(2, 10, 21, "Bonjour")).await.unwrap();

		values.replace_value(&make_value(3, 10, 20, "Hi")).await.unwrap();

		let other = values
			.get_live_value(KeyId::new(10), LanguageId::new(21))
			.await
			.unwrap()
			.unwrap();
		assert_eq!(other.value, "Bonjour");
		assert!(other.deleted_at.is_none());
	}

	#[tokio::test]
	async fn values_of_deleted_languages_are_hidden_from_key_listings() {
		let (values, languages) = make_repos().await;
		seed_language(&languages, 20, 1, "en-US").await;
		seed_language(&languages, 21, 1, "fr-FR").await;

		values.create_value(&make_value(1, 10, 20, "Hello")).await.unwrap();
		values.create_value(&make_value(2, 10, 21, "Bonjour")).await.unwrap();

		languages
			.soft_delete_language(lingua_server_auth::AppId::new(1), LanguageId::new(21))
			.await
			.unwrap();

		let listed = values.list_values_for_key(KeyId::new(10)).await.unwrap();
		assert_eq!(listed.len(), 1);
		assert_eq!(listed[0].value, "Hello");
	}
}
