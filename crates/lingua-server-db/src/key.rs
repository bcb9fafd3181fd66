// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Translation key repository for database operations.

use async_trait::async_trait;
use lingua_server_auth::{AppId, KeyId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use lingua_common_core::clock::now_millis;

use crate::error::DbError;

#[async_trait]
pub trait KeyStore: Send + Sync {
	async fn create_key(&self, key: &TranslationKey) -> Result<(), DbError>;
	async fn get_key(&self, app_id: AppId, id: KeyId) -> Result<Option<TranslationKey>, DbError>;
	async fn key_exists(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError>;
	async fn key_in_use(
		&self,
		app_id: AppId,
		key: &str,
		exclude: Option<KeyId>,
	) -> Result<bool, DbError>;
	async fn list_keys(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TranslationKey>, DbError>;
	async fn update_key(&self, key: &TranslationKey) -> Result<(), DbError>;
	async fn soft_delete_key(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError>;
}

/// A translation key row: the stable identifier for a translatable string
/// within an app. The key text is unique per app, case-insensitively, among
/// non-deleted rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationKey {
	pub id: KeyId,
	pub app_id: AppId,
	pub key: String,
	pub created_at: i64,
	pub updated_at: Option<i64>,
	pub deleted_at: Option<i64>,
}

/// Repository for translation key database operations.
#[derive(Clone)]
pub struct KeyRepository {
	pool: SqlitePool,
}

impl KeyRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, key), fields(key_id = %key.id, app_id = %key.app_id))]
	pub async fn create_key(&self, key: &TranslationKey) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO translation_key (id, app_id, key, created_at, updated_at, deleted_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(key.id.into_inner())
		.bind(key.app_id.into_inner())
		.bind(&key.key)
		.bind(key.created_at)
		.bind(key.updated_at)
		.bind(key.deleted_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(key_id = %key.id, "translation key created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(app_id = %app_id, key_id = %id))]
	pub async fn get_key(
		&self,
		app_id: AppId,
		id: KeyId,
	) -> Result<Option<TranslationKey>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, app_id, key, created_at, updated_at, deleted_at
			FROM translation_key
			WHERE id = ? AND app_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.bind(app_id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_key(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(app_id = %app_id, key_id = %id))]
	pub async fn key_exists(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError> {
		let count: (i64,) = sqlx::query_as(
			r#"
			SELECT COUNT(*) FROM translation_key
			WHERE id = ? AND app_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.bind(app_id.into_inner())
		.fetch_one(&self.pool)
		.await?;

		Ok(count.0 > 0)
	}

	/// Check whether key text is taken within an app (case-insensitive,
	/// non-deleted rows only, optionally excluding one row for updates).
	#[tracing::instrument(skip(self), fields(app_id = %app_id))]
	pub async fn key_in_use(
		&self,
		app_id: AppId,
		key: &str,
		exclude: Option<KeyId>,
	) -> Result<bool, DbError> {
		let count: (i64,) = match exclude {
			Some(id) => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM translation_key
					WHERE app_id = ? AND LOWER(key) = LOWER(?) AND id != ? AND deleted_at IS NULL
					"#,
				)
				.bind(app_id.into_inner())
				.bind(key)
				.bind(id.into_inner())
				.fetch_one(&self.pool)
				.await?
			}
			None => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM translation_key
					WHERE app_id = ? AND LOWER(key) = LOWER(?) AND deleted_at IS NULL
					"#,
				)
				.bind(app_id.into_inner())
				.bind(key)
				.fetch_one(&self.pool)
				.await?
			}
		};

		Ok(count.0 > 0)
	}

	/// List an app's non-deleted keys ordered by key text, with optional
	/// substring search and limit/offset pagination.
	#[tracing::instrument(skip(self, search), fields(app_id = %app_id, limit, offset))]
	pub async fn list_keys(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TranslationKey>, DbError> {
		let rows = if let Some(search_term) = search {
			let pattern = format!("%{search_term}%");
			sqlx::query(
				r#"
				SELECT id, app_id, key, created_at, updated_at, deleted_at
				FROM translation_key
				WHERE app_id = ? AND deleted_at IS NULL AND key LIKE ?
				ORDER BY key
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(app_id.into_inner())
			.bind(&pattern)
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		} else {
			sqlx::query(
				r#"
				SELECT id, app_id, key, created_at, updated_at, deleted_at
				FROM translation_key
				WHERE app_id = ? AND deleted_at IS NULL
				ORDER BY key
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(app_id.into_inner())
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		};

		rows.iter().map(row_to_key).collect()
	}

	#[tracing::instrument(skip(self, key), fields(key_id = %key.id))]
	pub async fn update_key(&self, key: &TranslationKey) -> Result<(), DbError> {
		sqlx::query("UPDATE translation_key SET key = ?, updated_at = ? WHERE id = ?")
			.bind(&key.key)
			.bind(key.updated_at)
			.bind(key.id.into_inner())
			.execute(&self.pool)
			.await?;

		tracing::debug!(key_id = %key.id, "translation key updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(app_id = %app_id, key_id = %id))]
	pub async fn soft_delete_key(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE translation_key SET deleted_at = ?
			WHERE id = ? AND app_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(now_millis())
		.bind(id.into_inner())
		.bind(app_id.into_inner())
		.execute(&self.pool)
		.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(key_id = %id, "translation key soft-deleted");
		}
		Ok(deleted)
	}
}

fn row_to_key(row: &sqlx::sqlite::SqliteRow) -> Result<TranslationKey, DbError> {
	Ok(TranslationKey {
		id: KeyId::new(row.try_get("id")?),
		app_id: AppId::new(row.try_get("app_id")?),
		key: row.try_get("key")?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		deleted_at: row.try_get("deleted_at")?,
	})
}

#[async_trait]
impl KeyStore for KeyRepository {
	async fn create_key(&self, key: &TranslationKey) -> Result<(), DbError> {
		self.create_key(key).await
	}

	async fn get_key(&self, app_id: AppId, id: KeyId) -> Result<Option<TranslationKey>, DbError> {
		self.get_key(app_id, id).await
	}

	async fn key_exists(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError> {
		self.key_exists(app_id, id).await
	}

	async fn key_in_use(
		&self,
		app_id: AppId,
		key: &str,
		exclude: Option<KeyId>,
	) -> Result<bool, DbError> {
		self.key_in_use(app_id, key, exclude).await
	}

	async fn list_keys(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TranslationKey>, DbError> {
		self.list_keys(app_id, search, limit, offset).await
	}

	async fn update_key(&self, key: &TranslationKey) -> Result<(), DbError> {
		self.update_key(key).await
	}

	async fn soft_delete_key(&self, app_id: AppId, id: KeyId) -> Result<bool, DbError> {
		self.soft_delete_key(app_id, id).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	fn make_key(id: i64, app_id: i64, key: &str) -> TranslationKey {
		TranslationKey {
			id: KeyId::new(id),
			app_id: AppId::new(app_id),
			key: key.to_string(),
			created_at: now_millis(),
			updated_at: None,
			deleted_at: None,
		}
	}

	async fn make_repo() -> KeyRepository {
		let pool = testing::create_test_pool().await;
		testing::create_app_table(&pool).await;
		testing::create_key_table(&pool).await;
		KeyRepository::new(pool)
	}

	#[tokio::test]
	async fn create_and_get_scoped_by_app() {
		let repo = make_repo().await;
		repo.create_key(&make_key(10, 1, "greeting")).await.unwrap();

		let found = repo.get_key(AppId::new(1), KeyId::new(10)).await.unwrap();
		assert_eq!(found.unwrap().key, "greeting");

		let other = repo.get_key(AppId::new(2), KeyId::new(10)).await.unwrap();
		assert!(other.is_none());
	}

	#[tokio::test]
	async fn key_uniqueness_is_per_app_and_case_insensitive() {
		let repo = make_repo().await;
		repo.create_key(&make_key(10, 1, "Greeting")).await.unwrap();

		assert!(repo.key_in_use(AppId::new(1), "greeting", None).await.unwrap());
		assert!(repo.key_in_use(AppId::new(1), "GREETING", None).await.unwrap());
		assert!(!repo.key_in_use(AppId::new(2), "greeting", None).await.unwrap());
		assert!(!repo
			.key_in_use(AppId::new(1), "Greeting", Some(KeyId::new(10)))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn soft_delete_frees_the_key_text() {
		let repo = make_repo().await;
		repo.create_key(&make_key(10, 1, "greeting")).await.unwrap();

		assert!(repo
			.soft_delete_key(AppId::new(1), KeyId::new(10))
			.await
			.unwrap());
		assert!(!repo.key_in_use(AppId::new(1), "greeting", None).await.unwrap());
		assert!(repo
			.get_key(AppId::new(1), KeyId::new(10))
			.await
			.unwrap()
			.is_none());
	}

	#[tokio::test]
	async fn pages_are_disjoint_and_cover_the_ordered_list() {
		let repo = make_repo().await;
		let names = ["alpha", "bravo", "charlie", "delta", "echo"];
		for (i, name) in names.iter().enumerate() {
			repo.create_key(&make_key(i as i64 + 1, 1, name)).await.unwrap();
		}

		let page1 = repo.list_keys(AppId::new(1), None, 2, 0).await.unwrap();
		let page2 = repo.list_keys(AppId::new(1), None, 2, 2).await.unwrap();
		let page3 = repo.list_keys(AppId::new(1), None, 2, 4).await.unwrap();

		let collected: Vec<_> = page1
			.iter()
			.chain(&page2)
			.chain(&page3)
			.map(|k| k.key.clone())
			.collect();
		assert_eq!(collected, names);
	}

	#[tokio::test]
	async fn search_filters_case_insensitively() {
		let repo = make_repo().await;
		repo.create_key(&make_key(1, 1, "home.title")).await.unwrap();
		repo.create_key(&make_key(2, 1, "home.subtitle")).await.unwrap();
		repo.create_key(&make_key(3, 1, "footer.copyright")).await.unwrap();

		let hits = repo
			.list_keys(AppId::new(1), Some("HOME"), 25, 0)
			.await
			.unwrap();
		assert_eq!(hits.len(), 2);
	}
}
