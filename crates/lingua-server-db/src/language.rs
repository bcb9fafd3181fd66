// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Language repository for database operations.
//!
//! A language row scopes translation values to a locale tag (e.g. "en-US")
//! within one app. Locales are unique per app among non-deleted rows.

use async_trait::async_trait;
use lingua_server_auth::{AppId, LanguageId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};

use lingua_common_core::clock::now_millis;

use crate::error::DbError;

#[async_trait]
pub trait LanguageStore: Send + Sync {
	async fn create_language(&self, language: &Language) -> Result<(), DbError>;
	async fn get_language(&self, app_id: AppId, id: LanguageId)
		-> Result<Option<Language>, DbError>;
	async fn language_exists(&self, app_id: AppId, id: LanguageId) -> Result<bool, DbError>;
	async fn locale_in_use(
		&self,
		app_id: AppId,
		locale: &str,
		exclude: Option<LanguageId>,
	) -> Result<bool, DbError>;
	async fn list_languages(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Language>, DbError>;
	async fn update_language(&self, language: &Language) -> Result<(), DbError>;
	async fn soft_delete_language(&self, app_id: AppId, id: LanguageId) -> Result<bool, DbError>;
}

/// A language (locale) row belonging to an app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
	pub id: LanguageId,
	pub app_id: AppId,
	pub locale: String,
	pub created_at: i64,
	pub updated_at: Option<i64>,
	pub deleted_at: Option<i64>,
}

/// Repository for language database operations.
#[derive(Clone)]
pub struct LanguageRepository {
	pool: SqlitePool,
}

impl LanguageRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, language), fields(language_id = %language.id, app_id = %language.app_id))]
	pub async fn create_language(&self, language: &Language) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO translation_language (id, app_id, locale, created_at, updated_at, deleted_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(language.id.into_inner())
		.bind(language.app_id.into_inner())
		.bind(&language.locale)
		.bind(language.created_at)
		.bind(language.updated_at)
		.bind(language.deleted_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(language_id = %language.id, "language created");
		Ok(())
	}

	/// Get a non-deleted language scoped to its owning app.
	#[tracing::instrument(skip(self), fields(app_id = %app_id, language_id = %id))]
	pub async fn get_language(
		&self,
		app_id: AppId,
		id: LanguageId,
	) -> Result<Option<Language>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, app_id, locale, created_at, updated_at, deleted_at
			FROM translation_language
			WHERE id = ? AND app_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.bind(app_id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_language(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(app_id = %app_id, language_id = %id))]
	pub async fn language_exists(&self, app_id: AppId, id: LanguageId) -> Result<bool, DbError> {
		let count: (i64,) = sqlx::query_as(
			r#"
			SELECT COUNT(*) FROM translation_language
			WHERE id = ? AND app_id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.bind(app_id.into_inner())
		.fetch_one(&self.pool)
		.await?;

		Ok(count.0 > 0)
	}

	/// Check whether a locale is taken within an app (case-insensitive,
	/// non-deleted rows only, optionally excluding one row for updates).
	#[tracing::instrument(skip(self), fields(app_id = %app_id))]
	pub async fn locale_in_use(
		&self,
		app_id: AppId,
		locale: &str,
		exclude: Option<LanguageId>,
	) -> Result<bool, DbError> {
		let count: (i64,) = match exclude {
			Some(id) => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM translation_language
					WHERE app_id = ? AND LOWER(locale) = LOWER(?) AND id != ? AND deleted_at IS NULL
					"#,
				)
				.bind(app_id.into_inner())
				.bind(locale)
				.bind(id.into_inner())
				.fetch_one(&self.pool)
				.await?
			}
			None => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM translation_language
					WHERE app_id = ? AND LOWER(locale) = LOWER(?) AND deleted_at IS NULL
					"#,
				)
				.bind(app_id.into_inner())
				.bind(locale)
				.fetch_one(&self.pool)
				.await?
			}
		};

		Ok(count.0 > 0)
	}

	/// List an app's non-deleted languages ordered by locale, with optional
	/// substring search and limit/offset pagination.
	#[tracing::instrument(skip(self, search), fields(app_id = %app_id, limit, offset))]
	pub async fn list_languages(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Language>, DbError> {
		let rows = if let Some(search_term) = search {
			let pattern = format!("%{search_term}%");
			sqlx::query(
				r#"
				SELECT id, app_id, locale, created_at, updated_at, deleted_at
				FROM translation_language
				WHERE app_id = ? AND deleted_at IS NULL AND locale LIKE ?
				ORDER BY locale
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
				SELECT id, app_id, locale, created_at, updated_at, deleted_at
				FROM translation_language
				WHERE app_id = ? AND deleted_at IS NULL
				ORDER BY locale
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(app_id.into_inner())
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		};

		rows.iter().map(row_to_language).collect()
	}

	#[tracing::instrument(skip(self, language), fields(language_id = %language.id))]
	pub async fn update_language(&self, language: &Language) -> Result<(), DbError> {
		sqlx::query("UPDATE translation_language SET locale = ?, updated_at = ? WHERE id = ?")
			.bind(&language.locale)
			.bind(language.updated_at)
			.bind(language.id.into_inner())
			.execute(&self.pool)
			.await?;

		tracing::debug!(language_id = %language.id, "language updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(app_id = %app_id, language_id = %id))]
	pub async fn soft_delete_language(
		&self,
		app_id: AppId,
		id: LanguageId,
	) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE translation_language SET deleted_at = ?
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
			tracing::debug!(language_id = %id, "language soft-deleted");
		}
		Ok(deleted)
	}
}

fn row_to_language(row: &sqlx::sqlite::SqliteRow) -> Result<Language, DbError> {
	Ok(Language {
		id: LanguageId::new(row.try_get("id")?),
		app_id: AppId::new(row.try_get("app_id")?),
		locale: row.try_get("locale")?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		deleted_at: row.try_get("deleted_at")?,
	})
}

#[async_trait]
impl LanguageStore for LanguageRepository {
	async fn create_language(&self, language: &Language) -> Result<(), DbError> {
		self.create_language(language).await
	}

	async fn get_language(
		&self,
		app_id: AppId,
		id: LanguageId,
	) -> Result<Option<Language>, DbError> {
		self.get_language(app_id, id).await
	}

	async fn language_exists(&self, app_id: AppId, id: LanguageId) -> Result<bool, DbError> {
		self.language_exists(app_id, id).await
	}

	async fn locale_in_use(
		&self,
		app_id: AppId,
		locale: &str,
		exclude: Option<LanguageId>,
	) -> Result<bool, DbError> {
		self.locale_in_use(app_id, locale, exclude).await
	}

	async fn list_languages(
		&self,
		app_id: AppId,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Language>, DbError> {
		self.list_languages(app_id, search, limit, offset).await
	}

	async fn update_language(&self, language: &Language) -> Result<(), DbError> {
		self.update_language(language).await
	}

	async fn soft_delete_language(&self, app_id: AppId, id: LanguageId) -> Result<bool, DbError> {
		self.soft_delete_language(app_id, id).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	fn make_language(id: i64, app_id: i64, locale: &str) -> Language {
		Language {
			id: LanguageId::new(id),
			app_id: AppId::new(app_id),
			locale: locale.to_string(),
			created_at: now_millis(),
			updated_at: None,
			deleted_at: None,
		}
	}

	async fn make_repo() -> LanguageRepository {
		let pool = testing::create_test_pool().await;
		testing::create_app_table(&pool).await;
		testing::create_language_table(&pool).await;
		LanguageRepository::new(pool)
	}

	#[tokio::test]
	async fn create_and_get_scoped_by_app() {
		let repo = make_repo().await;
		repo.create_language(&make_language(10, 1, "en-US"))
			.await
			.unwrap();

		let found = repo
			.get_language(AppId::new(1), LanguageId::new(10))
			.await
			.unwrap();
		assert_eq!(found.unwrap().locale, "en-US");

		// Wrong owning app sees nothing.
		let other = repo
			.get_language(AppId::new(2), LanguageId::new(10))
			.await
			.unwrap();
		assert!(other.is_none());
	}

	#[tokio::test]
	async fn locale_uniqueness_is_per_app_and_case_insensitive() {
		let repo = make_repo().await;
		repo.create_language(&make_language(10, 1, "en-US"))
			.await
			.unwrap();

		assert!(repo
			.locale_in_use(AppId::new(1), "EN-us", None)
			.await
			.unwrap());
		// Same locale under a different app is free.
		assert!(!repo
			.locale_in_use(AppId::new(2), "en-US", None)
			.await
			.unwrap());
		// The row itself is excluded during updates.
		assert!(!repo
			.locale_in_use(AppId::new(1), "en-US", Some(LanguageId::new(10)))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn soft_delete_frees_the_locale() {
		let repo = make_repo().await;
		repo.create_language(&make_language(10, 1, "en-US"))
			.await
			.unwrap();

		assert!(repo
			.soft_delete_language(AppId::new(1), LanguageId::new(10))
			.await
			.unwrap());
		assert!(!repo
			.locale_in_use(AppId::new(1), "en-US", None)
			.await
			.unwrap());
		assert!(!repo
			.language_exists(AppId::new(1), LanguageId::new(10))
			.await
			.unwrap());
	}

	#[tokio::test]
	async fn list_is_ordered_and_searchable() {
		let repo = make_repo().await;
		for (id, locale) in [(1, "fr-FR"), (2, "en-US"), (3, "en-GB"), (4, "de-DE")] {
			repo.create_language(&make_language(id, 1, locale))
				.await
				.unwrap();
		}
		// A language under another app must not leak in.
		repo.create_language(&make_language(5, 2, "en-AU"))
			.await
			.unwrap();

		let all = repo.list_languages(AppId::new(1), None, 25, 0).await.unwrap();
		let locales: Vec<_> = all.iter().map(|l| l.locale.as_str()).collect();
		assert_eq!(locales, vec!["de-DE", "en-GB", "en-US", "fr-FR"]);

		let en = repo
			.list_languages(AppId::new(1), Some("en-"), 25, 0)
			.await
			.unwrap();
		assert_eq!(en.len(), 2);
	}
}
