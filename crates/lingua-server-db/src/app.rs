// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! App repository for database operations.
//!
//! An app is a tenant whose strings are being localized. Internally it is
//! addressed by its snowflake id; externally (by client applications fetching
//! translations) by an immutable random UUID `key`.

use async_trait::async_trait;
use lingua_server_auth::AppId;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use lingua_common_core::clock::now_millis;

use crate::error::DbError;

#[async_trait]
pub trait AppStore: Send + Sync {
	async fn create_app(&self, app: &App) -> Result<(), DbError>;
	async fn get_app(&self, id: AppId) -> Result<Option<App>, DbError>;
	async fn get_app_by_key(&self, key: &Uuid) -> Result<Option<App>, DbError>;
	async fn app_exists(&self, id: AppId) -> Result<bool, DbError>;
	async fn name_in_use(&self, name: &str, exclude: Option<AppId>) -> Result<bool, DbError>;
	async fn list_apps(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<App>, DbError>;
	async fn update_app(&self, app: &App) -> Result<(), DbError>;
	async fn soft_delete_app(&self, id: AppId) -> Result<bool, DbError>;
}

/// An app (tenant) row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct App {
	pub id: AppId,
	pub name: String,
	/// Public addressing key handed to client applications. Immutable.
	pub key: Uuid,
	pub created_at: i64,
	pub updated_at: Option<i64>,
	pub deleted_at: Option<i64>,
}

/// Repository for app database operations.
#[derive(Clone)]
pub struct AppRepository {
	pool: SqlitePool,
}

impl AppRepository {
	/// Create a new repository with the given connection pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new app row.
	#[tracing::instrument(skip(self, app), fields(app_id = %app.id))]
	pub async fn create_app(&self, app: &App) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO app (id, name, key, created_at, updated_at, deleted_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(app.id.into_inner())
		.bind(&app.name)
		.bind(app.key.to_string())
		.bind(app.created_at)
		.bind(app.updated_at)
		.bind(app.deleted_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(app_id = %app.id, "app created");
		Ok(())
	}

	/// Get a non-deleted app by id.
	#[tracing::instrument(skip(self), fields(app_id = %id))]
	pub async fn get_app(&self, id: AppId) -> Result<Option<App>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, key, created_at, updated_at, deleted_at
			FROM app
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_app(&r)).transpose()
	}

	/// Get a non-deleted app by its public key.
	///
	/// This is the only lookup path exposed to external clients; it is
	/// intentionally decoupled from the internal sequential ids.
	#[tracing::instrument(skip(self, key))]
	pub async fn get_app_by_key(&self, key: &Uuid) -> Result<Option<App>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, key, created_at, updated_at, deleted_at
			FROM app
			WHERE key = ? AND deleted_at IS NULL
			"#,
		)
		.bind(key.to_string())
		.fetch_optional(&self.pool)
		.await?;

		let result = row.map(|r| row_to_app(&r)).transpose()?;
		if let Some(ref app) = result {
			tracing::debug!(app_id = %app.id, "app found by key");
		}
		Ok(result)
	}

	/// Check that a non-deleted app with this id exists.
	#[tracing::instrument(skip(self), fields(app_id = %id))]
	pub async fn app_exists(&self, id: AppId) -> Result<bool, DbError> {
		let count: (i64,) =
			sqlx::query_as("SELECT COUNT(*) FROM app WHERE id = ? AND deleted_at IS NULL")
				.bind(id.into_inner())
				.fetch_one(&self.pool)
				.await?;

		Ok(count.0 > 0)
	}

	/// Check whether an app name is taken (case-insensitive, non-deleted
	/// rows only, optionally excluding one row for updates).
	#[tracing::instrument(skip(self))]
	pub async fn name_in_use(&self, name: &str, exclude: Option<AppId>) -> Result<bool, DbError> {
		let count: (i64,) = match exclude {
			Some(id) => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM app
					WHERE LOWER(name) = LOWER(?) AND id != ? AND deleted_at IS NULL
					"#,
				)
				.bind(name)
				.bind(id.into_inner())
				.fetch_one(&self.pool)
				.await?
			}
			None => {
				sqlx::query_as(
					"SELECT COUNT(*) FROM app WHERE LOWER(name) = LOWER(?) AND deleted_at IS NULL",
				)
				.bind(name)
				.fetch_one(&self.pool)
				.await?
			}
		};

		Ok(count.0 > 0)
	}

	/// List non-deleted apps ordered by name, with optional case-insensitive
	/// substring search and limit/offset pagination.
	#[tracing::instrument(skip(self, search), fields(limit, offset))]
	pub async fn list_apps(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<App>, DbError> {
		let rows = if let Some(search_term) = search {
			let pattern = format!("%{search_term}%");
			sqlx::query(
				r#"
				SELECT id, name, key, created_at, updated_at, deleted_at
				FROM app
				WHERE deleted_at IS NULL AND name LIKE ?
				ORDER BY name
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(&pattern)
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		} else {
			sqlx::query(
				r#"
				SELECT id, name, key, created_at, updated_at, deleted_at
				FROM app
				WHERE deleted_at IS NULL
				ORDER BY name
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		};

		let apps: Result<Vec<App>, DbError> = rows.iter().map(row_to_app).collect();
		let apps = apps?;
		tracing::debug!(count = apps.len(), "listed apps");
		Ok(apps)
	}

	/// Update an app's name and `updated_at`. The public key never changes.
	#[tracing::instrument(skip(self, app), fields(app_id = %app.id))]
	pub async fn update_app(&self, app: &App) -> Result<(), DbError> {
		sqlx::query("UPDATE app SET name = ?, updated_at = ? WHERE id = ?")
			.bind(&app.name)
			.bind(app.updated_at)
			.bind(app.id.into_inner())
			.execute(&self.pool)
			.await?;

		tracing::debug!(app_id = %app.id, "app updated");
		Ok(())
	}

	/// Soft-delete an app by setting its `deleted_at` timestamp.
	///
	/// # Returns
	/// `true` if a live row was deleted, `false` if none matched.
	#[tracing::instrument(skip(self), fields(app_id = %id))]
	pub async fn soft_delete_app(&self, id: AppId) -> Result<bool, DbError> {
		let result =
			sqlx::query("UPDATE app SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
				.bind(now_millis())
				.bind(id.into_inner())
				.execute(&self.pool)
				.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(app_id = %id, "app soft-deleted");
		}
		Ok(deleted)
	}
}

fn row_to_app(row: &sqlx::sqlite::SqliteRow) -> Result<App, DbError> {
	let key: String = row.try_get("key")?;
	Ok(App {
		id: AppId::new(row.try_get("id")?),
		name: row.try_get("name")?,
		key: Uuid::parse_str(&key)
			.map_err(|e| DbError::Internal(format!("invalid app key in database: {e}")))?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		deleted_at: row.try_get("deleted_at")?,
	})
}

#[async_trait]
impl AppStore for AppRepository {
	async fn create_app(&self, app: &App) -> Result<(), DbError> {
		self.create_app(app).await
	}

	async fn get_app(&self, id: AppId) -> Result<Option<App>, DbError> {
		self.get_app(id).await
	}

	async fn get_app_by_key(&self, key: &Uuid) -> Result<Option<App>, DbError> {
		self.get_app_by_key(key).await
	}

	async fn app_exists(&self, id: AppId) -> Result<bool, DbError> {
		self.app_exists(id).await
	}

	async fn name_in_use(&self, name: &str, exclude: Option<AppId>) -> Result<bool, DbError> {
		self.name_in_use(name, exclude).await
	}

	async fn list_apps(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<App>, DbError> {
		self.list_apps(search, limit, offset).await
	}

	async fn update_app(&self, app: &App) -> Result<(), DbError> {
		self.update_app(app).await
	}

	async fn soft_delete_app(&self, id: AppId) -> Result<bool, DbError> {
		self.soft_delete_app(id).await
	}
}
