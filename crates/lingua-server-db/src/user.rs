// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! User repository for database operations.
//!
//! Usernames are stored lowercased and compared case-insensitively; the
//! stored `password` column is a bcrypt hash.

use async_trait::async_trait;
use lingua_server_auth::{User, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use lingua_common_core::clock::now_millis;

use crate::error::DbError;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<(), DbError>;
	async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	async fn username_in_use(
		&self,
		username: &str,
		exclude: Option<UserId>,
	) -> Result<bool, DbError>;
	async fn list_users(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<User>, DbError>;
	async fn update_user(&self, user: &User) -> Result<(), DbError>;
	async fn soft_delete_user(&self, id: UserId) -> Result<bool, DbError>;
	async fn count_users(&self) -> Result<i64, DbError>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	/// Create a new repository with the given connection pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert a new user row.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn create_user(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO user (id, full_name, username, password, created_at, updated_at, deleted_at)
			VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.into_inner())
		.bind(&user.full_name)
		.bind(&user.username)
		.bind(&user.password)
		.bind(user.created_at)
		.bind(user.updated_at)
		.bind(user.deleted_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(())
	}

	/// Get a non-deleted user by id.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, full_name, username, password, created_at, updated_at, deleted_at
			FROM user
			WHERE id = ? AND deleted_at IS NULL
			"#,
		)
		.bind(id.into_inner())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Get a non-deleted user by username (case-insensitive).
	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, full_name, username, password, created_at, updated_at, deleted_at
			FROM user
			WHERE LOWER(username) = LOWER(?) AND deleted_at IS NULL
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		let result = row.map(|r| row_to_user(&r)).transpose()?;
		if let Some(ref user) = result {
			tracing::debug!(user_id = %user.id, "user found by username");
		}
		Ok(result)
	}

	/// Check whether a username is taken (case-insensitive, non-deleted rows
	/// only, optionally excluding one row for updates).
	#[tracing::instrument(skip(self))]
	pub async fn username_in_use(
		&self,
		username: &str,
		exclude: Option<UserId>,
	) -> Result<bool, DbError> {
		let count: (i64,) = match exclude {
			Some(id) => {
				sqlx::query_as(
					r#"
					SELECT COUNT(*) FROM user
					WHERE LOWER(username) = LOWER(?) AND id != ? AND deleted_at IS NULL
					"#,
				)
				.bind(username)
				.bind(id.into_inner())
				.fetch_one(&self.pool)
				.await?
			}
			None => {
				sqlx::query_as(
					"SELECT COUNT(*) FROM user WHERE LOWER(username) = LOWER(?) AND deleted_at IS NULL",
				)
				.bind(username)
				.fetch_one(&self.pool)
				.await?
			}
		};

		Ok(count.0 > 0)
	}

	/// List non-deleted users ordered by full name, with optional substring
	/// search and limit/offset pagination.
	#[tracing::instrument(skip(self, search), fields(limit, offset))]
	pub async fn list_users(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<User>, DbError> {
		let rows = if let Some(search_term) = search {
			let pattern = format!("%{search_term}%");
			sqlx::query(
				r#"
				SELECT id, full_name, username, password, created_at, updated_at, deleted_at
				FROM user
				WHERE deleted_at IS NULL AND full_name LIKE ?
				ORDER BY full_name
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
				SELECT id, full_name, username, password, created_at, updated_at, deleted_at
				FROM user
				WHERE deleted_at IS NULL
				ORDER BY full_name
				LIMIT ? OFFSET ?
				"#,
			)
			.bind(limit)
			.bind(offset)
			.fetch_all(&self.pool)
			.await?
		};

		rows.iter().map(row_to_user).collect()
	}

	/// Update a user's profile fields and `updated_at`. The password column
	/// is written as-is; callers hash before storing.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			UPDATE user SET full_name = ?, username = ?, password = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.full_name)
		.bind(&user.username)
		.bind(&user.password)
		.bind(user.updated_at)
		.bind(user.id.into_inner())
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// Soft-delete a user by setting their `deleted_at` timestamp.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn soft_delete_user(&self, id: UserId) -> Result<bool, DbError> {
		let result =
			sqlx::query("UPDATE user SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
				.bind(now_millis())
				.bind(id.into_inner())
				.execute(&self.pool)
				.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(user_id = %id, "user soft-deleted");
		}
		Ok(deleted)
	}

	/// Count every user row, soft-deleted included.
	///
	/// Sign-up is a one-shot bootstrap: once any user row has ever existed
	/// it stays closed, so this deliberately does not filter on `deleted_at`.
	#[tracing::instrument(skip(self))]
	pub async fn count_users(&self) -> Result<i64, DbError> {
		let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user")
			.fetch_one(&self.pool)
			.await?;
		Ok(count.0)
	}
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	Ok(User {
		id: UserId::new(row.try_get("id")?),
		full_name: row.try_get("full_name")?,
		username: row.try_get("username")?,
		password: row.try_get("password")?,
		created_at: row.try_get("created_at")?,
		updated_at: row.try_get("updated_at")?,
		deleted_at: row.try_get("deleted_at")?,
	})
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.create_user(user).await
	}

	async fn get_user(&self, id: UserId) -> Result<Option<User>, DbError> {
		self.get_user(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn username_in_use(
		&self,
		username: &str,
		exclude: Option<UserId>,
	) -> Result<bool, DbError> {
		self.username_in_use(username, exclude).await
	}

	async fn list_users(
		&self,
		search: Option<&str>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<User>, DbError> {
		self.list_users(search, limit, offset).await
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn soft_delete_user(&self, id: UserId) -> Result<bool, DbError> {
		self.soft_delete_user(id).await
	}

	async fn count_users(&self) -> Result<i64, DbError> {
		self.count_users().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing;

	fn make_user(id: i64, full_name: &str, username: &str) -> User {
		User {
			id: UserId::new(id),
			full_name: full_name.to_string(),
			username: username.to_string(),
			password: "$2b$04$testhash".to_string(),
			created_at: now_millis(),
			updated_at: None,
			deleted_at: None,
		}
	}

	async fn make_repo() -> UserRepository {
		let pool = testing::create_test_pool().await;
		testing::create_user_table(&pool).await;
		UserRepository::new(pool)
	}

	#[tokio::test]
	async fn create_and_get_roundtrip() {
		let repo = make_repo().await;
		repo.create_user(&make_user(1, "Ada Lovelace", "ada")).await.unwrap();

		let user = repo.get_user(UserId::new(1)).await.unwrap().unwrap();
		assert_eq!(user.full_name, "Ada Lovelace");
		assert_eq!(user.username, "ada");
	}

	#[tokio::test]
	async fn username_lookup_is_case_insensitive() {
		let repo = make_repo().await;
		repo.create_user(&make_user(1, "Ada Lovelace", "ada")).await.unwrap();

		let user = repo.get_user_by_username("ADA").await.unwrap();
		assert!(user.is_some());
		assert!(repo.username_in_use("Ada", None).await.unwrap());
	}

	#[tokio::test]
	async fn count_includes_soft_deleted_rows() {
		let repo = make_repo().await;
		assert_eq!(repo.count_users().await.unwrap(), 0);

		repo.create_user(&make_user(1, "Ada Lovelace", "ada")).await.unwrap();
		repo.soft_delete_user(UserId::new(1)).await.unwrap();

		// Bootstrap stays closed after deletion.
		assert_eq!(repo.count_users().await.unwrap(), 1);
		assert!(repo.get_user(UserId::new(1)).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn deleted_username_is_reusable() {
		let repo = make_repo().await;
		repo.create_user(&make_user(1, "Ada Lovelace", "ada")).await.unwrap();
		repo.soft_delete_user(UserId::new(1)).await.unwrap();

		assert!(!repo.username_in_use("ada", None).await.unwrap());
		repo.create_user(&make_user(2, "Ada Again", "ada")).await.unwrap();
		assert!(repo.username_in_use("ada", None).await.unwrap());
	}

	#[tokio::test]
	async fn list_orders_by_full_name_and_searches() {
		let repo = make_repo().await;
		repo.create_user(&make_user(1, "Charlie", "c")).await.unwrap();
		repo.create_user(&make_user(2, "Alice", "a")).await.unwrap();
		repo.create_user(&make_user(3, "Bob", "b")).await.unwrap();

		let all = repo.list_users(None, 25, 0).await.unwrap();
		let names: Vec<_> = all.iter().map(|u| u.full_name.as_str()).collect();
		assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);

		let hits = repo.list_users(Some("li"), 25, 0).await.unwrap();
		let names: Vec<_> = hits.iter().map(|u| u.full_name.as_str()).collect();
		assert_eq!(names, vec!["Alice", "Charlie"]);
	}

	#[tokio::test]
	async fn update_rewrites_profile_fields() {
		let repo = make_repo().await;
		let mut user = make_user(1, "Ada Lovelace", "ada");
		repo.create_user(&user).await.unwrap();

		user.full_name = "Ada King".to_string();
		user.updated_at = Some(now_millis());
		repo.update_user(&user).await.unwrap();

		let fetched = repo.get_user(UserId::new(1)).await.unwrap().unwrap();
		assert_eq!(fetched.full_name, "Ada King");
		assert!(fetched.updated_at.is_some());
	}
}
