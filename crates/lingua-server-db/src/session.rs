// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Session repository for database operations.
//!
//! Sessions back the cookie authentication path. Only the SHA-256 hash of a
//! session token is stored. Sessions are hard-deleted on sign-out; they are
//! infrastructure, not a domain entity, and carry no soft-delete column.

use async_trait::async_trait;
use lingua_server_auth::{Session, SessionId, UserId};
use sqlx::{sqlite::SqlitePool, Row};

use crate::error::DbError;

#[async_trait]
pub trait SessionStore: Send + Sync {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError>;
	async fn get_session_by_token_hash(&self, token_hash: &str)
		-> Result<Option<Session>, DbError>;
	async fn touch_session(&self, session: &Session) -> Result<(), DbError>;
	async fn delete_session(&self, id: SessionId) -> Result<bool, DbError>;
	async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<i64, DbError>;
}

/// Repository for session database operations.
#[derive(Clone)]
pub struct SessionRepository {
	pool: SqlitePool,
}

impl SessionRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, session, token_hash), fields(session_id = %session.id, user_id = %session.user_id))]
	pub async fn create_session(
		&self,
		session: &Session,
		token_hash: &str,
	) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO session (id, user_id, token_hash, created_at, last_used_at, expires_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(session.id.into_inner())
		.bind(session.user_id.into_inner())
		.bind(token_hash)
		.bind(session.created_at)
		.bind(session.last_used_at)
		.bind(session.expires_at)
		.execute(&self.pool)
		.await?;

		tracing::debug!(session_id = %session.id, "session created");
		Ok(())
	}

	/// Look up a session by the hash of its cookie token.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn get_session_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, user_id, created_at, last_used_at, expires_at
			FROM session
			WHERE token_hash = ?
			"#,
		)
		.bind(token_hash)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_session(&r)).transpose()
	}

	/// Persist a slid expiry after use.
	#[tracing::instrument(skip(self, session), fields(session_id = %session.id))]
	pub async fn touch_session(&self, session: &Session) -> Result<(), DbError> {
		sqlx::query("UPDATE session SET last_used_at = ?, expires_at = ? WHERE id = ?")
			.bind(session.last_used_at)
			.bind(session.expires_at)
			.bind(session.id.into_inner())
			.execute(&self.pool)
			.await?;

		Ok(())
	}

	/// Delete a session (sign-out).
	#[tracing::instrument(skip(self), fields(session_id = %id))]
	pub async fn delete_session(&self, id: SessionId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM session WHERE id = ?")
			.bind(id.into_inner())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(session_id = %id, "session deleted");
		}
		Ok(deleted)
	}

	/// Delete every session belonging to a user.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<i64, DbError> {
		let result = sqlx::query("DELETE FROM session WHERE user_id = ?")
			.bind(user_id.into_inner())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() as i64)
	}
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<Session, DbError> {
	Ok(Session {
		id: SessionId::new(row.try_get("id")?),
		user_id: UserId::new(row.try_get("user_id")?),
		created_at: row.try_get("created_at")?,
		last_used_at: row.try_get("last_used_at")?,
		expires_at: row.try_get("expires_at")?,
	})
}

#[async_trait]
impl SessionStore for SessionRepository {
	async fn create_session(&self, session: &Session, token_hash: &str) -> Result<(), DbError> {
		self.create_session(session, token_hash).await
	}

	async fn get_session_by_token_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<Session>, DbError> {
		self.get_session_by_token_hash(token_hash).await
	}

	async fn touch_session(&self, session: &Session) -> Result<(), DbError> {
		self.touch_session(session).await
	}

	async fn delete_session(&self, id: SessionId) -> Result<bool, DbError> {
		self.delete_session(id).await
	}

	async fn delete_sessions_for_user(&self, user_id: UserId) -> Result<i64, DbError> {
		self.delete_sessions_for_user(user_id).await
	}
}
