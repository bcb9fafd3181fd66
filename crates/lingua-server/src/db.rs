// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Database wiring for the server binary.
//!
//! Re-exports the repositories from lingua-server-db and applies the ordered
//! migration scripts at startup.

use sqlx::sqlite::SqlitePool;

use crate::error::ServerError;

pub use lingua_server_db::{
	create_pool, AppRepository, DbError, KeyRepository, LanguageRepository, SessionRepository,
	TranslationRepository, UserRepository, ValueRepository,
};

/// Run all database migrations.
///
/// # Errors
/// Returns `ServerError::Db` if a migration fails for a reason other than
/// having already been applied.
///
/// # Note
/// Migrations are idempotent - safe to run multiple times.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ServerError> {
	let m1 = include_str!("../migrations/001_initial.sql");
	for stmt in m1.split(';').filter(|s| !s.trim().is_empty()) {
		sqlx::query(stmt).execute(pool).await?;
	}

	// 002 renames translation_language.culture; on a database that already
	// has the new name the rename fails with "no such column".
	let m2 = include_str!("../migrations/002_rename_culture_to_locale.sql");
	for stmt in m2.split(';').filter(|s| !s.trim().is_empty()) {
		if let Err(e) = sqlx::query(stmt).execute(pool).await {
			let msg = e.to_string();
			if !msg.contains("no such column") && !msg.contains("duplicate column") {
				return Err(e.into());
			}
		}
	}

	tracing::debug!("migrations applied");
	Ok(())
}
