// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub async fn create_test_pool() -> SqlitePool {
	// A single connection: every pooled connection to ":memory:" would
	// otherwise open its own private database.
	//
	// Foreign keys are left off: these repository tests exercise tables in
	// isolation and intentionally insert child rows without their parents.
	let options = SqliteConnectOptions::new()
		.filename(":memory:")
		.foreign_keys(false);
	SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.unwrap()
}

pub async fn create_app_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS app (
			id INTEGER PRIMARY KEY,
			name TEXT NOT NULL,
			key TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			updated_at INTEGER,
			deleted_at INTEGER
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_language_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS translation_language (
			id INTEGER PRIMARY KEY,
			app_id INTEGER NOT NULL REFERENCES app(id),
			locale TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			updated_at INTEGER,
			deleted_at INTEGER
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_key_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS translation_key (
			id INTEGER PRIMARY KEY,
			app_id INTEGER NOT NULL REFERENCES app(id),
			key TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			updated_at INTEGER,
			deleted_at INTEGER
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_value_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS translation_value (
			id INTEGER PRIMARY KEY,
			translation_key_id INTEGER NOT NULL REFERENCES translation_key(id),
			translation_language_id INTEGER NOT NULL REFERENCES translation_language(id),
			value TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			updated_at INTEGER,
			deleted_at INTEGER
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_user_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS user (
			id INTEGER PRIMARY KEY,
			full_name TEXT NOT NULL,
			username TEXT NOT NULL,
			password TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			updated_at INTEGER,
			deleted_at INTEGER
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_session_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS session (
			id INTEGER PRIMARY KEY,
			user_id INTEGER NOT NULL REFERENCES user(id),
			token_hash TEXT NOT NULL,
			created_at INTEGER NOT NULL,
			last_used_at INTEGER NOT NULL,
			expires_at INTEGER NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

/// Pool with the full schema, for tests spanning several repositories.
pub async fn create_full_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_app_table(&pool).await;
	create_language_table(&pool).await;
	create_key_table(&pool).await;
	create_value_table(&pool).await;
	create_user_table(&pool).await;
	create_session_table(&pool).await;
	pool
}
