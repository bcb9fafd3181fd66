// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! # lingua-server-db
//!
//! Centralized persistence layer for the lingua server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each domain has two components:
//! - **`*Store` trait**: Defines the interface (e.g., `AppStore`, `UserStore`)
//! - **`*Repository` struct**: Concrete implementation holding a `SqlitePool`
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait FooStore: Send + Sync {
//!     async fn get_foo(&self, id: FooId) -> Result<Option<Foo>, DbError>;
//!     async fn create_foo(&self, foo: &Foo) -> Result<(), DbError>;
//! }
//!
//! pub struct FooRepository {
//!     pool: SqlitePool,
//! }
//! ```
//!
//! ## Soft Delete
//!
//! Every domain row carries a nullable `deleted_at` millisecond timestamp.
//! A row with `deleted_at` set is logically absent: every lookup, list,
//! existence probe, and uniqueness check in this crate filters on
//! `deleted_at IS NULL`, so a forgotten filter cannot leak deleted rows
//! through a repository. Natural keys (app name, locale, key text, username)
//! are therefore reusable after deletion. Rows are never physically removed
//! (the `session` table, which is not a domain entity, is the one exception).
//!
//! ## Error Handling
//!
//! Use [`DbError`] variants appropriately:
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | Resource must exist but doesn't (update/delete by ID) |
//! | `Conflict` | Business rule conflict |
//! | `Sqlx` | Let sqlx errors propagate via `?` for unexpected database errors |
//! | `Internal` | Data corruption, invalid stored data (e.g., unparseable UUID) |
//!
//! **`Option<T>` vs `NotFound`:**
//! - Return `Result<Option<T>>` for lookups where absence is normal
//! - Return `DbError::NotFound` only when the caller provided an ID that
//!   should exist
//!
//! ## Return Type Conventions
//!
//! | Operation | Return type |
//! |-----------|-------------|
//! | Get by ID/unique key | `Result<Option<T>>` |
//! | List/search | `Result<Vec<T>>` |
//! | Create | `Result<()>` (ids are minted by the caller) |
//! | Update | `Result<()>` |
//! | Soft delete | `Result<bool>` (true if a live row was deleted) |
//! | Exists/count | `Result<bool>` or `Result<i64>` |
//!
//! ## Testing
//!
//! Tests use in-memory SQLite with manually created schemas; see
//! [`testing`]. Repository suites live in `#[cfg(test)]` modules alongside
//! the implementation.

pub mod app;
mod error;
pub mod key;
pub mod language;
pub mod pool;
pub mod session;
pub mod translation;
pub mod user;
pub mod value;

#[cfg(test)]
pub mod testing;

pub use app::{App, AppRepository, AppStore};
pub use error::{DbError, Result};
pub use key::{KeyRepository, KeyStore, TranslationKey};
pub use language::{Language, LanguageRepository, LanguageStore};
pub use pool::create_pool;
pub use session::{SessionRepository, SessionStore};
pub use translation::{TranslationEntry, TranslationRepository, TranslationStore};
pub use user::{UserRepository, UserStore};
pub use value::{TranslationValue, ValueRepository, ValueStore};
