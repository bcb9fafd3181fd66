// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! # lingua-server-auth
//!
//! Authentication primitives for the lingua server:
//!
//! - **ID newtypes**: type-safe wrappers around snowflake ids for every
//!   entity ([`AppId`], [`LanguageId`], [`KeyId`], [`ValueId`], [`UserId`],
//!   [`SessionId`]) preventing accidental mixing
//! - **[`User`]**: the admin account row shared by the persistence and API
//!   layers
//! - **Passwords**: bcrypt hashing and verification ([`password`])
//! - **Bearer tokens**: stateless signed tokens with the user id as the
//!   subject claim ([`token`])
//! - **Sessions**: revocable server-side cookie sessions with hashed random
//!   tokens ([`session`])
//! - **Extraction**: pulling credentials out of request headers
//!   ([`middleware`])
//!
//! The HTTP surface accepts either credential form, preferring a bearer
//! token when an `Authorization` header is present and falling back to the
//! session cookie otherwise.

pub mod error;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;
pub mod types;
pub mod user;

pub use error::AuthError;
pub use middleware::{
	extract_bearer_token, extract_session_cookie, AuthContext, CurrentUser, SESSION_COOKIE_NAME,
};
pub use password::{hash_password, verify_password};
pub use session::{generate_session_token, hash_token, Session};
pub use token::{Claims, TokenKeys};
pub use types::{AppId, KeyId, LanguageId, SessionId, UserId, ValueId};
pub use user::User;
