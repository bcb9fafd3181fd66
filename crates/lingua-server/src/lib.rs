// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! lingua localization server.
//!
//! This crate provides the HTTP server for the lingua multi-tenant
//! localization backend: an authenticated CRUD API over apps, languages,
//! translation keys, and values, plus the public translation resolution
//! endpoint client applications consume.

pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod auth_middleware;
pub mod db;
pub mod error;
pub mod pagination;
pub mod routes;
pub mod typed_router;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use lingua_server_config::ServerConfig;
pub use typed_router::{AuthedRouter, PublicRouter};
