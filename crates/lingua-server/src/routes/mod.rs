// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! HTTP route handlers, one module per resource.

pub mod apps;
pub mod auth;
pub mod health;
pub mod keys;
pub mod languages;
pub mod translations;
pub mod users;
