// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Core type definitions for authentication and entity addressing.
//!
//! Every persisted row is addressed by a 64-bit snowflake id minted by
//! `lingua_common_core::IdGenerator`. The newtypes here keep app, language,
//! key, value, user, and session ids from being mixed up at compile time.
//!
//! All ID types implement transparent serde serialization (as integers) and
//! provide conversion to/from `i64`.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(i64);

		impl $name {
			/// Create an ID from a raw snowflake value.
			pub const fn new(id: i64) -> Self {
				Self(id)
			}

			/// Get the inner value.
			pub const fn into_inner(self) -> i64 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}

		impl From<$name> for i64 {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(AppId, "Unique identifier for an app (tenant).");
define_id_type!(LanguageId, "Unique identifier for a language.");
define_id_type!(KeyId, "Unique identifier for a translation key.");
define_id_type!(ValueId, "Unique identifier for a translation value.");
define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(SessionId, "Unique identifier for a session.");
