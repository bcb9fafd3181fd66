// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Millisecond-epoch clock helpers.
//!
//! All row timestamps (`created_at`, `updated_at`, `deleted_at`) are stored
//! as integer milliseconds since the Unix epoch.

use chrono::Utc;

/// Current time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
	Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn now_millis_is_recent() {
		// 2023-01-01T00:00:00Z in ms; anything earlier means a broken clock.
		let now = now_millis();
		assert!(now > 1_672_531_200_000);
	}

	#[test]
	fn now_millis_is_non_decreasing() {
		let a = now_millis();
		let b = now_millis();
		assert!(b >= a);
	}
}
