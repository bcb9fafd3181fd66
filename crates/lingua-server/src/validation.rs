// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Shared validation utilities for API handlers.
//!
//! Request DTOs arrive with every field optional; handlers validate them
//! through a [`FieldErrors`] accumulator and short-circuit with a 400
//! response carrying the per-field error map when anything failed. Checks on
//! one field stop at the first failure for that field.

use std::collections::BTreeMap;

/// Accumulates validation failures per field.
#[derive(Debug, Default)]
pub struct FieldErrors {
	errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Require a non-empty trimmed text field with a maximum length.
	///
	/// Returns the trimmed value when valid, recording an error and
	/// returning `None` otherwise.
	pub fn required_text(
		&mut self,
		field: &str,
		value: Option<&str>,
		max_len: usize,
	) -> Option<String> {
		let trimmed = value.map(str::trim).filter(|v| !v.is_empty());
		let Some(trimmed) = trimmed else {
			self.push(field, format!("{field} is required"));
			return None;
		};

		if trimmed.chars().count() > max_len {
			self.push(field, format!("{field} must be at most {max_len} characters"));
			return None;
		}

		Some(trimmed.to_string())
	}

	/// Require a non-empty trimmed text field with no length cap.
	pub fn required(&mut self, field: &str, value: Option<&str>) -> Option<String> {
		let trimmed = value.map(str::trim).filter(|v| !v.is_empty());
		match trimmed {
			Some(v) => Some(v.to_string()),
			None => {
				self.push(field, format!("{field} is required"));
				None
			}
		}
	}

	/// Require a password-like field with a minimum length. Not trimmed.
	pub fn required_min(
		&mut self,
		field: &str,
		value: Option<&str>,
		min_len: usize,
	) -> Option<String> {
		let Some(value) = value.filter(|v| !v.is_empty()) else {
			self.push(field, format!("{field} is required"));
			return None;
		};

		if value.chars().count() < min_len {
			self.push(field, format!("{field} must be at least {min_len} characters"));
			return None;
		}

		Some(value.to_string())
	}

	/// Require a present value (for non-text fields like ids).
	pub fn required_value<T: Copy>(&mut self, field: &str, value: Option<T>) -> Option<T> {
		if value.is_none() {
			self.push(field, format!("{field} is required"));
		}
		value
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
		self.errors
	}

	fn push(&mut self, field: &str, message: String) {
		self.errors.entry(field.to_string()).or_default().push(message);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn required_text_accepts_and_trims() {
		let mut errors = FieldErrors::new();
		let value = errors.required_text("name", Some("  Acme  "), 50);
		assert_eq!(value.as_deref(), Some("Acme"));
		assert!(errors.is_empty());
	}

	#[test]
	fn required_text_rejects_missing_and_blank() {
		let mut errors = FieldErrors::new();
		assert!(errors.required_text("name", None, 50).is_none());
		assert!(errors.required_text("locale", Some("   "), 10).is_none());

		let map = errors.into_map();
		assert_eq!(map["name"], vec!["name is required"]);
		assert_eq!(map["locale"], vec!["locale is required"]);
	}

	#[test]
	fn required_text_rejects_overlong_values() {
		let mut errors = FieldErrors::new();
		let long = "x".repeat(51);
		assert!(errors.required_text("name", Some(&long), 50).is_none());
		assert_eq!(
			errors.into_map()["name"],
			vec!["name must be at most 50 characters"]
		);
	}

	#[test]
	fn checks_stop_at_the_first_failure_per_field() {
		// A missing value records only the requiredness error, not a length
		// error as well.
		let mut errors = FieldErrors::new();
		errors.required_text("name", None, 50);
		assert_eq!(errors.into_map()["name"].len(), 1);
	}

	#[test]
	fn required_min_enforces_minimum_length() {
		let mut errors = FieldErrors::new();
		assert!(errors.required_min("password", Some("short"), 8).is_none());
		assert!(FieldErrors::new()
			.required_min("password", Some("long enough"), 8)
			.is_some());
		assert_eq!(
			errors.into_map()["password"],
			vec!["password must be at least 8 characters"]
		);
	}

	#[test]
	fn passwords_are_not_trimmed() {
		let mut errors = FieldErrors::new();
		let value = errors.required_min("password", Some("  spaced  "), 8);
		assert_eq!(value.as_deref(), Some("  spaced  "));
	}

	#[test]
	fn required_value_handles_ids() {
		let mut errors = FieldErrors::new();
		assert_eq!(errors.required_value("language_id", Some(5i64)), Some(5));
		assert!(errors.required_value::<i64>("language_id", None).is_none());
		assert_eq!(
			errors.into_map()["language_id"],
			vec!["language_id is required"]
		);
	}
}
