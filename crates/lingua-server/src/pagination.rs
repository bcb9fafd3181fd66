// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Shared list-query parameters for API handlers.
//!
//! Lists are paginated at a fixed page size with 1-based page numbers; page
//! values below 2 read the first page. An optional `search` term filters on
//! the resource's display field.

/// Rows per page for every list endpoint.
pub const PAGE_SIZE: i64 = 25;

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ListParams {
	pub search: Option<String>,
	pub page: Option<i64>,
}

impl ListParams {
	pub fn limit(&self) -> i64 {
		PAGE_SIZE
	}

	/// Rows to skip: `(page - 1) * PAGE_SIZE`, with page <= 1 reading page 1.
	pub fn offset(&self) -> i64 {
		match self.page {
			Some(page) if page >= 2 => (page - 1) * PAGE_SIZE,
			_ => 0,
		}
	}

	/// The search term, if it carries any content.
	pub fn search(&self) -> Option<&str> {
		self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_page_reads_first_page() {
		let params = ListParams::default();
		assert_eq!(params.offset(), 0);
		assert_eq!(params.limit(), PAGE_SIZE);
	}

	#[test]
	fn low_pages_clamp_to_first_page() {
		for page in [-3, 0, 1] {
			let params = ListParams {
				page: Some(page),
				..Default::default()
			};
			assert_eq!(params.offset(), 0, "page {page}");
		}
	}

	#[test]
	fn page_n_skips_preceding_pages() {
		let params = ListParams {
			page: Some(3),
			..Default::default()
		};
		assert_eq!(params.offset(), 2 * PAGE_SIZE);
	}

	#[test]
	fn blank_search_is_ignored() {
		let params = ListParams {
			search: Some("   ".to_string()),
			..Default::default()
		};
		assert_eq!(params.search(), None);

		let params = ListParams {
			search: Some(" greeting ".to_string()),
			..Default::default()
		};
		assert_eq!(params.search(), Some("greeting"));
	}
}
