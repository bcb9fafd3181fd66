// Copyright (c) 2025 lingua contributors. All rights reserved.
// SPDX-License-Identifier: MIT

//! Version information for the `version` subcommand.

/// Human-readable version line.
pub fn format_version_info() -> String {
	format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn version_line_names_the_binary() {
		let line = format_version_info();
		assert!(line.starts_with("lingua-server "));
	}
}
