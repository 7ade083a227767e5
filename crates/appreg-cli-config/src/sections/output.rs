// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Whether to open the admin consent link in a browser after provisioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserPolicy {
	/// Ask the operator.
	#[default]
	Ask,
	Always,
	Never,
}

impl FromStr for BrowserPolicy {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"ask" => Ok(Self::Ask),
			"always" => Ok(Self::Always),
			"never" => Ok(Self::Never),
			other => Err(ConfigError::invalid_value(
				"output.open_browser",
				format!("expected ask, always or never, got '{other}'"),
			)),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfigLayer {
	pub summary_dir: Option<PathBuf>,
	pub open_browser: Option<BrowserPolicy>,
}

impl OutputConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.summary_dir.is_some() {
			self.summary_dir = other.summary_dir;
		}
		if other.open_browser.is_some() {
			self.open_browser = other.open_browser;
		}
	}

	pub fn finalize(self) -> OutputConfig {
		OutputConfig {
			summary_dir: self.summary_dir.unwrap_or_else(|| PathBuf::from(".")),
			open_browser: self.open_browser.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
	/// Directory the `{name}.txt` summary is written to.
	pub summary_dir: PathBuf,
	pub open_browser: BrowserPolicy,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_browser_policy_parse() {
		assert_eq!("Always".parse::<BrowserPolicy>().unwrap(), BrowserPolicy::Always);
		assert_eq!(" never ".parse::<BrowserPolicy>().unwrap(), BrowserPolicy::Never);
		assert!("sometimes".parse::<BrowserPolicy>().is_err());
	}

	#[test]
	fn test_deserialize_lowercase() {
		let layer: OutputConfigLayer =
			toml::from_str("open_browser = \"never\"\nsummary_dir = \"/tmp/out\"").unwrap();
		assert_eq!(layer.open_browser, Some(BrowserPolicy::Never));
		assert_eq!(layer.summary_dir, Some(PathBuf::from("/tmp/out")));
	}

	#[test]
	fn test_finalize_defaults_to_current_dir_and_ask() {
		let config = OutputConfigLayer::default().finalize();
		assert_eq!(config.summary_dir, PathBuf::from("."));
		assert_eq!(config.open_browser, BrowserPolicy::Ask);
	}
}
