// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where appreg looks for its config file and keeps its account cache.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_DIR: &str = "appreg";
const CONFIG_FILE: &str = "config.toml";
const ACCOUNT_CACHE_FILE: &str = "accounts.json";
const WORKSPACE_DIR: &str = ".appreg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// `$XDG_CONFIG_HOME/appreg/config.toml`
	pub user_config_file: PathBuf,
	/// `$XDG_CACHE_HOME/appreg`
	pub cache_dir: PathBuf,
}

impl PathsConfig {
	fn under(config_home: &Path, cache_home: &Path) -> Self {
		Self {
			user_config_file: config_home.join(APP_DIR).join(CONFIG_FILE),
			cache_dir: cache_home.join(APP_DIR),
		}
	}

	/// Default location of the signed-in account cache.
	pub fn account_cache_file(&self) -> PathBuf {
		self.cache_dir.join(ACCOUNT_CACHE_FILE)
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self::under(Path::new("~/.config"), Path::new("~/.cache"))
	}
}

/// XDG locations from the process environment and home directory.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
	let paths = paths_from(&home, |key| std::env::var_os(key));
	tracing::debug!(
		user_config_file = %paths.user_config_file.display(),
		cache_dir = %paths.cache_dir.display(),
		"resolved XDG paths"
	);
	Ok(paths)
}

/// Empty or relative XDG variables are ignored, as the base directory rules
/// require.
fn paths_from(home: &Path, var: impl Fn(&str) -> Option<OsString>) -> PathsConfig {
	let base = |key: &str, fallback: &str| {
		var(key)
			.map(PathBuf::from)
			.filter(|p| p.is_absolute())
			.unwrap_or_else(|| home.join(fallback))
	};
	PathsConfig::under(
		&base("XDG_CONFIG_HOME", ".config"),
		&base("XDG_CACHE_HOME", ".cache"),
	)
}

/// `./.appreg/config.toml` relative to the current directory.
pub fn workspace_config_path() -> Result<PathBuf, ConfigError> {
	Ok(std::env::current_dir()?.join(WORKSPACE_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_xdg_variables_take_priority() {
		let paths = paths_from(Path::new("/home/ops"), |key| match key {
			"XDG_CONFIG_HOME" => Some("/cfg".into()),
			"XDG_CACHE_HOME" => Some("/var/cache/ops".into()),
			_ => None,
		});
		assert_eq!(paths.user_config_file, PathBuf::from("/cfg/appreg/config.toml"));
		assert_eq!(
			paths.account_cache_file(),
			PathBuf::from("/var/cache/ops/appreg/accounts.json")
		);
	}

	#[test]
	fn test_home_fallback_when_unset_or_relative() {
		let paths = paths_from(Path::new("/home/ops"), |key| match key {
			"XDG_CACHE_HOME" => Some("relative/cache".into()),
			_ => None,
		});
		assert_eq!(
			paths.user_config_file,
			PathBuf::from("/home/ops/.config/appreg/config.toml")
		);
		assert_eq!(paths.cache_dir, PathBuf::from("/home/ops/.cache/appreg"));
	}

	#[test]
	fn test_workspace_config_path() {
		let path = workspace_config_path().unwrap();
		assert!(path.ends_with(".appreg/config.toml"));
	}
}
