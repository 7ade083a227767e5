// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment and CLI flags.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::{workspace_config_path, PathsConfig};
use crate::sections::{
	BrowserPolicy, IdentityConfigLayer, LogFormat, LoggingConfigLayer, OutputConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 20,
	WorkspaceFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Resolved types fill every unset field.
		Ok(ConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
}

impl FileSource {
	pub fn new(path: impl Into<PathBuf>, precedence: Precedence) -> Self {
		Self {
			path: path.into(),
			precedence,
		}
	}

	pub fn user(paths: &PathsConfig) -> Self {
		Self::new(&paths.user_config_file, Precedence::UserFile)
	}

	pub fn workspace() -> Result<Self, ConfigError> {
		Ok(Self::new(workspace_config_path()?, Precedence::WorkspaceFile))
	}

	pub fn explicit(path: &Path) -> Self {
		Self::new(path, Precedence::ExplicitFile)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		match self.precedence {
			Precedence::UserFile => "user-config",
			Precedence::WorkspaceFile => "workspace-config",
			_ => "config-file",
		}
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: APPREG_<FIELD>, e.g. `APPREG_GRAPH_BASE`, `APPREG_LOG_LEVEL`.
pub struct EnvSource {
	vars: HashMap<String, String>,
}

impl EnvSource {
	pub fn from_process() -> Self {
		Self::from_vars(
			std::env::vars_os()
				.filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
				.filter(|(k, _)| k.starts_with("APPREG_")),
		)
	}

	pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	fn flag(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		self.var(name)
			.map(|v| match v.to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => Ok(true),
				"0" | "false" | "no" | "off" => Ok(false),
				_ => Err(ConfigError::invalid_value(
					name,
					format!("expected true or false, got '{v}'"),
				)),
			})
			.transpose()
	}

	fn var(&self, name: &str) -> Option<String> {
		self.vars.get(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!(count = self.vars.len(), "loading environment variables");
		let open_browser = self
			.var("APPREG_OPEN_BROWSER")
			.map(|v| v.parse::<BrowserPolicy>())
			.transpose()?;
		let format = self
			.var("APPREG_LOG_FORMAT")
			.map(|v| v.parse::<LogFormat>())
			.transpose()?;

		Ok(ConfigLayer {
			identity: Some(IdentityConfigLayer {
				client_id: self.var("APPREG_CLIENT_ID"),
				authority: self.var("APPREG_AUTHORITY"),
				login_base: self.var("APPREG_LOGIN_BASE"),
				graph_base: self.var("APPREG_GRAPH_BASE"),
				account_cache: self.var("APPREG_ACCOUNT_CACHE").map(PathBuf::from),
				remember_accounts: self.flag("APPREG_REMEMBER_ACCOUNTS")?,
			}),
			output: Some(OutputConfigLayer {
				summary_dir: self.var("APPREG_SUMMARY_DIR").map(PathBuf::from),
				open_browser,
			}),
			logging: Some(LoggingConfigLayer {
				level: self.var("APPREG_LOG_LEVEL"),
				format,
			}),
		})
	}
}

/// Values taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub log_level: Option<String>,
	pub json_logs: bool,
	pub summary_dir: Option<PathBuf>,
	pub no_browser: bool,
	pub remember_account: bool,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let cli = &self.overrides;
		Ok(ConfigLayer {
			identity: Some(IdentityConfigLayer {
				remember_accounts: cli.remember_account.then_some(true),
				..Default::default()
			}),
			output: Some(OutputConfigLayer {
				summary_dir: cli.summary_dir.clone(),
				open_browser: cli.no_browser.then_some(BrowserPolicy::Never),
			}),
			logging: Some(LoggingConfigLayer {
				level: cli.log_level.clone(),
				format: cli.json_logs.then_some(LogFormat::Json),
			}),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_file_is_empty_layer() {
		let dir = tempfile::tempdir().unwrap();
		let source = FileSource::new(dir.path().join("absent.toml"), Precedence::UserFile);
		assert_eq!(source.load().unwrap(), ConfigLayer::default());
		assert_eq!(source.name(), "user-config");
	}

	#[test]
	fn test_invalid_toml_names_the_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "[identity\nclient_id = 1").unwrap();

		let err = FileSource::explicit(&path).load().unwrap_err();
		match err {
			ConfigError::TomlParse { path: p, .. } => assert_eq!(p, path),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn test_env_source_reads_appreg_vars() {
		let source = EnvSource::from_vars([
			("APPREG_GRAPH_BASE", "https://graph.example/v1.0"),
			("APPREG_OPEN_BROWSER", "never"),
			("APPREG_LOG_FORMAT", "compact"),
			("APPREG_LOG_LEVEL", "  "),
		]);
		let layer = source.load().unwrap();

		assert_eq!(
			layer.identity.unwrap().graph_base.as_deref(),
			Some("https://graph.example/v1.0")
		);
		assert_eq!(layer.output.unwrap().open_browser, Some(BrowserPolicy::Never));
		let logging = layer.logging.unwrap();
		assert_eq!(logging.format, Some(LogFormat::Compact));
		assert!(logging.level.is_none());
	}

	#[test]
	fn test_env_source_reads_remember_flag() {
		let on = EnvSource::from_vars([("APPREG_REMEMBER_ACCOUNTS", "TRUE")]);
		assert_eq!(on.load().unwrap().identity.unwrap().remember_accounts, Some(true));

		let off = EnvSource::from_vars([("APPREG_REMEMBER_ACCOUNTS", "0")]);
		assert_eq!(off.load().unwrap().identity.unwrap().remember_accounts, Some(false));

		let bad = EnvSource::from_vars([("APPREG_REMEMBER_ACCOUNTS", "sometimes")]);
		assert!(matches!(bad.load(), Err(ConfigError::InvalidValue { .. })));
	}

	#[test]
	fn test_env_source_rejects_bad_enum() {
		let source = EnvSource::from_vars([("APPREG_OPEN_BROWSER", "maybe")]);
		assert!(matches!(
			source.load(),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn test_cli_flags_map_to_layer() {
		let layer = CliSource::new(CliOverrides {
			json_logs: true,
			no_browser: true,
			..Default::default()
		})
		.load()
		.unwrap();
		assert_eq!(layer.logging.unwrap().format, Some(LogFormat::Json));
		assert_eq!(layer.output.unwrap().open_browser, Some(BrowserPolicy::Never));
	}

	#[test]
	fn test_cli_without_flags_overrides_nothing() {
		let layer = CliSource::new(CliOverrides::default()).load().unwrap();
		let logging = layer.logging.unwrap();
		assert!(logging.level.is_none());
		assert!(logging.format.is_none());
		assert!(layer.identity.unwrap().remember_accounts.is_none());
	}

	#[test]
	fn test_cli_remember_account_opts_in() {
		let layer = CliSource::new(CliOverrides {
			remember_account: true,
			..Default::default()
		})
		.load()
		.unwrap();
		assert_eq!(layer.identity.unwrap().remember_accounts, Some(true));
	}
}
