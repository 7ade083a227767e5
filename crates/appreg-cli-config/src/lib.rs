// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! appreg configuration.
//!
//! Settings come from built-in defaults, the user and workspace
//! `config.toml` files, an optional `--config` file, `APPREG_*` variables and
//! command-line flags, later sources overriding earlier ones per key. The
//! merged result is validated once, before sign-in.

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sections;
pub mod sources;
pub mod validation;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::AppregConfig;
pub use sections::{BrowserPolicy, IdentityConfig, LogFormat, LoggingConfig, OutputConfig};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration with CLI overrides.
///
/// An explicit `--config` file sits above the user and workspace files and
/// below the environment.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<AppregConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Ok(ws) = sources::FileSource::workspace() {
		registry.register(Box::new(ws));
	}
	if let Some(path) = &cli.config_file {
		registry.register(Box::new(sources::FileSource::explicit(path)));
	}
	registry.register(Box::new(sources::EnvSource::from_process()));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(&paths)
}
