// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing::debug;

use crate::error::ConfigError;
use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::AppregConfig;
use crate::sources::ConfigSource;
use crate::validation::validate;

/// Collects sources and merges them in precedence order.
#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		self.sources.push(source);
	}

	/// Merge every source, lowest precedence first. Sources of equal
	/// precedence apply in registration order.
	pub fn merged_layer(&self) -> Result<ConfigLayer, ConfigError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|s| s.precedence());

		let mut merged = ConfigLayer::default();
		for source in ordered {
			debug!(source = source.name(), "applying config source");
			merged.merge(source.load()?);
		}
		Ok(merged)
	}

	/// Merge, resolve and validate.
	pub fn load(&self, paths: &PathsConfig) -> Result<AppregConfig, ConfigError> {
		let config = AppregConfig::from_layer(self.merged_layer()?, paths);
		validate(&config)?;
		Ok(config)
	}
}
