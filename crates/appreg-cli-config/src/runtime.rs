// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::sections::{IdentityConfig, LoggingConfig, OutputConfig};

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppregConfig {
	pub identity: IdentityConfig,
	pub output: OutputConfig,
	pub logging: LoggingConfig,
}

impl AppregConfig {
	pub fn from_layer(layer: ConfigLayer, paths: &PathsConfig) -> Self {
		Self {
			identity: layer.identity.unwrap_or_default().finalize(paths),
			output: layer.output.unwrap_or_default().finalize(),
			logging: layer.logging.unwrap_or_default().finalize(),
		}
	}
}
