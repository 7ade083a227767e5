// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use url::Url;
use uuid::Uuid;

use crate::error::ConfigError;
use crate::runtime::AppregConfig;
use crate::sections::LoggingConfig;

pub fn validate(config: &AppregConfig) -> Result<(), ConfigError> {
	let identity = &config.identity;
	if Uuid::parse_str(&identity.client_id).is_err() {
		return Err(ConfigError::invalid_value(
			"identity.client_id",
			format!("'{}' is not a UUID", identity.client_id),
		));
	}
	validate_http_url("identity.authority", &identity.authority)?;
	validate_http_url("identity.login_base", &identity.login_base)?;
	validate_http_url("identity.graph_base", &identity.graph_base)?;

	if !LoggingConfig::is_known_level(&config.logging.level) {
		return Err(ConfigError::invalid_value(
			"logging.level",
			format!("unknown level '{}'", config.logging.level),
		));
	}

	Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
	let url = Url::parse(value)
		.map_err(|e| ConfigError::invalid_value(field, format!("'{value}': {e}")))?;
	match url.scheme() {
		"http" | "https" => Ok(()),
		other => Err(ConfigError::invalid_value(
			field,
			format!("unsupported scheme '{other}'"),
		)),
	}
}
