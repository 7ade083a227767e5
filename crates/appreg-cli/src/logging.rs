// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_cli_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Targets match by prefix, so
/// `appreg` covers every `appreg_*` crate.
pub fn default_filter(level: &str) -> String {
	format!("warn,appreg={level}")
}

/// Install the global subscriber. Logs go to stderr; stdout is the console.
pub fn init_tracing(config: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

	let registry = tracing_subscriber::registry().with(filter);
	let result = match config.format {
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.try_init(),
		LogFormat::Compact => registry
			.with(
				tracing_subscriber::fmt::layer()
					.compact()
					.with_writer(std::io::stderr),
			)
			.try_init(),
		LogFormat::Pretty => registry
			.with(
				tracing_subscriber::fmt::layer()
					.pretty()
					.with_writer(std::io::stderr),
			)
			.try_init(),
	};

	if let Err(e) = result {
		eprintln!("failed to initialise logging: {e}");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_filter_parses() {
		let filter = default_filter("debug");
		assert_eq!(filter, "warn,appreg=debug");
		assert!(EnvFilter::try_new(filter).is_ok());
	}
}
