// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Bound on establishing a connection. Whole requests are left to the
/// server's own limits; the session has no deadline of its own.
pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client used for the token endpoint and the directory API.
///
/// The User-Agent is `appreg/{version} ({os}-{arch})`, e.g.
/// `appreg/0.1.0 (linux-x86_64)`.
pub fn new_client() -> Client {
	builder().build().expect("failed to build HTTP client")
}

/// Builder carrying the appreg User-Agent and connect timeout.
pub(crate) fn builder() -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.connect_timeout(CONNECT_TIMEOUT)
}

pub(crate) fn user_agent() -> String {
	format!(
		"appreg/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_names_product_version_and_platform() {
		let ua = user_agent();
		assert_eq!(
			ua,
			format!(
				"appreg/{} ({}-{})",
				env!("CARGO_PKG_VERSION"),
				std::env::consts::OS,
				std::env::consts::ARCH
			)
		);
	}

	#[test]
	fn builder_accepts_further_settings() {
		assert!(builder().https_only(true).build().is_ok());
	}
}
