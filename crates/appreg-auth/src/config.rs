// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Well-known public client id of the Azure CLI, usable without registering
/// an application first.
pub const DEFAULT_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";

pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";

pub const DEFAULT_LOGIN_BASE: &str = "https://login.microsoftonline.com";

/// Graph access plus a refresh token and id token for the account cache.
pub const GRAPH_SCOPES: &str = "https://graph.microsoft.com/.default offline_access openid profile";

/// Identity endpoints and client used for operator sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
	pub client_id: String,
	/// Authority for the interactive device-code flow.
	pub authority: String,
	/// Host used for tenant-specific refresh token redemption.
	pub login_base: String,
	pub scopes: String,
}

impl AuthConfig {
	pub fn device_code_url(&self) -> String {
		format!("{}/oauth2/v2.0/devicecode", self.authority.trim_end_matches('/'))
	}

	pub fn device_token_url(&self) -> String {
		format!("{}/oauth2/v2.0/token", self.authority.trim_end_matches('/'))
	}

	pub fn tenant_token_url(&self, tenant_id: &str) -> String {
		format!(
			"{}/{tenant_id}/oauth2/v2.0/token",
			self.login_base.trim_end_matches('/')
		)
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			client_id: DEFAULT_CLIENT_ID.to_string(),
			authority: DEFAULT_AUTHORITY.to_string(),
			login_base: DEFAULT_LOGIN_BASE.to_string(),
			scopes: GRAPH_SCOPES.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_urls() {
		let config = AuthConfig::default();
		assert_eq!(
			config.device_code_url(),
			"https://login.microsoftonline.com/common/oauth2/v2.0/devicecode"
		);
		assert_eq!(
			config.device_token_url(),
			"https://login.microsoftonline.com/common/oauth2/v2.0/token"
		);
		assert_eq!(
			config.tenant_token_url("tid-1"),
			"https://login.microsoftonline.com/tid-1/oauth2/v2.0/token"
		);
	}

	#[test]
	fn trailing_slashes_are_ignored() {
		let config = AuthConfig {
			authority: "https://login.example/organizations/".to_string(),
			login_base: "https://login.example/".to_string(),
			..AuthConfig::default()
		};
		assert_eq!(
			config.device_code_url(),
			"https://login.example/organizations/oauth2/v2.0/devicecode"
		);
		assert_eq!(
			config.tenant_token_url("t"),
			"https://login.example/t/oauth2/v2.0/token"
		);
	}
}
