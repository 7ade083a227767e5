// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::secret::SecretString;

/// Bearer credential for the signed-in operator.
///
/// Produced once per session by the authenticator and only read afterwards.
#[derive(Debug, Clone)]
pub struct Credential {
	access_token: SecretString,
	username: String,
	tenant_id: String,
}

impl Credential {
	pub fn new(
		access_token: SecretString,
		username: impl Into<String>,
		tenant_id: impl Into<String>,
	) -> Self {
		Self {
			access_token,
			username: username.into(),
			tenant_id: tenant_id.into(),
		}
	}

	pub fn access_token(&self) -> &SecretString {
		&self.access_token
	}

	pub fn username(&self) -> &str {
		&self.username
	}

	pub fn tenant_id(&self) -> &str {
		&self.tenant_id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_does_not_leak_token() {
		let credential = Credential::new(SecretString::new("at-xyz"), "ops@contoso.com", "tid-1");
		let debug = format!("{credential:?}");
		assert!(!debug.contains("at-xyz"));
		assert!(debug.contains("ops@contoso.com"));
		assert_eq!(credential.access_token().expose(), "at-xyz");
	}
}
