// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cached account types.

use appreg_core::SecretString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk account representation (JSON serializable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedAccount {
	pub home_account_id: String,
	pub username: String,
	pub tenant_id: String,
	pub refresh_token: String,
	pub last_used: DateTime<Utc>,
}

/// Runtime account representation; the refresh token stays redacted.
#[derive(Debug, Clone)]
pub struct CachedAccount {
	pub home_account_id: String,
	pub username: String,
	pub tenant_id: String,
	pub refresh_token: SecretString,
	pub last_used: DateTime<Utc>,
}

impl From<PersistedAccount> for CachedAccount {
	fn from(persisted: PersistedAccount) -> Self {
		Self {
			home_account_id: persisted.home_account_id,
			username: persisted.username,
			tenant_id: persisted.tenant_id,
			refresh_token: SecretString::new(persisted.refresh_token),
			last_used: persisted.last_used,
		}
	}
}

impl From<&CachedAccount> for PersistedAccount {
	fn from(account: &CachedAccount) -> Self {
		Self {
			home_account_id: account.home_account_id.clone(),
			username: account.username.clone(),
			tenant_id: account.tenant_id.clone(),
			refresh_token: account.refresh_token.expose().to_string(),
			last_used: account.last_used,
		}
	}
}
