// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity provider and directory endpoints.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::paths::PathsConfig;

/// Well-known public client id of the Azure CLI.
pub const DEFAULT_CLIENT_ID: &str = "04b07795-8ddb-461a-bbee-02f9e1bf7b46";
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/common";
pub const DEFAULT_LOGIN_BASE: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IdentityConfigLayer {
	pub client_id: Option<String>,
	pub authority: Option<String>,
	pub login_base: Option<String>,
	pub graph_base: Option<String>,
	pub account_cache: Option<PathBuf>,
	pub remember_accounts: Option<bool>,
}

impl IdentityConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.client_id.is_some() {
			self.client_id = other.client_id;
		}
		if other.authority.is_some() {
			self.authority = other.authority;
		}
		if other.login_base.is_some() {
			self.login_base = other.login_base;
		}
		if other.graph_base.is_some() {
			self.graph_base = other.graph_base;
		}
		if other.account_cache.is_some() {
			self.account_cache = other.account_cache;
		}
		if other.remember_accounts.is_some() {
			self.remember_accounts = other.remember_accounts;
		}
	}

	pub fn finalize(self, paths: &PathsConfig) -> IdentityConfig {
		IdentityConfig {
			client_id: self.client_id.unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
			authority: self.authority.unwrap_or_else(|| DEFAULT_AUTHORITY.to_string()),
			login_base: self.login_base.unwrap_or_else(|| DEFAULT_LOGIN_BASE.to_string()),
			graph_base: self.graph_base.unwrap_or_else(|| DEFAULT_GRAPH_BASE.to_string()),
			account_cache: self.account_cache.unwrap_or_else(|| paths.account_cache_file()),
			remember_accounts: self.remember_accounts.unwrap_or(false),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
	pub client_id: String,
	/// Authority used for interactive sign-in.
	pub authority: String,
	/// Login host for tenant token requests and admin consent links.
	pub login_base: String,
	pub graph_base: String,
	/// Where signed-in accounts are kept when `remember_accounts` is set.
	pub account_cache: PathBuf,
	/// Keep the signed-in account on disk so later runs can sign in silently.
	/// Off by default: the account then lives only for the current run.
	pub remember_accounts: bool,
}
