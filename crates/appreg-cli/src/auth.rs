// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use anyhow::{Context, Result};
use appreg_auth::{AuthConfig, Authenticator, ConsoleSignInPrompt, GRAPH_SCOPES};
use appreg_cli_config::{AppregConfig, BrowserPolicy, IdentityConfig};
use appreg_cli_credentials::{AccountCache, FileAccountCache, MemoryAccountCache};
use tracing::{info, instrument};

pub fn auth_config(identity: &IdentityConfig) -> AuthConfig {
	AuthConfig {
		client_id: identity.client_id.clone(),
		authority: identity.authority.clone(),
		login_base: identity.login_base.clone(),
		scopes: GRAPH_SCOPES.to_string(),
	}
}

/// The on-disk cache when the operator opted in with `remember_accounts`,
/// otherwise one that is dropped with the process.
pub fn account_cache(identity: &IdentityConfig) -> Arc<dyn AccountCache> {
	if identity.remember_accounts {
		Arc::new(FileAccountCache::new(&identity.account_cache))
	} else {
		Arc::new(MemoryAccountCache::new())
	}
}

/// Silent-then-device-code sign-in backed by [`account_cache`].
pub fn build_authenticator(config: &AppregConfig) -> Authenticator {
	let prompt = ConsoleSignInPrompt {
		open_browser: config.output.open_browser != BrowserPolicy::Never,
	};
	Authenticator::from_config(
		auth_config(&config.identity),
		account_cache(&config.identity),
		Box::new(prompt),
	)
}

/// Forget every account remembered on disk for the configured client.
#[instrument(skip_all, fields(cache = %identity.account_cache.display()))]
pub async fn logout(identity: &IdentityConfig) -> Result<()> {
	FileAccountCache::new(&identity.account_cache)
		.clear(&identity.client_id)
		.await
		.context("failed to clear cached accounts")?;
	info!("logout complete");
	eprintln!("Signed out. Cached accounts removed.");
	Ok(())
}
