// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use appreg_cli_credentials::AccountCache;
use appreg_core::Credential;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::account::{accept_token, KnownAccount};
use crate::authenticator::AcquireCredential;
use crate::error::{AuthError, INTERACTION_REQUIRED_CODES};
use crate::token_client::{TokenClient, TokenReply};

/// Sign-in without operator involvement, using the most recently used
/// cached account.
#[derive(Debug, Clone)]
pub struct SilentStrategy {
	client: TokenClient,
	cache: Arc<dyn AccountCache>,
}

impl SilentStrategy {
	pub fn new(client: TokenClient, cache: Arc<dyn AccountCache>) -> Self {
		Self { client, cache }
	}
}

#[async_trait]
impl AcquireCredential for SilentStrategy {
	#[instrument(skip_all)]
	async fn acquire(&self) -> Result<Credential, AuthError> {
		let client_id = self.client.config().client_id.clone();
		let accounts = match self.cache.accounts(&client_id).await {
			Ok(accounts) => accounts,
			Err(e) => {
				warn!(error = %e, "account cache unreadable");
				return Err(AuthError::InteractionRequired(format!(
					"account cache unreadable: {e}"
				)));
			}
		};

		let Some(account) = accounts.into_iter().next() else {
			debug!("no cached account");
			return Err(AuthError::InteractionRequired("no cached account".to_string()));
		};

		debug!(username = %account.username, tenant_id = %account.tenant_id, "trying cached account");
		let reply = self
			.client
			.redeem_refresh_token(&account.tenant_id, &account.refresh_token)
			.await?;

		match reply {
			TokenReply::Issued(token) => {
				let known = KnownAccount {
					home_account_id: account.home_account_id,
					username: account.username,
					tenant_id: account.tenant_id,
				};
				let credential =
					accept_token(self.cache.as_ref(), &client_id, token, Some(&known)).await?;
				info!(username = %credential.username(), "signed in silently");
				Ok(credential)
			}
			TokenReply::Rejected(error) if INTERACTION_REQUIRED_CODES.contains(&error.error.as_str()) => {
				debug!(code = %error.error, "cached account needs interaction");
				Err(AuthError::InteractionRequired(error.description()))
			}
			TokenReply::Rejected(error) => Err(AuthError::Endpoint {
				description: error.description(),
				code: error.error,
			}),
		}
	}
}
