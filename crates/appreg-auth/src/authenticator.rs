// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use appreg_cli_credentials::AccountCache;
use appreg_core::Credential;
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::interactive::{InteractiveStrategy, SignInPrompt};
use crate::silent::SilentStrategy;
use crate::token_client::TokenClient;

/// Something that can produce the operator's credential.
#[async_trait]
pub trait AcquireCredential: Send + Sync {
	async fn acquire(&self) -> Result<Credential, AuthError>;
}

/// Silent-then-interactive sign-in.
pub struct Authenticator {
	silent: Box<dyn AcquireCredential>,
	interactive: Box<dyn AcquireCredential>,
}

impl Authenticator {
	pub fn new(silent: Box<dyn AcquireCredential>, interactive: Box<dyn AcquireCredential>) -> Self {
		Self {
			silent,
			interactive,
		}
	}

	/// Wires the refresh-token and device-code strategies against the
	/// identity endpoints in `config`.
	pub fn from_config(
		config: AuthConfig,
		cache: Arc<dyn AccountCache>,
		prompt: Box<dyn SignInPrompt>,
	) -> Self {
		let client = TokenClient::new(config);
		Self::new(
			Box::new(SilentStrategy::new(client.clone(), cache.clone())),
			Box::new(InteractiveStrategy::new(client, cache, prompt)),
		)
	}
}

#[async_trait]
impl AcquireCredential for Authenticator {
	#[instrument(skip_all)]
	async fn acquire(&self) -> Result<Credential, AuthError> {
		match self.silent.acquire().await {
			Ok(credential) => Ok(credential),
			Err(AuthError::InteractionRequired(reason)) => {
				info!(reason = %reason, "silent sign-in unavailable, prompting operator");
				self.interactive.acquire().await.map_err(AuthError::failed)
			}
			Err(other) => Err(AuthError::failed(other)),
		}
	}
}
