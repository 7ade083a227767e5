// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Interactive sign-in via the OAuth 2.0 device authorization grant.

use std::sync::Arc;
use std::time::{Duration, Instant};

use appreg_cli_credentials::AccountCache;
use appreg_core::Credential;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::account::accept_token;
use crate::authenticator::AcquireCredential;
use crate::error::AuthError;
use crate::token_client::{DeviceCodeResponse, TokenClient, TokenReply};

/// Extra wait requested by the endpoint on `slow_down`, per RFC 8628.
const SLOW_DOWN_STEP: Duration = Duration::from_secs(5);

/// Upper bound on how long the operator is given to sign in, whatever
/// `expires_in` the endpoint announces.
const MAX_SIGN_IN_WINDOW: Duration = Duration::from_secs(60 * 60);

/// Upper bound on the wait between polls.
const MAX_POLL_INTERVAL: Duration = Duration::from_secs(60);

fn sign_in_deadline(now: Instant, expires_in_secs: u64) -> Instant {
	let window = Duration::from_secs(expires_in_secs).min(MAX_SIGN_IN_WINDOW);
	now.checked_add(window).unwrap_or(now)
}

fn poll_interval(secs: u64) -> Duration {
	Duration::from_secs(secs).min(MAX_POLL_INTERVAL)
}

/// Presents the device code to the operator.
pub trait SignInPrompt: Send + Sync {
	fn show(&self, device: &DeviceCodeResponse);
}

/// Writes sign-in instructions to stderr and, optionally, opens the
/// verification page in the default browser.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSignInPrompt {
	pub open_browser: bool,
}

impl SignInPrompt for ConsoleSignInPrompt {
	fn show(&self, device: &DeviceCodeResponse) {
		eprintln!();
		match &device.message {
			Some(message) => eprintln!("{message}"),
			None => {
				eprintln!("To sign in, open {} in your browser", device.verification_uri);
				eprintln!("and enter the code: {}", device.user_code);
			}
		}
		eprintln!();

		if self.open_browser {
			if let Err(e) = webbrowser::open(&device.verification_uri) {
				debug!(error = %e, "could not open browser for sign-in");
			}
		}

		eprintln!("Waiting for sign-in...");
	}
}

pub struct InteractiveStrategy {
	client: TokenClient,
	cache: Arc<dyn AccountCache>,
	prompt: Box<dyn SignInPrompt>,
}

impl InteractiveStrategy {
	pub fn new(
		client: TokenClient,
		cache: Arc<dyn AccountCache>,
		prompt: Box<dyn SignInPrompt>,
	) -> Self {
		Self {
			client,
			cache,
			prompt,
		}
	}
}

impl std::fmt::Debug for InteractiveStrategy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("InteractiveStrategy")
			.field("client", &self.client)
			.field("cache", &self.cache)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl AcquireCredential for InteractiveStrategy {
	#[instrument(skip_all)]
	async fn acquire(&self) -> Result<Credential, AuthError> {
		let device = self.client.start_device_code().await?;
		self.prompt.show(&device);

		let deadline = sign_in_deadline(Instant::now(), device.expires_in);
		let mut interval = poll_interval(device.interval);

		loop {
			if Instant::now() >= deadline {
				warn!("device code expired");
				return Err(AuthError::DeviceCodeExpired);
			}

			tokio::time::sleep(interval).await;

			match self.client.poll_device_code(&device.device_code).await? {
				TokenReply::Issued(token) => {
					let client_id = &self.client.config().client_id;
					let credential = accept_token(self.cache.as_ref(), client_id, token, None).await?;
					info!(username = %credential.username(), "signed in interactively");
					return Ok(credential);
				}
				TokenReply::Rejected(error) => match error.error.as_str() {
					"authorization_pending" => {
						debug!("authorization pending");
					}
					"slow_down" => {
						interval = (interval + SLOW_DOWN_STEP).min(MAX_POLL_INTERVAL);
						debug!(interval_secs = interval.as_secs(), "slowing down polling");
					}
					"authorization_declined" | "access_denied" => return Err(AuthError::Declined),
					"expired_token" => return Err(AuthError::DeviceCodeExpired),
					_ => {
						return Err(AuthError::Endpoint {
							description: error.description(),
							code: error.error,
						})
					}
				},
			}
		}
	}
}
