// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Thin client for the identity provider's OAuth 2.0 endpoints.

use appreg_core::SecretString;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

#[derive(Deserialize)]
pub struct TokenResponse {
	pub access_token: SecretString,
	#[serde(default)]
	pub refresh_token: Option<SecretString>,
	#[serde(default)]
	pub id_token: Option<String>,
	#[serde(default)]
	pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenResponse")
			.field("access_token", &self.access_token)
			.field("refresh_token", &self.refresh_token)
			.field("has_id_token", &self.id_token.is_some())
			.field("expires_in", &self.expires_in)
			.finish()
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCodeResponse {
	pub device_code: String,
	pub user_code: String,
	pub verification_uri: String,
	pub expires_in: u64,
	#[serde(default = "default_poll_interval")]
	pub interval: u64,
	#[serde(default)]
	pub message: Option<String>,
}

fn default_poll_interval() -> u64 {
	5
}

#[derive(Debug, Deserialize)]
pub(crate) struct OAuthErrorBody {
	pub error: String,
	#[serde(default)]
	pub error_description: Option<String>,
}

impl OAuthErrorBody {
	pub fn description(&self) -> String {
		self.error_description.clone().unwrap_or_else(|| self.error.clone())
	}
}

/// Outcome of a token request that reached the endpoint.
#[derive(Debug)]
pub(crate) enum TokenReply {
	Issued(TokenResponse),
	Rejected(OAuthErrorBody),
}

#[derive(Debug, Clone)]
pub struct TokenClient {
	http: Client,
	config: AuthConfig,
}

impl TokenClient {
	pub fn new(config: AuthConfig) -> Self {
		Self::with_http_client(appreg_common_http::new_client(), config)
	}

	pub fn with_http_client(http: Client, config: AuthConfig) -> Self {
		Self { http, config }
	}

	pub fn config(&self) -> &AuthConfig {
		&self.config
	}

	#[instrument(skip_all, fields(tenant_id = %tenant_id))]
	pub(crate) async fn redeem_refresh_token(
		&self,
		tenant_id: &str,
		refresh_token: &SecretString,
	) -> Result<TokenReply, AuthError> {
		let url = self.config.tenant_token_url(tenant_id);
		debug!(url = %url, "redeeming refresh token");
		self.post_token_form(
			&url,
			&[
				("client_id", self.config.client_id.as_str()),
				("grant_type", "refresh_token"),
				("refresh_token", refresh_token.expose()),
				("scope", self.config.scopes.as_str()),
			],
		)
		.await
	}

	#[instrument(skip_all)]
	pub(crate) async fn start_device_code(&self) -> Result<DeviceCodeResponse, AuthError> {
		let url = self.config.device_code_url();
		debug!(url = %url, "starting device code flow");
		let resp = self
			.http
			.post(&url)
			.form(&[
				("client_id", self.config.client_id.as_str()),
				("scope", self.config.scopes.as_str()),
			])
			.send()
			.await?;

		let status = resp.status();
		let body = resp.text().await?;
		if !status.is_success() {
			warn!(status = %status, "device code request failed");
			return Err(rejection(status, &body));
		}

		serde_json::from_str(&body)
			.map_err(|e| AuthError::InvalidResponse(format!("device code response: {e}")))
	}

	pub(crate) async fn poll_device_code(&self, device_code: &str) -> Result<TokenReply, AuthError> {
		let url = self.config.device_token_url();
		self.post_token_form(
			&url,
			&[
				("client_id", self.config.client_id.as_str()),
				("grant_type", DEVICE_CODE_GRANT),
				("device_code", device_code),
			],
		)
		.await
	}

	async fn post_token_form(
		&self,
		url: &str,
		form: &[(&str, &str)],
	) -> Result<TokenReply, AuthError> {
		let resp = self.http.post(url).form(form).send().await?;
		let status = resp.status();
		let body = resp.text().await?;

		if status.is_success() {
			let token: TokenResponse = serde_json::from_str(&body)
				.map_err(|e| AuthError::InvalidResponse(format!("token response: {e}")))?;
			return Ok(TokenReply::Issued(token));
		}

		match serde_json::from_str::<OAuthErrorBody>(&body) {
			Ok(error) => {
				debug!(status = %status, error = %error.error, "token endpoint returned an OAuth error");
				Ok(TokenReply::Rejected(error))
			}
			Err(_) => Err(rejection(status, &body)),
		}
	}
}

fn rejection(status: reqwest::StatusCode, body: &str) -> AuthError {
	match serde_json::from_str::<OAuthErrorBody>(body) {
		Ok(error) => AuthError::Endpoint {
			description: error.description(),
			code: error.error,
		},
		Err(_) => AuthError::Endpoint {
			code: status.as_u16().to_string(),
			description: body.to_string(),
		},
	}
}
