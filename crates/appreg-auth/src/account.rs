// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use appreg_cli_credentials::{AccountCache, CachedAccount};
use appreg_core::Credential;
use chrono::Utc;
use tracing::{debug, warn};

use crate::claims::IdTokenClaims;
use crate::token_client::TokenResponse;

/// Who a token was issued to, when the response carries no `id_token`.
#[derive(Debug, Clone)]
pub(crate) struct KnownAccount {
	pub home_account_id: String,
	pub username: String,
	pub tenant_id: String,
}

/// Turns a token response into the session credential and records the
/// account (with its rotated refresh token) for later silent sign-in.
///
/// A cache write failure only costs the next session a prompt, so it is
/// logged and swallowed.
pub(crate) async fn accept_token(
	cache: &dyn AccountCache,
	client_id: &str,
	token: TokenResponse,
	fallback: Option<&KnownAccount>,
) -> Result<Credential, crate::AuthError> {
	let known = match (&token.id_token, fallback) {
		(Some(id_token), _) => {
			let claims = IdTokenClaims::decode(id_token)?;
			KnownAccount {
				home_account_id: claims.home_account_id(),
				username: claims.username().to_string(),
				tenant_id: claims.tid.clone(),
			}
		}
		(None, Some(known)) => known.clone(),
		(None, None) => {
			return Err(crate::AuthError::InvalidResponse(
				"token response has no id_token".to_string(),
			))
		}
	};

	if let Some(refresh_token) = token.refresh_token {
		let account = CachedAccount {
			home_account_id: known.home_account_id.clone(),
			username: known.username.clone(),
			tenant_id: known.tenant_id.clone(),
			refresh_token,
			last_used: Utc::now(),
		};
		match cache.save(client_id, &account).await {
			Ok(()) => debug!(username = %known.username, "cached account"),
			Err(e) => warn!(error = %e, "failed to cache account; next sign-in will prompt"),
		}
	}

	Ok(Credential::new(
		token.access_token,
		known.username,
		known.tenant_id,
	))
}
