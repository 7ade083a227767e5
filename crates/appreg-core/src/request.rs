// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The operator's provisioning request and the rules applied to each raw
//! input field.

use url::Url;

use crate::error::RequestError;

/// Display name used when the operator leaves the name blank.
pub const DEFAULT_APPLICATION_NAME: &str = "Easy2PatchProd";

/// Secret lifetime used when the operator input is missing or unusable.
pub const DEFAULT_SECRET_VALIDITY_DAYS: u32 = 730;

/// Route every accepted redirect URI must contain.
pub const REDIRECT_CALLBACK_FRAGMENT: &str = "/#/auth/azuread/";

/// Fully validated input for one provisioning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
	name: String,
	redirect_uri: String,
	secret_validity_days: u32,
}

impl ProvisioningRequest {
	/// Build a request, applying the same rules as the interactive prompts.
	pub fn new(
		name: impl Into<String>,
		redirect_uri: &str,
		secret_validity_days: u32,
	) -> Result<Self, RequestError> {
		let name = name.into().trim().to_string();
		if name.is_empty() {
			return Err(RequestError::EmptyName);
		}
		if secret_validity_days == 0 {
			return Err(RequestError::NonPositiveValidity(0));
		}
		let redirect_uri = validate_redirect_uri(redirect_uri)?;
		Ok(Self {
			name,
			redirect_uri,
			secret_validity_days,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn redirect_uri(&self) -> &str {
		&self.redirect_uri
	}

	pub fn secret_validity_days(&self) -> u32 {
		self.secret_validity_days
	}
}

/// Blank input selects [`DEFAULT_APPLICATION_NAME`]; anything else is trimmed.
pub fn resolve_application_name(raw: &str) -> String {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		DEFAULT_APPLICATION_NAME.to_string()
	} else {
		trimmed.to_string()
	}
}

/// Accept only absolute URIs that contain [`REDIRECT_CALLBACK_FRAGMENT`].
///
/// Returns the trimmed URI on success.
pub fn validate_redirect_uri(raw: &str) -> Result<String, RequestError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(RequestError::MissingRedirectUri);
	}
	if Url::parse(trimmed).is_err() {
		return Err(RequestError::NotAbsolute(trimmed.to_string()));
	}
	if !trimmed.contains(REDIRECT_CALLBACK_FRAGMENT) {
		return Err(RequestError::MissingCallbackRoute {
			value: trimmed.to_string(),
			fragment: REDIRECT_CALLBACK_FRAGMENT,
		});
	}
	Ok(trimmed.to_string())
}

/// Parse a positive 32-bit day count, quietly falling back to
/// [`DEFAULT_SECRET_VALIDITY_DAYS`] for anything else.
pub fn resolve_secret_validity_days(raw: &str) -> u32 {
	match raw.trim().parse::<i32>() {
		Ok(days) if days > 0 => days as u32,
		_ => DEFAULT_SECRET_VALIDITY_DAYS,
	}
}
