// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin consent link.

/// Issuer that hosts the tenant-wide admin consent endpoint.
pub const DEFAULT_ISSUER_BASE: &str = "https://login.microsoftonline.com";

/// `https://login.microsoftonline.com/{tenant_id}/adminconsent?client_id={app_id}`
pub fn admin_consent_url(app_id: &str, tenant_id: &str) -> String {
	admin_consent_url_with_base(DEFAULT_ISSUER_BASE, app_id, tenant_id)
}

/// Same as [`admin_consent_url`] against another issuer (sovereign clouds).
pub fn admin_consent_url_with_base(issuer_base: &str, app_id: &str, tenant_id: &str) -> String {
	let base = issuer_base.trim_end_matches('/');
	format!("{base}/{tenant_id}/adminconsent?client_id={app_id}")
}
