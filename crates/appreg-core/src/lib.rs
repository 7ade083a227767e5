// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core domain for appreg.
//!
//! This crate provides:
//! - The compiled-in permission catalog attached to every new registration
//! - The operator request and its validation rules
//! - Identity and directory value types shared by the auth, graph and
//!   provisioning crates
//! - The admin consent link builder

pub mod application;
pub mod catalog;
pub mod consent;
pub mod credential;
pub mod error;
pub mod request;
pub mod secret;

pub use application::{ApplicationRecord, ClientSecret};
pub use catalog::{
	catalog, flatten_grants, GrantEntry, GrantKind, PermissionGrant, ResourceGroup,
	MICROSOFT_GRAPH_APP_ID, WINDOWS_DEFENDER_ATP_APP_ID,
};
pub use consent::{admin_consent_url, admin_consent_url_with_base, DEFAULT_ISSUER_BASE};
pub use credential::Credential;
pub use error::RequestError;
pub use request::{
	resolve_application_name, resolve_secret_validity_days, validate_redirect_uri,
	ProvisioningRequest, DEFAULT_APPLICATION_NAME, DEFAULT_SECRET_VALIDITY_DAYS,
	REDIRECT_CALLBACK_FRAGMENT,
};
pub use secret::{SecretString, REDACTED};
