// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator sign-in for appreg.
//!
//! [`Authenticator`] produces exactly one [`Credential`](appreg_core::Credential)
//! per session. It first tries [`SilentStrategy`], which redeems the refresh
//! token of the most recently used cached account. Only when that strategy
//! reports [`AuthError::InteractionRequired`] does it fall back to
//! [`InteractiveStrategy`], the OAuth device authorization grant. Any other
//! failure, and any failure of the interactive path, ends the session as
//! [`AuthError::Failed`].

mod account;
mod authenticator;
mod claims;
mod config;
mod error;
mod interactive;
mod silent;
mod token_client;

pub use authenticator::{AcquireCredential, Authenticator};
pub use claims::IdTokenClaims;
pub use config::{AuthConfig, DEFAULT_AUTHORITY, DEFAULT_CLIENT_ID, DEFAULT_LOGIN_BASE, GRAPH_SCOPES};
pub use error::AuthError;
pub use interactive::{ConsoleSignInPrompt, InteractiveStrategy, SignInPrompt};
pub use silent::SilentStrategy;
pub use token_client::{DeviceCodeResponse, TokenClient, TokenResponse};
