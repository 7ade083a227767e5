// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Signed-in account cache for appreg.
//!
//! After an interactive sign-in the account and its refresh token are kept
//! here, keyed by the public client id, so the next session can acquire a
//! token silently.
//!
//! # Features
//!
//! - **AccountCache trait**: Abstract interface for cache backends
//! - **FileAccountCache**: JSON file storage with owner-only permissions
//! - **MemoryAccountCache**: Accounts held for one run only (the default)
//!
//! # Example
//!
//! ```
//! use appreg_cli_credentials::{AccountCache, CachedAccount, MemoryAccountCache};
//! use appreg_core::SecretString;
//!
//! # tokio_test::block_on(async {
//! let cache = MemoryAccountCache::new();
//! let account = CachedAccount {
//!     home_account_id: "uid.tid".to_string(),
//!     username: "ops@contoso.com".to_string(),
//!     tenant_id: "tid".to_string(),
//!     refresh_token: SecretString::new("rt"),
//!     last_used: chrono::Utc::now(),
//! };
//! cache.save("client-id", &account).await.unwrap();
//!
//! let accounts = cache.accounts("client-id").await.unwrap();
//! assert_eq!(accounts[0].username, "ops@contoso.com");
//! # });
//! ```

mod error;
mod store;
mod value;

pub use error::CredentialError;
pub use store::{AccountCache, FileAccountCache, MemoryAccountCache};
pub use value::{CachedAccount, PersistedAccount};
