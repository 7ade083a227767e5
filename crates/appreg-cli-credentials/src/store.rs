// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account cache backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::CredentialError;
use crate::value::{CachedAccount, PersistedAccount};

/// On-disk cache format: accounts per public client id.
pub type PersistedAccountCache = HashMap<String, Vec<PersistedAccount>>;

/// Trait for account cache backends.
#[async_trait]
pub trait AccountCache: Send + Sync + std::fmt::Debug {
	/// Accounts cached for a client, most recently used first.
	async fn accounts(&self, client_id: &str) -> Result<Vec<CachedAccount>, CredentialError>;

	/// Insert or replace an account (matched on `home_account_id`).
	async fn save(&self, client_id: &str, account: &CachedAccount) -> Result<(), CredentialError>;

	/// Forget every account cached for a client.
	async fn clear(&self, client_id: &str) -> Result<(), CredentialError>;
}

fn sort_most_recent_first(accounts: &mut [CachedAccount]) {
	accounts.sort_by(|a, b| b.last_used.cmp(&a.last_used));
}

/// File-based account cache with JSON format.
///
/// The file holds refresh tokens, so it is written with 0600 permissions on Unix.
#[derive(Debug, Clone)]
pub struct FileAccountCache {
	path: PathBuf,
}

impl FileAccountCache {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn read_cache(&self) -> Result<PersistedAccountCache, CredentialError> {
		if !self.path.exists() {
			return Ok(HashMap::new());
		}

		let contents = fs::read_to_string(&self.path).await?;
		let cache: PersistedAccountCache = serde_json::from_str(&contents)?;
		Ok(cache)
	}

	async fn write_cache(&self, cache: &PersistedAccountCache) -> Result<(), CredentialError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let contents = serde_json::to_string_pretty(cache)?;

		let temp_path = self.path.with_extension("tmp");
		let mut file = fs::File::create(&temp_path).await?;
		file.write_all(contents.as_bytes()).await?;
		file.sync_all().await?;
		drop(file);

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			let perms = std::fs::Permissions::from_mode(0o600);
			if let Err(e) = std::fs::set_permissions(&temp_path, perms) {
				warn!(path = ?temp_path, error = %e, "failed to set account cache permissions to 0600");
			}
		}

		fs::rename(&temp_path, &self.path).await?;

		debug!(path = ?self.path, "account cache written");
		Ok(())
	}
}

#[async_trait]
impl AccountCache for FileAccountCache {
	async fn accounts(&self, client_id: &str) -> Result<Vec<CachedAccount>, CredentialError> {
		let cache = self.read_cache().await?;
		let mut accounts: Vec<CachedAccount> = cache
			.get(client_id)
			.cloned()
			.unwrap_or_default()
			.into_iter()
			.map(CachedAccount::from)
			.collect();
		sort_most_recent_first(&mut accounts);
		Ok(accounts)
	}

	async fn save(&self, client_id: &str, account: &CachedAccount) -> Result<(), CredentialError> {
		let mut cache = self.read_cache().await?;
		let entries = cache.entry(client_id.to_string()).or_default();
		entries.retain(|a| a.home_account_id != account.home_account_id);
		entries.push(PersistedAccount::from(account));
		self.write_cache(&cache).await
	}

	async fn clear(&self, client_id: &str) -> Result<(), CredentialError> {
		let mut cache = self.read_cache().await?;
		if cache.remove(client_id).is_none() {
			return Ok(());
		}
		self.write_cache(&cache).await
	}
}

/// Account cache that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryAccountCache {
	accounts: tokio::sync::RwLock<HashMap<String, Vec<CachedAccount>>>,
}

impl MemoryAccountCache {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl AccountCache for MemoryAccountCache {
	async fn accounts(&self, client_id: &str) -> Result<Vec<CachedAccount>, CredentialError> {
		let cache = self.accounts.read().await;
		let mut accounts = cache.get(client_id).cloned().unwrap_or_default();
		sort_most_recent_first(&mut accounts);
		Ok(accounts)
	}

	async fn save(&self, client_id: &str, account: &CachedAccount) -> Result<(), CredentialError> {
		let mut cache = self.accounts.write().await;
		let entries = cache.entry(client_id.to_string()).or_default();
		entries.retain(|a| a.home_account_id != account.home_account_id);
		entries.push(account.clone());
		Ok(())
	}

	async fn clear(&self, client_id: &str) -> Result<(), CredentialError> {
		self.accounts.write().await.remove(client_id);
		Ok(())
	}
}
