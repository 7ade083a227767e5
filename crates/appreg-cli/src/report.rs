// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session report: the summary text, the summary file and the consent
//! browser launch. The file and the browser are best-effort.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use appreg_core::{ApplicationRecord, ClientSecret};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// A best-effort step that failed without failing the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	BrowserLaunch { message: String },
	SummaryWrite { path: PathBuf, message: String },
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::BrowserLaunch { message } => write!(f, "could not open browser: {message}"),
			Diagnostic::SummaryWrite { path, message } => {
				write!(f, "could not write {}: {message}", path.display())
			}
		}
	}
}

/// Opens a URL in the operator's browser.
pub trait BrowserLauncher: Send + Sync {
	fn open(&self, url: &str) -> io::Result<()>;
}

/// Launches the system default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
	fn open(&self, url: &str) -> io::Result<()> {
		webbrowser::open(url)
	}
}

pub fn format_expiry(expires_at: DateTime<Utc>) -> String {
	expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// The summary shown at the end of a run and written verbatim to disk.
///
/// Includes the one-time secret text; this is the only place it is rendered.
pub fn render_summary(
	name: &str,
	application: &ApplicationRecord,
	secret: &ClientSecret,
	tenant_id: &str,
) -> String {
	format!(
		"\n=== Registration Summary ===\n\
		Application Name: {name}\n\
		Application ID:   {app_id}\n\
		Object ID:        {object_id}\n\
		Client Secret:    {secret_text}\n\
		Secret Expiry:    {expiry}\n\
		Tenant ID:        {tenant_id}\n\
		\n\
		⚠️  Remember to complete admin consent using the URL provided above!\n\
		✅ Application registration completed successfully!\n",
		app_id = application.app_id,
		object_id = application.object_id,
		secret_text = secret.secret_text(),
		expiry = format_expiry(secret.expires_at()),
	)
}

/// `{dir}/{name}.txt`, with path separators in the name replaced so the file
/// always lands in `dir`.
pub fn summary_path(dir: &Path, name: &str) -> PathBuf {
	let file_stem: String = name
		.chars()
		.map(|c| match c {
			'/' | '\\' => '_',
			c => c,
		})
		.collect();
	dir.join(format!("{file_stem}.txt"))
}

/// Writes the summary, overwriting any earlier file of the same name.
pub fn write_summary(dir: &Path, name: &str, summary: &str) -> Result<PathBuf, Diagnostic> {
	let path = summary_path(dir, name);
	match std::fs::write(&path, summary) {
		Ok(()) => {
			info!(path = %path.display(), "summary written");
			Ok(path)
		}
		Err(e) => {
			warn!(path = %path.display(), error = %e, "failed to write summary");
			Err(Diagnostic::SummaryWrite {
				path,
				message: e.to_string(),
			})
		}
	}
}

pub fn launch_browser(launcher: &dyn BrowserLauncher, url: &str) -> Result<(), Diagnostic> {
	launcher.open(url).map_err(|e| {
		warn!(error = %e, "failed to open browser");
		Diagnostic::BrowserLaunch {
			message: e.to_string(),
		}
	})
}
