// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Operator console: prompted input with the validation rules for each field,
//! plus the plain output the session writes between prompts.

use std::io::{self, BufRead, Write};

use appreg_core::{
	resolve_application_name, resolve_secret_validity_days, validate_redirect_uri,
	ProvisioningRequest, RequestError, DEFAULT_APPLICATION_NAME, DEFAULT_SECRET_VALIDITY_DAYS,
};
use tracing::debug;

const REDIRECT_EXAMPLE: &str = "https://e2p.domain.com/#/auth/azuread/";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
	/// Standard input reached end-of-file while a value was still required.
	#[error("input closed while waiting for {0}")]
	Closed(&'static str),

	#[error("console I/O failed: {0}")]
	Io(#[from] io::Error),

	#[error(transparent)]
	Invalid(#[from] RequestError),
}

/// Redirect URI prompt states. The loop only leaves through `Validated`.
enum RedirectPrompt {
	Prompting,
	Rejected(RequestError),
	Validated(String),
}

pub struct InputCollector<R, W> {
	input: R,
	output: W,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self { input, output }
	}

	pub fn into_parts(self) -> (R, W) {
		(self.input, self.output)
	}

	/// Write one line of console output.
	pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
		writeln!(self.output, "{}", line.as_ref())
	}

	/// Like [`say`](Self::say) for output that must not fail the session.
	pub fn note(&mut self, line: impl AsRef<str>) {
		if let Err(e) = self.say(line) {
			debug!(error = %e, "console write failed");
		}
	}

	fn ask(&mut self, prompt: &str, field: &'static str) -> Result<String, InputError> {
		write!(self.output, "{prompt}")?;
		self.output.flush()?;

		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			return Err(InputError::Closed(field));
		}
		Ok(line.trim_end_matches(['\r', '\n']).to_string())
	}

	pub fn application_name(&mut self) -> Result<String, InputError> {
		let raw = self.ask(
			&format!("Enter application name (default: {DEFAULT_APPLICATION_NAME}): "),
			"application name",
		)?;
		Ok(resolve_application_name(&raw))
	}

	/// Re-prompts until the value is an absolute URI containing the callback
	/// route. There is no retry limit.
	pub fn redirect_uri(&mut self) -> Result<String, InputError> {
		let mut state = RedirectPrompt::Prompting;
		loop {
			state = match state {
				RedirectPrompt::Prompting => {
					let raw = self.ask(
						&format!("Enter redirect URI (e.g., {REDIRECT_EXAMPLE}): "),
						"redirect URI",
					)?;
					match validate_redirect_uri(&raw) {
						Ok(uri) => RedirectPrompt::Validated(uri),
						Err(e) => RedirectPrompt::Rejected(e),
					}
				}
				RedirectPrompt::Rejected(reason) => {
					debug!(reason = %reason, "redirect URI rejected");
					match reason {
						RequestError::MissingRedirectUri => self.say("❌ Redirect URI is required.")?,
						_ => self.say(format!("❌ Invalid format. Example: {REDIRECT_EXAMPLE}"))?,
					}
					RedirectPrompt::Prompting
				}
				RedirectPrompt::Validated(uri) => return Ok(uri),
			};
		}
	}

	/// Unusable input silently becomes the default.
	pub fn secret_validity_days(&mut self) -> Result<u32, InputError> {
		let raw = self.ask(
			&format!(
				"Enter client secret validity in days (default: {DEFAULT_SECRET_VALIDITY_DAYS}): "
			),
			"secret validity",
		)?;
		Ok(resolve_secret_validity_days(&raw))
	}

	/// Prompt for all three fields in order.
	pub fn collect(&mut self) -> Result<ProvisioningRequest, InputError> {
		let name = self.application_name()?;
		let redirect_uri = self.redirect_uri()?;
		let days = self.secret_validity_days()?;
		Ok(ProvisioningRequest::new(name, &redirect_uri, days)?)
	}

	/// Yes/no question; anything starting with `y` is yes, end-of-input is no.
	pub fn confirm(&mut self, prompt: &str) -> Result<bool, InputError> {
		match self.ask(prompt, "confirmation") {
			Ok(answer) => Ok(answer.trim().to_lowercase().starts_with('y')),
			Err(InputError::Closed(_)) => Ok(false),
			Err(e) => Err(e),
		}
	}

	/// Wait for the operator to press Enter. End-of-input returns immediately.
	pub fn pause(&mut self, prompt: &str) -> Result<(), InputError> {
		match self.ask(prompt, "acknowledgment") {
			Ok(_) | Err(InputError::Closed(_)) => Ok(()),
			Err(e) => Err(e),
		}
	}
}
