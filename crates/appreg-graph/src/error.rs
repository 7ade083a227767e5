// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	/// Graph answered with a non-success status.
	#[error("Graph API error ({status}) {code}: {message}")]
	Api {
		status: u16,
		code: String,
		message: String,
	},

	#[error("unexpected Graph response: {0}")]
	InvalidResponse(String),
}

/// OData error envelope returned by Graph on failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ODataError {
	pub error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ODataErrorBody {
	pub code: String,
	#[serde(default)]
	pub message: String,
}

impl GraphError {
	pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
		match serde_json::from_str::<ODataError>(body) {
			Ok(odata) => GraphError::Api {
				status: status.as_u16(),
				code: odata.error.code,
				message: odata.error.message,
			},
			Err(_) => GraphError::Api {
				status: status.as_u16(),
				code: status
					.canonical_reason()
					.unwrap_or("Unknown")
					.to_string(),
				message: body.to_string(),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_odata_envelope() {
		let err = GraphError::from_response(
			reqwest::StatusCode::FORBIDDEN,
			r#"{"error":{"code":"Authorization_RequestDenied","message":"Insufficient privileges to complete the operation."}}"#,
		);
		assert_eq!(
			err.to_string(),
			"Graph API error (403) Authorization_RequestDenied: Insufficient privileges to complete the operation."
		);
	}

	#[test]
	fn falls_back_to_status_reason() {
		let err = GraphError::from_response(reqwest::StatusCode::BAD_GATEWAY, "upstream");
		match err {
			GraphError::Api { status, code, message } => {
				assert_eq!(status, 502);
				assert_eq!(code, "Bad Gateway");
				assert_eq!(message, "upstream");
			}
			other => panic!("unexpected {other:?}"),
		}
	}
}
