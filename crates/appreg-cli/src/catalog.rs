// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `appreg catalog`: the permissions every registration receives.

use appreg_core::{catalog, GrantKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CatalogRow {
	pub resource: &'static str,
	pub resource_app_id: String,
	pub permission: &'static str,
	pub id: String,
	#[serde(rename = "type")]
	pub kind: GrantKind,
}

pub fn catalog_rows() -> Vec<CatalogRow> {
	catalog()
		.iter()
		.flat_map(|group| {
			group.grants.iter().map(move |entry| CatalogRow {
				resource: group.resource_name,
				resource_app_id: group.resource_app_id.to_string(),
				permission: entry.permission,
				id: entry.access_id.to_string(),
				kind: entry.kind,
			})
		})
		.collect()
}

pub fn render_table() -> String {
	let mut out = String::new();
	for group in catalog() {
		out.push_str(&format!(
			"{} ({})\n",
			group.resource_name, group.resource_app_id
		));
		for entry in group.grants {
			out.push_str(&format!(
				"  {:<6} {}  {}\n",
				entry.kind.as_str(),
				entry.access_id,
				entry.permission
			));
		}
	}
	out
}

pub fn render_json() -> serde_json::Result<String> {
	serde_json::to_string_pretty(&catalog_rows())
}
