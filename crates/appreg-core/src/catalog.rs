// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compiled-in permission catalog.
//!
//! Every registration created by appreg receives exactly this set of API
//! permissions. Editing the table changes the access footprint of every
//! application provisioned afterwards, so entries are identified by their
//! stable permission ids rather than by display name.

use serde::{Deserialize, Serialize};
use uuid::{uuid, Uuid};

/// How a permission is granted on the resource application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrantKind {
	/// App-only permission, consented by an administrator.
	#[serde(rename = "Role")]
	ApplicationRole,
	/// Delegated permission, exercised on behalf of a signed-in user.
	#[serde(rename = "Scope")]
	DelegatedScope,
}

impl GrantKind {
	/// Wire name used in `requiredResourceAccess[].resourceAccess[].type`.
	pub fn as_str(&self) -> &'static str {
		match self {
			GrantKind::ApplicationRole => "Role",
			GrantKind::DelegatedScope => "Scope",
		}
	}
}

/// One permission on one resource application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionGrant {
	pub resource_app_id: Uuid,
	pub access_id: Uuid,
	pub kind: GrantKind,
}

/// Catalog row: a permission id, its kind and its human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantEntry {
	pub access_id: Uuid,
	pub kind: GrantKind,
	pub permission: &'static str,
}

impl GrantEntry {
	const fn role(access_id: Uuid, permission: &'static str) -> Self {
		Self {
			access_id,
			kind: GrantKind::ApplicationRole,
			permission,
		}
	}

	const fn scope(access_id: Uuid, permission: &'static str) -> Self {
		Self {
			access_id,
			kind: GrantKind::DelegatedScope,
			permission,
		}
	}
}

/// All grants requested on a single resource application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGroup {
	pub resource_app_id: Uuid,
	pub resource_name: &'static str,
	pub grants: &'static [GrantEntry],
}

impl ResourceGroup {
	/// Grants of this group, tagged with the owning resource.
	pub fn permission_grants(&self) -> impl Iterator<Item = PermissionGrant> + '_ {
		self.grants.iter().map(move |entry| PermissionGrant {
			resource_app_id: self.resource_app_id,
			access_id: entry.access_id,
			kind: entry.kind,
		})
	}
}

pub const MICROSOFT_GRAPH_APP_ID: Uuid = uuid!("00000003-0000-0000-c000-000000000000");
pub const WINDOWS_DEFENDER_ATP_APP_ID: Uuid = uuid!("fc780465-2017-40d4-a0c5-307022471b92");

const MICROSOFT_GRAPH_GRANTS: &[GrantEntry] = &[
	GrantEntry::role(uuid!("9a5d68dd-52b0-4cc2-bd40-abcf44ac3a30"), "Application.Read.All"),
	GrantEntry::role(uuid!("1bfefb4e-e0b5-418b-a88f-73c46d2cc8e9"), "Application.ReadWrite.All"),
	GrantEntry::role(uuid!("7438b122-aefc-4978-80ed-43db9fcc7715"), "Device.Read.All"),
	GrantEntry::role(uuid!("78145de6-330d-4800-a6ce-494ff2d33d07"), "DeviceManagementApps.ReadWrite.All"),
	GrantEntry::role(uuid!("dc377aa6-52d8-4e23-b271-2a7ae04cedf3"), "DeviceManagementConfiguration.Read.All"),
	GrantEntry::role(uuid!("2f51be20-0bb4-4fed-bf7b-db946066c75e"), "DeviceManagementManagedDevices.Read.All"),
	GrantEntry::role(uuid!("58ca0d9a-1575-47e1-a3cb-007ef2e4583b"), "DeviceManagementRBAC.Read.All"),
	GrantEntry::role(uuid!("06a5fe6d-c49d-46a7-b082-56b1b14103c7"), "DeviceManagementServiceConfig.Read.All"),
	GrantEntry::role(uuid!("df021288-bdef-4463-88db-98f22de89214"), "User.Read.All"),
	GrantEntry::role(uuid!("98830695-27a2-44f7-8c18-0c3ebc9698f6"), "GroupMember.Read.All"),
	GrantEntry::role(uuid!("5b567255-7703-4780-807c-7be8301ae99b"), "Group.Read.All"),
	GrantEntry::scope(uuid!("e1fe6dd8-ba31-4d61-89e7-88639da4683d"), "User.Read"),
	GrantEntry::scope(uuid!("a154be20-db9c-4678-8ab7-66f6cc099a59"), "User.Read.All"),
	GrantEntry::scope(uuid!("5f8c59db-677d-491f-a6b8-5f174b11ec1d"), "Group.Read.All"),
];

const WINDOWS_DEFENDER_ATP_GRANTS: &[GrantEntry] = &[
	GrantEntry::role(uuid!("71fe6b80-7034-4028-9ed8-0f316df9c3ff"), "Alert.Read.All"),
	GrantEntry::role(uuid!("47bf842d-354b-49ef-b741-3a6dd815bc13"), "Ip.Read.All"),
	GrantEntry::role(uuid!("ea8291d3-4b9a-44b5-bc3a-6cea3026dc79"), "Machine.Read.All"),
	GrantEntry::role(uuid!("aa027352-232b-4ed4-b963-a705fc4d6d2c"), "Machine.ReadWrite.All"),
	GrantEntry::role(uuid!("a86d9824-b2b6-45f8-b042-16bc4922ed4e"), "Machine.Scan"),
	GrantEntry::role(uuid!("6a33eedf-ba73-4e5a-821b-f057ef63853a"), "RemediationTasks.Read.All"),
	GrantEntry::role(uuid!("02b005dd-f804-43b4-8fc7-078460413f74"), "Score.Read.All"),
	GrantEntry::role(uuid!("e870c0c1-c1a2-41ca-948e-a33912d2d3f0"), "SecurityBaselinesAssessment.Read.All"),
	GrantEntry::role(uuid!("227f2ea0-c2c2-4428-b7af-9ff40f1a720e"), "SecurityConfiguration.Read.All"),
	GrantEntry::role(uuid!("6443965c-7dd2-4cfd-b38f-bb7772bee163"), "SecurityRecommendation.Read.All"),
	GrantEntry::role(uuid!("37f71c98-d198-41ae-964d-2c49aab74926"), "Software.Read.All"),
	GrantEntry::role(uuid!("a833834a-4cf1-4732-8acf-bbcfa13fb610"), "User.Read.All"),
	GrantEntry::role(uuid!("41269fc5-d04d-4bfd-bce7-43a51cea049a"), "Vulnerability.Read.All"),
];

static PERMISSION_CATALOG: [ResourceGroup; 2] = [
	ResourceGroup {
		resource_app_id: MICROSOFT_GRAPH_APP_ID,
		resource_name: "Microsoft Graph",
		grants: MICROSOFT_GRAPH_GRANTS,
	},
	ResourceGroup {
		resource_app_id: WINDOWS_DEFENDER_ATP_APP_ID,
		resource_name: "WindowsDefenderATP",
		grants: WINDOWS_DEFENDER_ATP_GRANTS,
	},
];

/// The permission catalog, grouped by resource application in submission order.
pub fn catalog() -> &'static [ResourceGroup] {
	&PERMISSION_CATALOG
}

/// Every grant of every group, in catalog order.
pub fn flatten_grants() -> Vec<PermissionGrant> {
	catalog()
		.iter()
		.flat_map(ResourceGroup::permission_grants)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn catalog_has_graph_then_defender() {
		let groups = catalog();
		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].resource_app_id, MICROSOFT_GRAPH_APP_ID);
		assert_eq!(groups[1].resource_app_id, WINDOWS_DEFENDER_ATP_APP_ID);
	}

	#[test]
	fn catalog_grant_counts() {
		let groups = catalog();
		assert_eq!(groups[0].grants.len(), 14);
		assert_eq!(groups[1].grants.len(), 13);
		assert_eq!(flatten_grants().len(), 27);
	}

	#[test]
	fn grants_are_unique_triples() {
		let grants = flatten_grants();
		let unique: HashSet<_> = grants.iter().copied().collect();
		assert_eq!(unique.len(), grants.len());
	}

	#[test]
	fn access_ids_are_unique_within_each_resource() {
		for group in catalog() {
			let ids: HashSet<_> = group.grants.iter().map(|g| g.access_id).collect();
			assert_eq!(ids.len(), group.grants.len(), "{}", group.resource_name);
		}
	}

	#[test]
	fn graph_delegated_scopes() {
		let scopes: Vec<_> = catalog()[0]
			.grants
			.iter()
			.filter(|g| g.kind == GrantKind::DelegatedScope)
			.map(|g| g.permission)
			.collect();
		assert_eq!(scopes, vec!["User.Read", "User.Read.All", "Group.Read.All"]);
	}

	#[test]
	fn defender_grants_are_all_roles() {
		assert!(catalog()[1]
			.grants
			.iter()
			.all(|g| g.kind == GrantKind::ApplicationRole));
	}

	#[test]
	fn flatten_tags_each_grant_with_its_resource() {
		let grants = flatten_grants();
		assert!(grants[..14]
			.iter()
			.all(|g| g.resource_app_id == MICROSOFT_GRAPH_APP_ID));
		assert!(grants[14..]
			.iter()
			.all(|g| g.resource_app_id == WINDOWS_DEFENDER_ATP_APP_ID));
		assert_eq!(
			grants[0].access_id,
			uuid!("9a5d68dd-52b0-4cc2-bd40-abcf44ac3a30")
		);
	}

	#[test]
	fn grant_kind_wire_names() {
		assert_eq!(GrantKind::ApplicationRole.as_str(), "Role");
		assert_eq!(GrantKind::DelegatedScope.as_str(), "Scope");
		assert_eq!(
			serde_json::to_string(&GrantKind::DelegatedScope).unwrap(),
			"\"Scope\""
		);
	}
}
