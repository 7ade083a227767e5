// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Creates an application registration, its client secret and its API
//! permissions, in that order.

mod error;
mod provisioner;

pub use error::ProvisioningError;
pub use provisioner::{
	secret_expiry, secret_label, ProvisionedApplication, Provisioner, ProvisioningEvent,
};
