// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-issuer solver configuration.
//!
//! The webhook section of an issuer's DNS-01 solver carries an opaque JSON
//! blob that is handed to the solver with every challenge. This module
//! decodes that blob into a [`SolverConfig`].
//!
//! The configuration should not contain credentials, only references to the
//! Kubernetes Secrets holding them. The inline `access_key`/`secret_key`
//! fields exist as a testing shortcut and must never be used in production;
//! when non-empty they take precedence over the secret references.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Reference to a single key inside a namespaced Kubernetes Secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKeySelector {
    /// Name of the Secret resource
    #[serde(default)]
    pub name: String,
    /// Key within the Secret's data
    #[serde(default)]
    pub key: String,
}

/// Configuration decoded from the issuer's webhook config blob.
///
/// Decoding tolerates an absent blob (all fields default) so that a solver
/// configured purely through CLI flags keeps working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Inline access key. Testing shortcut only; wins over the secret
    /// reference when non-empty.
    #[serde(default)]
    pub access_key: String,

    /// Inline secret key. Testing shortcut only; wins over the secret
    /// reference when non-empty.
    #[serde(default)]
    pub secret_key: String,

    /// Location of the access key; loaded from this secret reference.
    #[serde(default)]
    pub access_key_secret_ref: SecretKeySelector,

    /// Location of the secret key; loaded from this secret reference.
    #[serde(default)]
    pub secret_key_secret_ref: SecretKeySelector,

    /// Provider region the DNS endpoint is selected for
    #[serde(default)]
    pub region: String,

    /// Identity endpoint tokens are requested from
    #[serde(default, rename = "authURL")]
    pub auth_url: String,
}

/// Decode the issuer's config blob into a [`SolverConfig`].
///
/// An absent blob is the base case and decodes to the default configuration.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigDecodeFailed`] when the blob is present but
/// not valid for the expected shape.
pub fn decode_solver_config(config: Option<&serde_json::Value>) -> Result<SolverConfig, ConfigError> {
    let Some(raw) = config else {
        return Ok(SolverConfig::default());
    };

    serde_json::from_value(raw.clone()).map_err(|e| ConfigError::ConfigDecodeFailed {
        reason: e.to_string(),
    })
}
