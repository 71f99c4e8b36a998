// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the otcdns webhook solver.
//!
//! This module provides specialized error types for:
//! - Zone resolution against the Open Telekom Cloud DNS API
//! - TXT recordset CRUD and value-set mutation
//! - Solver configuration decoding and Kubernetes Secret resolution
//! - HTTP transport failures against the identity and DNS endpoints
//!
//! These errors provide structured error handling for challenge operations,
//! enabling better error reporting in webhook responses and metrics. None of
//! them is retried internally; the certificate issuance workflow re-invokes
//! the failed operation on its own schedule.

use thiserror::Error;

/// Errors that can occur while resolving a hosted zone.
///
/// A challenge names the zone it belongs to; exactly one hosted zone must
/// match that name for the solver to operate.
#[derive(Error, Debug, Clone)]
pub enum ZoneError {
    /// No hosted zone matches the requested name
    ///
    /// Returned when the zone query succeeds but finds nothing. The account
    /// does not host the zone, or the name is missing its trailing dot.
    #[error("Zone '{zone}' not found")]
    ZoneNotFound {
        /// The fully qualified zone name that was queried
        zone: String,
    },

    /// More than one hosted zone matches the requested name
    ///
    /// Returned when an exact-name query yields several zones. The solver
    /// never picks one arbitrarily.
    #[error("Zone query for '{zone}' returned {count} zones, expected exactly 1")]
    AmbiguousZone {
        /// The fully qualified zone name that was queried
        zone: String,
        /// Number of zones the query returned
        count: usize,
    },

    /// The zone listing call itself failed
    ///
    /// Returned when the provider API could not be queried at all.
    #[error("Zone listing for '{zone}' failed: {reason}")]
    ZoneListFailed {
        /// The fully qualified zone name that was queried
        zone: String,
        /// The originating transport error
        reason: String,
    },
}

/// Errors that can occur during TXT recordset operations.
///
/// These cover both the CRUD calls against the provider and the value-set
/// rules the solver enforces on top of them.
#[derive(Error, Debug, Clone)]
pub enum RecordSetError {
    /// More than one TXT recordset exists for the owner name
    ///
    /// The provider must hold at most one TXT recordset per owner name.
    /// Finding several is an invariant violation, not a transient condition,
    /// and every read or write against that name fails with this error.
    #[error("Recordset query for '{name}' returned {count} recordsets, expected at most 1")]
    AmbiguousRecordSet {
        /// The owner name that was queried
        name: String,
        /// Number of recordsets the query returned
        count: usize,
    },

    /// The recordset listing call failed
    #[error("Recordset listing for '{name}' failed: {reason}")]
    LookupFailed {
        /// The owner name that was queried
        name: String,
        /// The originating transport error
        reason: String,
    },

    /// Failed to create a new TXT recordset
    #[error("Failed to create TXT recordset '{name}': {reason}")]
    CreateFailed {
        /// The owner name of the recordset
        name: String,
        /// The originating transport error
        reason: String,
    },

    /// Failed to replace the value list of an existing recordset
    #[error("Failed to update TXT recordset '{id}': {reason}")]
    UpdateFailed {
        /// Provider-side ID of the recordset
        id: String,
        /// The originating transport error
        reason: String,
    },

    /// Failed to delete a recordset by ID
    ///
    /// The store does not tolerate deleting a nonexistent ID gracefully;
    /// callers confirm existence first if they need idempotent deletion.
    #[error("Failed to delete recordset '{id}': {reason}")]
    DeleteFailed {
        /// Provider-side ID of the recordset
        id: String,
        /// The originating transport error
        reason: String,
    },

    /// Rejected an update that would leave the recordset without values
    ///
    /// The provider silently fails to clear values when sent an empty list,
    /// so an empty update is never sent. Removing the last value must delete
    /// the whole recordset instead.
    #[error("Refusing to update recordset '{id}' with an empty value list")]
    EmptyUpdateRejected {
        /// Provider-side ID of the recordset
        id: String,
    },

    /// Refused to remove the last value while recordset deletion is disabled
    ///
    /// Returned by value removal when the value being removed is the only
    /// one left and the caller did not opt into deleting the recordset.
    /// The recordset is left untouched.
    #[error(
        "Removing the last value of recordset '{name}' is not possible; \
         enable recordset deletion to remove it"
    )]
    LastValueDeletionRejected {
        /// The owner name of the recordset
        name: String,
    },

    /// The value to remove is not present in the recordset
    #[error("Value to remove not found in recordset '{name}'")]
    ValueNotFound {
        /// The owner name of the recordset
        name: String,
    },
}

/// Errors related to solver configuration and credential resolution.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// The per-issuer configuration blob could not be decoded
    #[error("Error decoding solver config: {reason}")]
    ConfigDecodeFailed {
        /// The underlying JSON error
        reason: String,
    },

    /// A referenced Kubernetes Secret could not be loaded
    #[error("Failed to load secret '{namespace}/{name}': {reason}")]
    SecretResolutionFailed {
        /// Namespace the secret was expected in
        namespace: String,
        /// Name of the secret
        name: String,
        /// The underlying Kubernetes API error
        reason: String,
    },

    /// The Secret exists but does not contain the referenced key
    #[error("Key '{key}' not found in secret '{namespace}/{name}'")]
    SecretKeyMissing {
        /// Namespace of the secret
        namespace: String,
        /// Name of the secret
        name: String,
        /// The data key that was referenced
        key: String,
    },
}

/// Errors from the HTTP transport against the identity and DNS endpoints.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// The API returned a non-success status code
    #[error("HTTP {status} from {url}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body or error message
        message: String,
    },

    /// The request could not be sent (connection refused, DNS failure, timeout)
    #[error("Request to {url} failed: {reason}")]
    Connection {
        /// The URL that was requested
        url: String,
        /// Reason for the connection failure
        reason: String,
    },

    /// The response body could not be decoded
    #[error("Failed to decode response from {url}: {reason}")]
    Decode {
        /// The URL that was requested
        url: String,
        /// The underlying decode error
        reason: String,
    },

    /// Token request against the identity endpoint failed
    #[error("Authentication with {endpoint} failed: {reason}")]
    Auth {
        /// The identity endpoint that was used
        endpoint: String,
        /// Reason for the authentication failure
        reason: String,
    },

    /// The token's service catalog has no usable DNS endpoint
    #[error("No '{service_type}' endpoint for region '{region}' in the service catalog")]
    EndpointNotFound {
        /// The catalog service type that was searched for
        service_type: String,
        /// The configured region
        region: String,
    },
}

/// Composite error type that encompasses all challenge-handling errors.
///
/// This is the primary error type returned by Present and CleanUp. It
/// provides a unified interface for handling all possible failures.
#[derive(Error, Debug, Clone)]
pub enum SolverError {
    /// Zone resolution error
    #[error(transparent)]
    Zone(#[from] ZoneError),

    /// Recordset CRUD or value-set error
    #[error(transparent)]
    RecordSet(#[from] RecordSetError),

    /// Configuration or credential error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Generic error for operations that don't fit other categories
    #[error("Challenge operation failed: {0}")]
    Generic(String),
}

impl SolverError {
    /// Returns true if this error is transient and the operation should be retried.
    ///
    /// Transient errors include network failures and provider-side write
    /// failures. Non-transient errors include missing zones, invariant
    /// violations, and configuration mistakes. The solver itself never
    /// retries; this classification is for the issuing framework.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            // Transient errors that should be retried
            Self::Zone(ZoneError::ZoneListFailed { .. })
            | Self::RecordSet(
                RecordSetError::LookupFailed { .. }
                | RecordSetError::CreateFailed { .. }
                | RecordSetError::UpdateFailed { .. }
                | RecordSetError::DeleteFailed { .. },
            )
            | Self::Transport(_)
            | Self::Generic(_) => true,

            // Permanent errors that should not be retried
            Self::Zone(ZoneError::ZoneNotFound { .. } | ZoneError::AmbiguousZone { .. })
            | Self::RecordSet(
                RecordSetError::AmbiguousRecordSet { .. }
                | RecordSetError::EmptyUpdateRejected { .. }
                | RecordSetError::LastValueDeletionRejected { .. }
                | RecordSetError::ValueNotFound { .. },
            )
            | Self::Config(_) => false,
        }
    }

    /// Returns the status reason code for this error.
    ///
    /// This is used in webhook failure responses and metrics labels to
    /// provide structured error information.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::Zone(ZoneError::ZoneNotFound { .. }) => "ZoneNotFound",
            Self::Zone(ZoneError::AmbiguousZone { .. }) => "AmbiguousZone",
            Self::Zone(ZoneError::ZoneListFailed { .. }) => "ZoneListFailed",

            Self::RecordSet(RecordSetError::AmbiguousRecordSet { .. }) => "AmbiguousRecordSet",
            Self::RecordSet(RecordSetError::LookupFailed { .. }) => "RecordSetLookupFailed",
            Self::RecordSet(RecordSetError::CreateFailed { .. }) => "CreateFailed",
            Self::RecordSet(RecordSetError::UpdateFailed { .. }) => "UpdateFailed",
            Self::RecordSet(RecordSetError::DeleteFailed { .. }) => "DeleteFailed",
            Self::RecordSet(RecordSetError::EmptyUpdateRejected { .. }) => "EmptyUpdateRejected",
            Self::RecordSet(RecordSetError::LastValueDeletionRejected { .. }) => {
                "LastValueDeletionRejected"
            }
            Self::RecordSet(RecordSetError::ValueNotFound { .. }) => "ValueNotFound",

            Self::Config(ConfigError::ConfigDecodeFailed { .. }) => "ConfigDecodeFailed",
            Self::Config(ConfigError::SecretResolutionFailed { .. }) => "SecretResolutionFailed",
            Self::Config(ConfigError::SecretKeyMissing { .. }) => "SecretResolutionFailed",

            Self::Transport(TransportError::Api { .. }) => "ProviderApiError",
            Self::Transport(TransportError::Connection { .. }) => "ProviderUnreachable",
            Self::Transport(TransportError::Decode { .. }) => "ProviderResponseInvalid",
            Self::Transport(TransportError::Auth { .. }) => "AuthenticationFailed",
            Self::Transport(TransportError::EndpointNotFound { .. }) => "EndpointNotFound",

            Self::Generic(_) => "ChallengeOperationFailed",
        }
    }
}

// Conversion from anyhow::Error for callers composing with anyhow
impl From<anyhow::Error> for SolverError {
    fn from(err: anyhow::Error) -> Self {
        Self::Generic(err.to_string())
    }
}
