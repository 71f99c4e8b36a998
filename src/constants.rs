// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the otcdns webhook solver.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Solver Identity
// ============================================================================

/// Name of this solver, referenced by issuers under the webhook API group
pub const SOLVER_NAME: &str = "otcdns";

/// Default API group when `GROUP_NAME` is not set
pub const DEFAULT_GROUP_NAME: &str = "otcdns.firestoned.io";

// ============================================================================
// DNS Record Constants
// ============================================================================

/// Record type managed by this solver
pub const DNS_RECORD_TYPE_TXT: &str = "TXT";

/// Description tag attached to every recordset this solver creates
pub const DNS_RECORD_DESCRIPTION: &str = "ACME Challenge";

/// Owner-name prefix for DNS-01 challenge records
pub const ACME_CHALLENGE_PREFIX: &str = "_acme-challenge.";

/// TTL for challenge recordsets (5 minutes)
pub const CHALLENGE_RECORD_TTL_SECS: u32 = 300;

// ============================================================================
// Provider API Constants
// ============================================================================

/// Service type used to select the DNS endpoint from the identity catalog
pub const CATALOG_SERVICE_TYPE_DNS: &str = "dns";

/// Margin before token expiry at which a new token is requested (1 minute)
pub const TOKEN_RENEWAL_MARGIN_SECS: i64 = 60;

// ============================================================================
// Server Constants
// ============================================================================

/// Default webhook listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8443";
