// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the Open Telekom Cloud DNS v2 API.
//!
//! Only the fields this solver operates on are modeled; unknown fields in
//! provider responses are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A hosted zone owned by the account.
///
/// Zones are looked up read-only per operation; the solver never creates or
/// deletes them. `name` is fully qualified with a trailing dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-side zone ID
    pub id: String,
    /// Fully qualified zone name (trailing dot)
    pub name: String,
}

/// A recordset inside a hosted zone.
///
/// For a given `(zone_id, name, "TXT")` the provider must hold at most one
/// recordset; the store treats more than one match as a hard error. The
/// `records` list is never empty while the recordset exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Provider-side recordset ID
    pub id: String,
    /// ID of the zone the recordset belongs to
    #[serde(default)]
    pub zone_id: String,
    /// Owner name, fully qualified with trailing dot
    pub name: String,
    /// Record type (always `TXT` for this solver)
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds
    #[serde(default)]
    pub ttl: u32,
    /// Ordered value list
    #[serde(default)]
    pub records: Vec<String>,
    /// Provider-side status (e.g. `ACTIVE`, `PENDING_CREATE`)
    #[serde(default)]
    pub status: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating a recordset.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordSetRequest {
    /// Owner name, fully qualified with trailing dot
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds
    pub ttl: u32,
    /// Description tag
    pub description: String,
    /// Initial value list
    pub records: Vec<String>,
}

/// Request body for replacing a recordset's value list.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRecordSetRequest {
    /// Replacement value list (full replacement, never a partial append)
    pub records: Vec<String>,
}

/// Response envelope for zone listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneListResponse {
    /// Zones matching the query
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// Response envelope for recordset listings.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSetListResponse {
    /// Recordsets matching the query
    #[serde(default)]
    pub recordsets: Vec<RecordSet>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
