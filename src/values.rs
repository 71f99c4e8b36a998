// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Value-list computation for TXT recordsets.
//!
//! A challenge recordset carries an ordered list of quoted TXT values, one
//! per pending challenge on that owner name. This module holds the pure
//! list operations; the write-back side lives in [`crate::store`].

use crate::dns::types::RecordSet;

/// Test whether `value` is present in the recordset's value list.
///
/// Comparison is an exact string match against the stored (quoted) values.
#[must_use]
pub fn value_exists(record_set: &RecordSet, value: &str) -> bool {
    record_set.records.iter().any(|v| v == value)
}

/// Compute the value list with `value` appended.
///
/// The caller has already checked that `value` is absent; this function does
/// not dedupe. Appending a value that is already present is a caller bug and
/// results in a duplicate entry.
#[must_use]
pub fn append_value(values: &[String], value: &str) -> Vec<String> {
    let mut changed = values.to_vec();
    changed.push(value.to_string());
    changed
}

/// Compute the value list with the first exact match of `value` removed.
///
/// Returns `None` when `value` is not present. The returned list may be
/// empty; deciding what an empty list means (delete the recordset or refuse)
/// is the caller's job.
#[must_use]
pub fn remove_value(values: &[String], value: &str) -> Option<Vec<String>> {
    let index = values.iter().position(|v| v == value)?;
    let mut changed = values.to_vec();
    changed.remove(index);
    Some(changed)
}

/// Turn a challenge key into a value safe to store in DNS.
///
/// Providers require TXT values to be wrapped in double quotes.
///
/// # Example
///
/// ```rust
/// use otcdns::values::quote_txt_value;
///
/// assert_eq!(quote_txt_value("tok123"), "\"tok123\"");
/// ```
#[must_use]
pub fn quote_txt_value(key: &str) -> String {
    format!("\"{key}\"")
}
