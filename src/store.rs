// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone resolution and TXT recordset store.
//!
//! The store offers the CRUD surface the reconciliation engine composes:
//! resolving a hosted zone by exact name, fetching the single TXT recordset
//! for the challenge owner name, creating it with an initial value,
//! replacing its value list, removing a single value, and deleting it. The
//! methods are shaped for building a DNS-01 solver; this is not a generic
//! DNS library.
//!
//! All state lives at the provider. Every operation is a fresh round trip;
//! nothing is cached between calls. The store enforces two invariants the
//! provider does not:
//!
//! - at most one zone and at most one TXT recordset may match a name -
//!   more than one match is a hard error, never resolved by picking one;
//! - a recordset update is never sent with an empty value list - the
//!   provider silently fails to clear values, so removing the last value
//!   must delete the whole recordset instead.

use std::sync::Arc;
use tracing::debug;

use crate::constants::{
    ACME_CHALLENGE_PREFIX, CHALLENGE_RECORD_TTL_SECS, DNS_RECORD_DESCRIPTION, DNS_RECORD_TYPE_TXT,
};
use crate::dns::types::{CreateRecordSetRequest, RecordSet, Zone};
use crate::dns::DnsApi;
use crate::errors::{RecordSetError, ZoneError};
use crate::values;

/// Result of removing one value from a recordset.
#[derive(Debug, Clone)]
pub enum RemoveOutcome {
    /// The value was the last one; the whole recordset was deleted
    Deleted,
    /// The value list shrank and was written back
    Updated(RecordSet),
}

/// Store over the TXT recordset of one challenge owner name.
///
/// Built per challenge around a [`DnsApi`] implementation. The optional
/// subdomain is inserted in place of the default challenge prefix when
/// constructing the owner name.
#[derive(Clone)]
pub struct RecordSetStore {
    api: Arc<dyn DnsApi>,
    /// Optional subdomain between the zone name and the record owner name
    subdomain: Option<String>,
}

impl RecordSetStore {
    /// Create a store using the default `_acme-challenge.` owner prefix.
    #[must_use]
    pub fn new(api: Arc<dyn DnsApi>) -> Self {
        Self {
            api,
            subdomain: None,
        }
    }

    /// Create a store with a subdomain override for the owner name.
    ///
    /// `None` and `Some("")` both fall back to the default prefix.
    #[must_use]
    pub fn with_subdomain(api: Arc<dyn DnsApi>, subdomain: Option<String>) -> Self {
        let subdomain = subdomain.filter(|s| !s.is_empty());
        Self { api, subdomain }
    }

    /// Owner name of the challenge recordset within `zone_name`.
    #[must_use]
    pub fn record_name(&self, zone_name: &str) -> String {
        match &self.subdomain {
            Some(subdomain) => format!("{subdomain}.{zone_name}"),
            None => format!("{ACME_CHALLENGE_PREFIX}{zone_name}"),
        }
    }

    /// Resolve a hosted zone by its fully qualified name.
    ///
    /// # Errors
    ///
    /// [`ZoneError::ZoneNotFound`] when no zone matches,
    /// [`ZoneError::AmbiguousZone`] when more than one does, and
    /// [`ZoneError::ZoneListFailed`] when the listing call fails. Not
    /// retried here; the caller decides whether to retry the whole
    /// challenge.
    pub async fn resolve_zone(&self, zone_name: &str) -> Result<Zone, ZoneError> {
        let mut zones = self
            .api
            .list_zones(zone_name)
            .await
            .map_err(|e| ZoneError::ZoneListFailed {
                zone: zone_name.to_string(),
                reason: e.to_string(),
            })?;

        // We need exactly 1 zone to operate on
        match zones.len() {
            0 => Err(ZoneError::ZoneNotFound {
                zone: zone_name.to_string(),
            }),
            1 => Ok(zones.swap_remove(0)),
            count => Err(ZoneError::AmbiguousZone {
                zone: zone_name.to_string(),
                count,
            }),
        }
    }

    /// Fetch the TXT recordset for the challenge owner name.
    ///
    /// Valid results are one recordset or none.
    ///
    /// # Errors
    ///
    /// [`RecordSetError::AmbiguousRecordSet`] when more than one recordset
    /// matches - an invariant violation, not a transient condition - and
    /// [`RecordSetError::LookupFailed`] when the listing call fails.
    pub async fn get_txt_record_set(&self, zone: &Zone) -> Result<Option<RecordSet>, RecordSetError> {
        let name = self.record_name(&zone.name);
        let record_sets = self
            .api
            .list_txt_record_sets(&zone.id, &name)
            .await
            .map_err(|e| RecordSetError::LookupFailed {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        match record_sets.len() {
            0 => Ok(None),
            1 => Ok(record_sets.into_iter().next()),
            count => Err(RecordSetError::AmbiguousRecordSet { name, count }),
        }
    }

    /// Test whether a TXT recordset exists for the challenge owner name.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_txt_record_set`].
    pub async fn has_txt_record_set(&self, zone: &Zone) -> Result<bool, RecordSetError> {
        Ok(self.get_txt_record_set(zone).await?.is_some())
    }

    /// Fetch the recordset and test whether `value` is among its values.
    ///
    /// Returns the membership flag together with the recordset (when one
    /// exists) so callers can branch without a second lookup.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::get_txt_record_set`].
    pub async fn has_txt_record_value(
        &self,
        zone: &Zone,
        value: &str,
    ) -> Result<(bool, Option<RecordSet>), RecordSetError> {
        let record_set = self.get_txt_record_set(zone).await?;

        match record_set {
            Some(rs) => {
                let found = values::value_exists(&rs, value);
                Ok((found, Some(rs)))
            }
            None => Ok((false, None)),
        }
    }

    /// Create the challenge recordset with exactly one value.
    ///
    /// Does not check for pre-existence; that is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// [`RecordSetError::CreateFailed`] on transport error.
    pub async fn create_txt_record_set(
        &self,
        zone: &Zone,
        value: &str,
    ) -> Result<RecordSet, RecordSetError> {
        let name = self.record_name(&zone.name);
        let request = CreateRecordSetRequest {
            name: name.clone(),
            record_type: DNS_RECORD_TYPE_TXT.to_string(),
            ttl: CHALLENGE_RECORD_TTL_SECS,
            description: DNS_RECORD_DESCRIPTION.to_string(),
            records: vec![value.to_string()],
        };

        let created = self
            .api
            .create_record_set(&zone.id, &request)
            .await
            .map_err(|e| RecordSetError::CreateFailed {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        debug!(name = %created.name, "Created TXT recordset");
        Ok(created)
    }

    /// Replace the full value list of an existing recordset.
    ///
    /// # Errors
    ///
    /// [`RecordSetError::EmptyUpdateRejected`] when `values` is empty -
    /// the provider silently fails to clear values on an empty update, so
    /// it is never sent - and [`RecordSetError::UpdateFailed`] on transport
    /// error.
    pub async fn update_txt_values(
        &self,
        zone: &Zone,
        record_set: &RecordSet,
        new_values: Vec<String>,
    ) -> Result<RecordSet, RecordSetError> {
        if new_values.is_empty() {
            return Err(RecordSetError::EmptyUpdateRejected {
                id: record_set.id.clone(),
            });
        }

        let updated = self
            .api
            .update_record_set(&zone.id, &record_set.id, &new_values)
            .await
            .map_err(|e| RecordSetError::UpdateFailed {
                id: record_set.id.clone(),
                reason: e.to_string(),
            })?;

        debug!(name = %updated.name, count = updated.records.len(), "Updated TXT recordset values");
        Ok(updated)
    }

    /// Delete the recordset by ID.
    ///
    /// # Errors
    ///
    /// [`RecordSetError::DeleteFailed`] on transport error, including
    /// deletion of an ID that no longer exists - callers confirm existence
    /// first when they need idempotent behavior.
    pub async fn delete_record_set(
        &self,
        zone: &Zone,
        record_set: &RecordSet,
    ) -> Result<(), RecordSetError> {
        self.api
            .delete_record_set(&zone.id, &record_set.id)
            .await
            .map_err(|e| RecordSetError::DeleteFailed {
                id: record_set.id.clone(),
                reason: e.to_string(),
            })?;

        debug!(name = %record_set.name, "Deleted TXT recordset");
        Ok(())
    }

    /// Remove one value from the challenge recordset.
    ///
    /// Locates the first exact match of `value` and removes it. When the
    /// resulting list is empty the whole recordset is deleted - but only if
    /// `delete_record_set_if_empty` is set; otherwise the recordset is left
    /// untouched and the removal fails.
    ///
    /// # Errors
    ///
    /// [`RecordSetError::ValueNotFound`] when neither the recordset nor the
    /// value exists, [`RecordSetError::LastValueDeletionRejected`] when the
    /// last value would be removed without opting into recordset deletion,
    /// plus the failure modes of the underlying lookup, update and delete.
    pub async fn remove_txt_value(
        &self,
        zone: &Zone,
        value: &str,
        delete_record_set_if_empty: bool,
    ) -> Result<RemoveOutcome, RecordSetError> {
        let name = self.record_name(&zone.name);

        let Some(record_set) = self.get_txt_record_set(zone).await? else {
            return Err(RecordSetError::ValueNotFound { name });
        };

        let Some(changed) = values::remove_value(&record_set.records, value) else {
            return Err(RecordSetError::ValueNotFound { name });
        };

        if changed.is_empty() {
            if delete_record_set_if_empty {
                self.delete_record_set(zone, &record_set).await?;
                Ok(RemoveOutcome::Deleted)
            } else {
                Err(RecordSetError::LastValueDeletionRejected { name })
            }
        } else {
            let updated = self.update_txt_values(zone, &record_set, changed).await?;
            Ok(RemoveOutcome::Updated(updated))
        }
    }
}
