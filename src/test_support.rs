// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`DnsApi`] fake shared by the unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::constants::{CHALLENGE_RECORD_TTL_SECS, DNS_RECORD_DESCRIPTION, DNS_RECORD_TYPE_TXT};
use crate::dns::types::{CreateRecordSetRequest, RecordSet, Zone};
use crate::dns::DnsApi;
use crate::errors::TransportError;

/// In-memory provider state with the same lookup semantics as the real API.
pub(crate) struct MockDnsApi {
    zones: Vec<Zone>,
    record_sets: Mutex<Vec<RecordSet>>,
    next_id: AtomicU64,
    /// Number of update calls that reached the provider
    pub update_calls: AtomicU64,
}

impl MockDnsApi {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            record_sets: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            update_calls: AtomicU64::new(0),
        }
    }

    /// Provider hosting a single zone `name` with ID `zone-1`.
    pub fn with_zone(name: &str) -> Self {
        let mut mock = Self::new();
        mock.add_zone("zone-1", name);
        mock
    }

    pub fn add_zone(&mut self, id: &str, name: &str) {
        self.zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    /// Seed a TXT recordset directly, bypassing the create path.
    pub fn insert_record_set(&self, zone_id: &str, name: &str, records: &[&str]) -> String {
        let id = format!("rs-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.record_sets.lock().unwrap().push(RecordSet {
            id: id.clone(),
            zone_id: zone_id.to_string(),
            name: name.to_string(),
            record_type: DNS_RECORD_TYPE_TXT.to_string(),
            ttl: CHALLENGE_RECORD_TTL_SECS,
            records: records.iter().map(ToString::to_string).collect(),
            status: Some("ACTIVE".to_string()),
            description: Some(DNS_RECORD_DESCRIPTION.to_string()),
        });
        id
    }

    /// Current recordset for `name`, if any.
    pub fn find_by_name(&self, name: &str) -> Option<RecordSet> {
        self.record_sets
            .lock()
            .unwrap()
            .iter()
            .find(|rs| rs.name == name)
            .cloned()
    }

    pub fn record_set_count(&self) -> usize {
        self.record_sets.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>, TransportError> {
        Ok(self
            .zones
            .iter()
            .filter(|z| z.name == name)
            .cloned()
            .collect())
    }

    async fn list_txt_record_sets(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<Vec<RecordSet>, TransportError> {
        Ok(self
            .record_sets
            .lock()
            .unwrap()
            .iter()
            .filter(|rs| {
                rs.zone_id == zone_id && rs.record_type == DNS_RECORD_TYPE_TXT && rs.name == name
            })
            .cloned()
            .collect())
    }

    async fn create_record_set(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet, TransportError> {
        let id = format!("rs-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let record_set = RecordSet {
            id,
            zone_id: zone_id.to_string(),
            name: request.name.clone(),
            record_type: request.record_type.clone(),
            ttl: request.ttl,
            records: request.records.clone(),
            status: Some("PENDING_CREATE".to_string()),
            description: Some(request.description.clone()),
        };
        self.record_sets.lock().unwrap().push(record_set.clone());
        Ok(record_set)
    }

    async fn update_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
        values: &[String],
    ) -> Result<RecordSet, TransportError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);

        let mut record_sets = self.record_sets.lock().unwrap();
        let record_set = record_sets
            .iter_mut()
            .find(|rs| rs.zone_id == zone_id && rs.id == record_set_id)
            .ok_or_else(|| TransportError::Api {
                status: 404,
                url: format!("/v2/zones/{zone_id}/recordsets/{record_set_id}"),
                message: "recordset not found".to_string(),
            })?;

        record_set.records = values.to_vec();
        Ok(record_set.clone())
    }

    async fn delete_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<(), TransportError> {
        let mut record_sets = self.record_sets.lock().unwrap();
        let before = record_sets.len();
        record_sets.retain(|rs| !(rs.zone_id == zone_id && rs.id == record_set_id));

        if record_sets.len() == before {
            return Err(TransportError::Api {
                status: 404,
                url: format!("/v2/zones/{zone_id}/recordsets/{record_set_id}"),
                message: "recordset not found".to_string(),
            });
        }
        Ok(())
    }
}
