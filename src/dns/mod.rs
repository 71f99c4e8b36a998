// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Open Telekom Cloud DNS client.
//!
//! This module provides the transport layer the recordset store is built
//! on. It handles:
//!
//! - Token-based authentication against the identity endpoint ([`auth`])
//! - The DNS v2 REST operations: list zones, list/create/update/delete
//!   recordsets ([`api`])
//! - The wire types those operations exchange ([`types`])
//!
//! # Architecture
//!
//! [`OtcDnsClient`] is built per challenge from an explicit configuration
//! (identity endpoint, region, credentials) and implements the [`DnsApi`]
//! capability trait. Every operation first obtains a valid subject token
//! from the [`auth::Session`] (cached until near expiry), then issues one
//! HTTP round trip. Nothing is cached beyond the token, and nothing is
//! retried.
//!
//! # Example
//!
//! ```rust,no_run
//! use otcdns::dns::OtcDnsClient;
//!
//! # async fn example() -> Result<(), otcdns::errors::TransportError> {
//! let client = OtcDnsClient::new(
//!     "https://iam.eu-de.otc.t-systems.com/v3".to_string(),
//!     "eu-de".to_string(),
//!     "access-key".to_string(),
//!     "secret-key".to_string(),
//! );
//!
//! use otcdns::dns::api::DnsApi;
//! let zones = client.list_zones("example.com.").await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod types;

pub use api::DnsApi;
pub use types::{CreateRecordSetRequest, RecordSet, Zone};

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::sync::Arc;

use crate::errors::TransportError;

/// Client for the Open Telekom Cloud DNS v2 API.
///
/// Holds the HTTP client and the identity session; cloning shares both.
#[derive(Debug, Clone)]
pub struct OtcDnsClient {
    /// HTTP client for API requests
    http: HttpClient,
    /// Identity session providing tokens and the DNS endpoint
    session: Arc<auth::Session>,
}

impl OtcDnsClient {
    /// Create a new client from an explicit configuration.
    ///
    /// `auth_url` is the identity endpoint; `region` selects the DNS
    /// endpoint from the token's service catalog. No network traffic
    /// happens until the first operation.
    #[must_use]
    pub fn new(auth_url: String, region: String, access_key: String, secret_key: String) -> Self {
        let http = HttpClient::new();
        let session = Arc::new(auth::Session::new(
            http.clone(),
            auth_url,
            region,
            access_key,
            secret_key,
        ));

        Self { http, session }
    }
}

#[async_trait]
impl DnsApi for OtcDnsClient {
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>, TransportError> {
        let session = self.session.token().await?;
        api::list_zones(&self.http, &session.token, &session.dns_endpoint, name).await
    }

    async fn list_txt_record_sets(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<Vec<RecordSet>, TransportError> {
        let session = self.session.token().await?;
        api::list_txt_record_sets(
            &self.http,
            &session.token,
            &session.dns_endpoint,
            zone_id,
            name,
        )
        .await
    }

    async fn create_record_set(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet, TransportError> {
        let session = self.session.token().await?;
        api::create_record_set(
            &self.http,
            &session.token,
            &session.dns_endpoint,
            zone_id,
            request,
        )
        .await
    }

    async fn update_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
        values: &[String],
    ) -> Result<RecordSet, TransportError> {
        let session = self.session.token().await?;
        api::update_record_set(
            &self.http,
            &session.token,
            &session.dns_endpoint,
            zone_id,
            record_set_id,
            values,
        )
        .await
    }

    async fn delete_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<(), TransportError> {
        let session = self.session.token().await?;
        api::delete_record_set(
            &self.http,
            &session.token,
            &session.dns_endpoint,
            zone_id,
            record_set_id,
        )
        .await
    }
}
