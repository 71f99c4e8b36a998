// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS v2 API operations.
//!
//! This module defines the [`DnsApi`] capability trait the recordset store
//! is written against, plus the HTTP functions implementing it for the Open
//! Telekom Cloud DNS v2 REST API. No call here retries: every transport
//! failure surfaces to the caller, and the issuing framework decides whether
//! to re-run the whole challenge operation.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::types::{
    CreateRecordSetRequest, RecordSet, RecordSetListResponse, UpdateRecordSetRequest, Zone,
    ZoneListResponse,
};
use crate::constants::DNS_RECORD_TYPE_TXT;
use crate::errors::TransportError;

/// Provider capability the recordset store requires.
///
/// One implementation talks to the real provider ([`super::OtcDnsClient`]);
/// tests substitute an in-memory fake. All listings use exact-name filters,
/// all mutation is by zone ID and recordset ID with full value-list
/// replacement.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// List hosted zones whose name matches `name` exactly.
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>, TransportError>;

    /// List TXT recordsets in `zone_id` whose owner name matches `name` exactly.
    async fn list_txt_record_sets(
        &self,
        zone_id: &str,
        name: &str,
    ) -> Result<Vec<RecordSet>, TransportError>;

    /// Create a recordset in `zone_id`.
    async fn create_record_set(
        &self,
        zone_id: &str,
        request: &CreateRecordSetRequest,
    ) -> Result<RecordSet, TransportError>;

    /// Replace the value list of an existing recordset.
    async fn update_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
        values: &[String],
    ) -> Result<RecordSet, TransportError>;

    /// Delete a recordset by ID.
    async fn delete_record_set(
        &self,
        zone_id: &str,
        record_set_id: &str,
    ) -> Result<(), TransportError>;
}

/// Build an absolute API URL under the DNS endpoint.
fn api_url(endpoint: &str, path: &str) -> Result<Url, TransportError> {
    let joined = format!("{endpoint}{path}");
    Url::parse(&joined).map_err(|e| TransportError::Connection {
        url: joined,
        reason: e.to_string(),
    })
}

/// Decode a response body, attributing failures to the request URL.
fn parse_json<T: DeserializeOwned>(url: &Url, body: &str) -> Result<T, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Execute a request against the DNS API.
///
/// Attaches the subject token, sends the optional JSON body, and maps
/// non-success statuses to [`TransportError::Api`]. Returns the raw response
/// body.
pub(crate) async fn dns_request<T: Serialize + std::fmt::Debug>(
    http: &HttpClient,
    token: &str,
    method: &str,
    url: &Url,
    body: Option<&T>,
) -> Result<String, TransportError> {
    debug!(method = %method, url = %url, body = ?body, "DNS API request");

    let mut request = match method {
        "GET" => http.get(url.clone()),
        "POST" => {
            let mut req = http.post(url.clone());
            if let Some(body_data) = body {
                req = req.json(body_data);
            }
            req
        }
        "PUT" => {
            let mut req = http.put(url.clone());
            if let Some(body_data) = body {
                req = req.json(body_data);
            }
            req
        }
        "DELETE" => http.delete(url.clone()),
        other => {
            return Err(TransportError::Connection {
                url: url.to_string(),
                reason: format!("Unsupported HTTP method: {other}"),
            })
        }
    };

    request = request.header("X-Auth-Token", token);

    let response = request.send().await.map_err(|e| TransportError::Connection {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    if !status.is_success() {
        debug!(method = %method, url = %url, status = %status, "DNS API request failed");
        return Err(TransportError::Api {
            status: status.as_u16(),
            url: url.to_string(),
            message: text,
        });
    }

    Ok(text)
}

/// `GET /v2/zones?name=` - exact-name zone listing.
pub(crate) async fn list_zones(
    http: &HttpClient,
    token: &str,
    endpoint: &str,
    name: &str,
) -> Result<Vec<Zone>, TransportError> {
    let mut url = api_url(endpoint, "/v2/zones")?;
    url.query_pairs_mut().append_pair("name", name);

    let body = dns_request::<()>(http, token, "GET", &url, None).await?;
    let parsed: ZoneListResponse = parse_json(&url, &body)?;
    Ok(parsed.zones)
}

/// `GET /v2/zones/{id}/recordsets?type=TXT&name=` - exact-name TXT listing.
pub(crate) async fn list_txt_record_sets(
    http: &HttpClient,
    token: &str,
    endpoint: &str,
    zone_id: &str,
    name: &str,
) -> Result<Vec<RecordSet>, TransportError> {
    let mut url = api_url(endpoint, &format!("/v2/zones/{zone_id}/recordsets"))?;
    url.query_pairs_mut()
        .append_pair("type", DNS_RECORD_TYPE_TXT)
        .append_pair("name", name);

    let body = dns_request::<()>(http, token, "GET", &url, None).await?;
    let parsed: RecordSetListResponse = parse_json(&url, &body)?;
    Ok(parsed.recordsets)
}

/// `POST /v2/zones/{id}/recordsets` - create a recordset.
pub(crate) async fn create_record_set(
    http: &HttpClient,
    token: &str,
    endpoint: &str,
    zone_id: &str,
    request: &CreateRecordSetRequest,
) -> Result<RecordSet, TransportError> {
    let url = api_url(endpoint, &format!("/v2/zones/{zone_id}/recordsets"))?;

    let body = dns_request(http, token, "POST", &url, Some(request)).await?;
    parse_json(&url, &body)
}

/// `PUT /v2/zones/{id}/recordsets/{rid}` - replace the value list.
pub(crate) async fn update_record_set(
    http: &HttpClient,
    token: &str,
    endpoint: &str,
    zone_id: &str,
    record_set_id: &str,
    values: &[String],
) -> Result<RecordSet, TransportError> {
    let url = api_url(
        endpoint,
        &format!("/v2/zones/{zone_id}/recordsets/{record_set_id}"),
    )?;
    let request = UpdateRecordSetRequest {
        records: values.to_vec(),
    };

    let body = dns_request(http, token, "PUT", &url, Some(&request)).await?;
    parse_json(&url, &body)
}

/// `DELETE /v2/zones/{id}/recordsets/{rid}` - delete a recordset.
pub(crate) async fn delete_record_set(
    http: &HttpClient,
    token: &str,
    endpoint: &str,
    zone_id: &str,
    record_set_id: &str,
) -> Result<(), TransportError> {
    let url = api_url(
        endpoint,
        &format!("/v2/zones/{zone_id}/recordsets/{record_set_id}"),
    )?;

    dns_request::<()>(http, token, "DELETE", &url, None).await?;
    Ok(())
}
