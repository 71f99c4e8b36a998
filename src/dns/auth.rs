// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Identity session for the Open Telekom Cloud DNS API.
//!
//! Tokens are requested from the configured identity endpoint (Keystone v3)
//! with the access/secret key pair as an application credential. The subject
//! token and the DNS service endpoint from the token's catalog are cached
//! until the token is close to expiring; every API call goes through
//! [`Session::token`] and transparently re-authenticates when needed.
//!
//! There is no ambient credential loading: a session is built from an
//! explicit configuration, one per challenge.

use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::debug;

use crate::constants::{CATALOG_SERVICE_TYPE_DNS, TOKEN_RENEWAL_MARGIN_SECS};
use crate::errors::TransportError;

/// Header carrying the issued subject token
const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";

/// Catalog interface the DNS endpoint is selected from
const ENDPOINT_INTERFACE_PUBLIC: &str = "public";

/// One service entry in the token's service catalog.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogService {
    /// Service type (e.g. `dns`, `compute`)
    #[serde(rename = "type")]
    pub service_type: String,
    /// Endpoints offered for this service
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// One endpoint of a catalog service.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogEndpoint {
    /// Endpoint interface (`public`, `internal`, `admin`)
    #[serde(default)]
    pub interface: String,
    /// Region the endpoint serves
    #[serde(default)]
    pub region: String,
    /// Base URL of the endpoint
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenBody {
    expires_at: DateTime<Utc>,
    #[serde(default)]
    catalog: Vec<CatalogService>,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

/// An issued token together with the resolved DNS endpoint.
#[derive(Debug, Clone)]
pub(crate) struct SessionToken {
    /// Subject token sent as `X-Auth-Token`
    pub token: String,
    /// Base URL of the DNS service for the configured region
    pub dns_endpoint: String,
    /// Expiry of the subject token
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// A token is stale once it is within the renewal margin of expiring.
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        (self.expires_at - now).num_seconds() <= TOKEN_RENEWAL_MARGIN_SECS
    }
}

/// Authenticated session against the identity endpoint.
#[derive(Debug)]
pub struct Session {
    http: HttpClient,
    auth_url: String,
    region: String,
    access_key: String,
    secret_key: String,
    state: RwLock<Option<SessionToken>>,
}

impl Session {
    /// Create a session from an explicit configuration.
    ///
    /// `auth_url` is the identity endpoint (e.g.
    /// `https://iam.eu-de.otc.t-systems.com/v3`); `region` selects the DNS
    /// endpoint from the token's service catalog.
    #[must_use]
    pub fn new(
        http: HttpClient,
        auth_url: String,
        region: String,
        access_key: String,
        secret_key: String,
    ) -> Self {
        Self {
            http,
            auth_url,
            region,
            access_key,
            secret_key,
            state: RwLock::new(None),
        }
    }

    /// Return a valid subject token and the DNS endpoint, authenticating if
    /// the cached token is absent or stale.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the token request fails or the
    /// catalog has no usable DNS endpoint.
    pub(crate) async fn token(&self) -> Result<SessionToken, TransportError> {
        let now = Utc::now();

        if let Some(cached) = self.state.read().await.as_ref() {
            if !cached.is_stale(now) {
                return Ok(cached.clone());
            }
        }

        let mut state = self.state.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(cached) = state.as_ref() {
            if !cached.is_stale(now) {
                return Ok(cached.clone());
            }
        }

        let fresh = self.authenticate().await?;
        *state = Some(fresh.clone());
        Ok(fresh)
    }

    /// Request a new subject token from the identity endpoint.
    async fn authenticate(&self) -> Result<SessionToken, TransportError> {
        let url = format!("{}/auth/tokens", self.auth_url.trim_end_matches('/'));
        let body = json!({
            "auth": {
                "identity": {
                    "methods": ["application_credential"],
                    "application_credential": {
                        "id": self.access_key,
                        "secret": self.secret_key,
                    }
                }
            }
        });

        debug!(endpoint = %url, region = %self.region, "Requesting identity token");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Connection {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Auth {
                endpoint: url,
                reason: format!("HTTP {}: {message}", status.as_u16()),
            });
        }

        let token = response
            .headers()
            .get(SUBJECT_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
            .ok_or_else(|| TransportError::Auth {
                endpoint: url.clone(),
                reason: format!("Response is missing the {SUBJECT_TOKEN_HEADER} header"),
            })?;

        let parsed: TokenResponse =
            response
                .json()
                .await
                .map_err(|e| TransportError::Decode {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;

        let dns_endpoint = select_dns_endpoint(&parsed.token.catalog, &self.region)?;

        debug!(
            endpoint = %dns_endpoint,
            expires_at = %parsed.token.expires_at,
            "Identity token issued"
        );

        Ok(SessionToken {
            token,
            dns_endpoint,
            expires_at: parsed.token.expires_at,
        })
    }
}

/// Select the public DNS endpoint for `region` from a service catalog.
///
/// With an empty `region` the first public DNS endpoint wins.
pub(crate) fn select_dns_endpoint(
    catalog: &[CatalogService],
    region: &str,
) -> Result<String, TransportError> {
    catalog
        .iter()
        .filter(|service| service.service_type == CATALOG_SERVICE_TYPE_DNS)
        .flat_map(|service| service.endpoints.iter())
        .find(|endpoint| {
            endpoint.interface == ENDPOINT_INTERFACE_PUBLIC
                && (region.is_empty() || endpoint.region == region)
        })
        .map(|endpoint| endpoint.url.trim_end_matches('/').to_string())
        .ok_or_else(|| TransportError::EndpointNotFound {
            service_type: CATALOG_SERVICE_TYPE_DNS.to_string(),
            region: region.to_string(),
        })
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod auth_tests;
