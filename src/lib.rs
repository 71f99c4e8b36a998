// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # otcdns - ACME DNS-01 webhook solver for Open Telekom Cloud DNS
//!
//! otcdns resolves ACME DNS-01 challenges by managing TXT records in zones
//! hosted on Open Telekom Cloud DNS, on behalf of cert-manager running in a
//! Kubernetes cluster.
//!
//! ## Overview
//!
//! This library provides the core functionality of the webhook solver:
//!
//! - Present/CleanUp reconciliation of challenge TXT values
//! - Zone resolution and TXT recordset CRUD against the DNS v2 API
//! - Per-issuer configuration decoding and Secret-based credentials
//! - The webhook HTTP surface and Prometheus metrics
//!
//! ## Modules
//!
//! - [`solver`] - Present/CleanUp reconciliation and the `Solver` trait
//! - [`store`] - Zone resolution and the TXT recordset store
//! - [`values`] - Value-list computation for TXT recordsets
//! - [`dns`] - Authenticated client for the DNS v2 API
//! - [`config`] - Per-issuer solver configuration
//! - [`server`] - Webhook HTTP endpoints
//! - [`errors`] - Error taxonomy for challenge operations
//!
//! ## Example
//!
//! ```rust,no_run
//! use otcdns::solver::{ChallengeRequest, OtcDnsSolver, Solver};
//!
//! # async fn example() -> Result<(), otcdns::errors::SolverError> {
//! let client = kube::Client::try_default().await.map_err(anyhow::Error::from)?;
//! let solver = OtcDnsSolver::new(client);
//!
//! let challenge = ChallengeRequest {
//!     resolved_zone: "example.com.".to_string(),
//!     resolved_fqdn: "_acme-challenge.example.com.".to_string(),
//!     key: "tok123".to_string(),
//!     resource_namespace: "cert-manager".to_string(),
//!     config: None,
//! };
//!
//! solver.present(&challenge).await?;
//! solver.cleanup(&challenge).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Idempotent** - Present and CleanUp converge under repeated invocation
//! - **Concurrent-challenge safe** - co-located challenge values coexist on
//!   one owner name; CleanUp removes only its own value
//! - **Stateless** - provider state is re-read fresh on every call

pub mod config;
pub mod constants;
pub mod dns;
pub mod errors;
pub mod metrics;
pub mod server;
pub mod solver;
pub mod store;
pub mod values;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod errors_tests;
