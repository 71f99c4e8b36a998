// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the error taxonomy.

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_zone_not_found_error() {
        let error = ZoneError::ZoneNotFound {
            zone: "example.com.".to_string(),
        };

        assert_eq!(error.to_string(), "Zone 'example.com.' not found");
    }

    #[test]
    fn test_ambiguous_zone_error() {
        let error = ZoneError::AmbiguousZone {
            zone: "example.com.".to_string(),
            count: 2,
        };

        assert_eq!(
            error.to_string(),
            "Zone query for 'example.com.' returned 2 zones, expected exactly 1"
        );
    }

    #[test]
    fn test_ambiguous_record_set_error() {
        let error = RecordSetError::AmbiguousRecordSet {
            name: "_acme-challenge.example.com.".to_string(),
            count: 3,
        };

        assert_eq!(
            error.to_string(),
            "Recordset query for '_acme-challenge.example.com.' returned 3 recordsets, \
             expected at most 1"
        );
    }

    #[test]
    fn test_create_failed_error() {
        let error = RecordSetError::CreateFailed {
            name: "_acme-challenge.example.com.".to_string(),
            reason: "HTTP 500".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Failed to create TXT recordset '_acme-challenge.example.com.': HTTP 500"
        );
    }

    #[test]
    fn test_empty_update_rejected_error() {
        let error = RecordSetError::EmptyUpdateRejected {
            id: "rs-1".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Refusing to update recordset 'rs-1' with an empty value list"
        );
    }

    #[test]
    fn test_secret_key_missing_error() {
        let error = ConfigError::SecretKeyMissing {
            namespace: "cert-manager".to_string(),
            name: "otcdns-credentials".to_string(),
            key: "accessKey".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Key 'accessKey' not found in secret 'cert-manager/otcdns-credentials'"
        );
    }

    #[test]
    fn test_transport_api_error() {
        let error = TransportError::Api {
            status: 503,
            url: "https://dns.eu-de.example/v2/zones".to_string(),
            message: "maintenance".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "HTTP 503 from https://dns.eu-de.example/v2/zones: maintenance"
        );
    }

    #[test]
    fn test_transient_classification() {
        // Transport and provider write failures should be retried by the framework
        assert!(SolverError::from(TransportError::Connection {
            url: "https://iam.example/v3/auth/tokens".to_string(),
            reason: "connection refused".to_string(),
        })
        .is_transient());

        assert!(SolverError::from(RecordSetError::UpdateFailed {
            id: "rs-1".to_string(),
            reason: "HTTP 502".to_string(),
        })
        .is_transient());

        assert!(SolverError::from(ZoneError::ZoneListFailed {
            zone: "example.com.".to_string(),
            reason: "timeout".to_string(),
        })
        .is_transient());
    }

    #[test]
    fn test_permanent_classification() {
        // Invariant violations and configuration mistakes must not be retried
        assert!(!SolverError::from(ZoneError::ZoneNotFound {
            zone: "example.com.".to_string(),
        })
        .is_transient());

        assert!(!SolverError::from(RecordSetError::AmbiguousRecordSet {
            name: "_acme-challenge.example.com.".to_string(),
            count: 2,
        })
        .is_transient());

        assert!(!SolverError::from(RecordSetError::LastValueDeletionRejected {
            name: "_acme-challenge.example.com.".to_string(),
        })
        .is_transient());

        assert!(!SolverError::from(ConfigError::ConfigDecodeFailed {
            reason: "invalid type".to_string(),
        })
        .is_transient());
    }

    #[test]
    fn test_status_reasons() {
        let cases: Vec<(SolverError, &str)> = vec![
            (
                ZoneError::ZoneNotFound {
                    zone: "example.com.".to_string(),
                }
                .into(),
                "ZoneNotFound",
            ),
            (
                ZoneError::AmbiguousZone {
                    zone: "example.com.".to_string(),
                    count: 2,
                }
                .into(),
                "AmbiguousZone",
            ),
            (
                RecordSetError::AmbiguousRecordSet {
                    name: "x".to_string(),
                    count: 2,
                }
                .into(),
                "AmbiguousRecordSet",
            ),
            (
                RecordSetError::EmptyUpdateRejected {
                    id: "rs-1".to_string(),
                }
                .into(),
                "EmptyUpdateRejected",
            ),
            (
                RecordSetError::LastValueDeletionRejected {
                    name: "x".to_string(),
                }
                .into(),
                "LastValueDeletionRejected",
            ),
            (
                RecordSetError::ValueNotFound {
                    name: "x".to_string(),
                }
                .into(),
                "ValueNotFound",
            ),
            (
                ConfigError::ConfigDecodeFailed {
                    reason: "bad".to_string(),
                }
                .into(),
                "ConfigDecodeFailed",
            ),
            (
                TransportError::EndpointNotFound {
                    service_type: "dns".to_string(),
                    region: "eu-de".to_string(),
                }
                .into(),
                "EndpointNotFound",
            ),
        ];

        for (error, reason) in cases {
            assert_eq!(error.status_reason(), reason);
        }
    }

    #[test]
    fn test_anyhow_conversion_is_generic() {
        let error: SolverError = anyhow::anyhow!("boom").into();
        assert_eq!(error.status_reason(), "ChallengeOperationFailed");
        assert!(error.is_transient());
    }
}
