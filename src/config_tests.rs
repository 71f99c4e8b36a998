// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for solver configuration decoding.

#[cfg(test)]
mod tests {
    use crate::config::*;
    use serde_json::json;

    #[test]
    fn test_decode_absent_config_is_default() {
        let config = decode_solver_config(None).unwrap();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_decode_full_config() {
        let raw = json!({
            "accessKeySecretRef": { "name": "otcdns-credentials", "key": "accessKey" },
            "secretKeySecretRef": { "name": "otcdns-credentials", "key": "secretKey" },
            "region": "eu-de",
            "authURL": "https://iam.eu-de.otc.t-systems.com/v3"
        });

        let config = decode_solver_config(Some(&raw)).unwrap();

        assert_eq!(config.access_key_secret_ref.name, "otcdns-credentials");
        assert_eq!(config.access_key_secret_ref.key, "accessKey");
        assert_eq!(config.secret_key_secret_ref.name, "otcdns-credentials");
        assert_eq!(config.secret_key_secret_ref.key, "secretKey");
        assert_eq!(config.region, "eu-de");
        assert_eq!(config.auth_url, "https://iam.eu-de.otc.t-systems.com/v3");
        assert!(config.access_key.is_empty());
        assert!(config.secret_key.is_empty());
    }

    #[test]
    fn test_decode_inline_testing_shortcut() {
        let raw = json!({
            "accessKey": "AKIA-test",
            "secretKey": "swordfish",
            "region": "eu-de",
            "authURL": "https://iam.eu-de.otc.t-systems.com/v3"
        });

        let config = decode_solver_config(Some(&raw)).unwrap();

        assert_eq!(config.access_key, "AKIA-test");
        assert_eq!(config.secret_key, "swordfish");
        assert_eq!(config.access_key_secret_ref, SecretKeySelector::default());
    }

    #[test]
    fn test_decode_partial_config_fills_defaults() {
        let raw = json!({ "region": "eu-nl" });

        let config = decode_solver_config(Some(&raw)).unwrap();

        assert_eq!(config.region, "eu-nl");
        assert!(config.auth_url.is_empty());
    }

    #[test]
    fn test_decode_malformed_config_fails() {
        let raw = json!({ "region": 42 });

        let err = decode_solver_config(Some(&raw)).unwrap_err();
        assert!(err.to_string().contains("Error decoding solver config"));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SolverConfig {
            access_key: String::new(),
            secret_key: String::new(),
            access_key_secret_ref: SecretKeySelector {
                name: "creds".to_string(),
                key: "ak".to_string(),
            },
            secret_key_secret_ref: SecretKeySelector {
                name: "creds".to_string(),
                key: "sk".to_string(),
            },
            region: "eu-de".to_string(),
            auth_url: "https://iam.example/v3".to_string(),
        };

        let raw = serde_json::to_value(&config).unwrap();
        assert_eq!(raw["authURL"], "https://iam.example/v3");

        let decoded = decode_solver_config(Some(&raw)).unwrap();
        assert_eq!(decoded, config);
    }
}
