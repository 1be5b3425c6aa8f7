// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Unit tests for configuration module

#[cfg(test)]
mod test {
    use super::super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_addr, "0.0.0.0:8080");
        assert_eq!(config.http_port, "80");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.tenants.is_empty());
    }

    #[test]
    fn test_tenant_settings_deserialize() {
        let json = r#"{
            "mikrotikHost": "router.example.net",
            "mikrotikPort": "8729",
            "mikrotikUsername": "admin",
            "mikrotikPassword": "secret"
        }"#;

        let settings: TenantRouterSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.mikrotik_host, "router.example.net");
        assert_eq!(settings.mikrotik_port, "8729");
        assert_eq!(settings.mikrotik_username, "admin");
        assert_eq!(settings.mikrotik_password.expose_secret(), "secret");
    }

    #[test]
    fn test_tenant_settings_missing_fields_use_defaults() {
        let settings: TenantRouterSettings =
            serde_json::from_str(r#"{"mikrotikHost": "10.0.0.1"}"#).unwrap();
        assert_eq!(settings.mikrotik_port, "8728");
        assert!(settings.mikrotik_username.is_empty());
        assert!(settings.mikrotik_password.expose_secret().is_empty());
    }

    #[test]
    fn test_parse_multiple_tenants() {
        let tenants = parse_tenants(
            r#"{
                "1": {"mikrotikHost": "192.168.1.1", "mikrotikUsername": "admin"},
                "2": {"mikrotikHost": "hotspot.ddns.net", "mikrotikUsername": "api"}
            }"#,
        );
        assert_eq!(tenants.len(), 2);
        assert_eq!(tenants["2"].mikrotik_host, "hotspot.ddns.net");
    }

    #[test]
    fn test_parse_invalid_tenants_is_empty() {
        assert!(parse_tenants("not json").is_empty());
    }

    #[test]
    fn test_connection_for_known_tenant() {
        let mut config = Config {
            http_port: "8080".to_string(),
            timeout_secs: 5,
            ..Config::default()
        };
        config.tenants = parse_tenants(
            r#"{"t1": {"mikrotikHost": " 203.0.113.5 ", "mikrotikUsername": "admin", "mikrotikPassword": "x"}}"#,
        );

        let conn = config.connection_for("t1").unwrap();
        assert_eq!(conn.host, "203.0.113.5");
        assert_eq!(conn.port, "8728");
        assert_eq!(conn.http_port, "8080");
        assert_eq!(conn.timeout, Duration::from_secs(5));
        assert_eq!(conn.password.expose_secret(), "x");
    }

    #[test]
    fn test_connection_for_unconfigured_tenant() {
        let mut config = Config::default();
        config.tenants = parse_tenants(
            r#"{"no-host": {"mikrotikUsername": "admin"}, "no-user": {"mikrotikHost": "10.0.0.1"}}"#,
        );

        assert!(config.connection_for("no-host").is_none());
        assert!(config.connection_for("no-user").is_none());
        assert!(config.connection_for("missing").is_none());
    }

    #[test]
    fn test_connection_config_builders() {
        let conn = ConnectionConfig::new("10.0.0.1", "8728", "admin", "pw")
            .with_http_port("8081")
            .with_timeout(Duration::from_secs(2));
        assert!(conn.is_configured());
        assert_eq!(conn.http_port, "8081");
        assert_eq!(conn.timeout, Duration::from_secs(2));

        let blank = ConnectionConfig::new("  ", "8728", "admin", "pw");
        assert!(!blank.is_configured());
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let conn = ConnectionConfig::new("10.0.0.1", "8728", "admin", "hunter2");
        assert!(!format!("{conn:?}").contains("hunter2"));
    }
}
