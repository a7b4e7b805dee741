//! Configuration schema definitions.
//!
//! All types derive Serde traits and carry `#[serde(default)]` so a partial
//! or corrupt config file deserializes to zero values, which the defaulting
//! pass then fills in. Defaulting is zero-value gated: a rule only fires
//! when the current value is the type's zero value, so operator-set values
//! survive every reload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder address-source URL installed on first run.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/example/ip-list/main/ips.txt";

/// One rotating (uuid, domain) pair.
///
/// Order inside [`Config::credentials`] is significant: it defines the
/// rotation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CredentialEntry {
    pub uuid: String,
    pub domain: String,
}

impl CredentialEntry {
    pub fn new(uuid: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            domain: domain.into(),
        }
    }

    /// True when both fields are empty (the placeholder row).
    pub fn is_empty(&self) -> bool {
        self.uuid.is_empty() && self.domain.is_empty()
    }
}

/// uTLS fingerprinting sub-record of the TLS template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UtlsTemplate {
    pub enabled: bool,
    pub fingerprint: String,
}

/// TLS portion of the node template. `server_name` is overridden per
/// descriptor at synthesis time; the stored value is only a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TlsTemplate {
    pub enabled: bool,
    pub server_name: String,
    pub insecure: bool,
    pub record_fragment: bool,
    pub utls: UtlsTemplate,
}

/// Transport portion of the node template.
///
/// `headers` always contains at least `Host` and `User-Agent` after the
/// defaulting pass; `Host` is overridden per descriptor at synthesis time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TransportTemplate {
    pub early_data_header_name: String,
    pub headers: HashMap<String, String>,
    pub max_early_data: u32,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Non-rotating parts of every synthesized node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeTemplate {
    pub packet_encoding: String,
    pub node_port: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub tls: TlsTemplate,
    pub transport: TransportTemplate,
}

/// Root configuration, loaded once at startup and mutated only through
/// [`crate::config::ConfigStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Dashboard listen port.
    pub web_port: u16,

    /// URL of the external address list.
    pub source_url: String,

    /// `|`-separated list of literal address prefixes to keep (empty = all).
    pub prefix_filter: String,

    /// Rotation sequence; never empty (placeholder row when cleared).
    pub credentials: Vec<CredentialEntry>,

    /// Template for the non-rotating parts of every descriptor.
    pub node_template: NodeTemplate,
}

impl Config {
    /// Fill in defaults for every zero-valued field. Idempotent; safe to
    /// run on a fully populated config.
    pub fn apply_defaults(&mut self) {
        if self.web_port == 0 {
            self.web_port = 1111;
        }
        if self.source_url.is_empty() {
            self.source_url = DEFAULT_SOURCE_URL.to_string();
        }
        if self.credentials.is_empty() {
            self.credentials = vec![CredentialEntry::default()];
        }

        let tpl = &mut self.node_template;
        if tpl.node_port == 0 {
            tpl.node_port = 443;
        }
        if tpl.packet_encoding.is_empty() {
            tpl.packet_encoding = "xudp".to_string();
        }
        if tpl.kind.is_empty() {
            tpl.kind = "vless".to_string();
        }
        if tpl.tls.utls.fingerprint.is_empty() {
            tpl.tls.utls.fingerprint = "chrome".to_string();
        }

        let transport = &mut tpl.transport;
        if transport.early_data_header_name.is_empty() {
            transport.early_data_header_name = "Sec-WebSocket-Protocol".to_string();
        }
        if transport.max_early_data == 0 {
            transport.max_early_data = 2560;
        }
        if transport.path.is_empty() {
            transport.path = "/".to_string();
        }
        if transport.kind.is_empty() {
            transport.kind = "ws".to_string();
        }
        transport
            .headers
            .entry("Host".to_string())
            .or_insert_with(|| "example.com".to_string());
        transport
            .headers
            .entry("User-Agent".to_string())
            .or_insert_with(|| "Mozilla/5.0".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_zero_config() {
        let mut config = Config::default();
        config.apply_defaults();

        assert_eq!(config.web_port, 1111);
        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.credentials, vec![CredentialEntry::default()]);
        assert_eq!(config.node_template.node_port, 443);
        assert_eq!(config.node_template.packet_encoding, "xudp");
        assert_eq!(config.node_template.kind, "vless");
        assert_eq!(config.node_template.tls.utls.fingerprint, "chrome");

        let transport = &config.node_template.transport;
        assert_eq!(transport.early_data_header_name, "Sec-WebSocket-Protocol");
        assert_eq!(transport.max_early_data, 2560);
        assert_eq!(transport.path, "/");
        assert_eq!(transport.kind, "ws");
        assert_eq!(transport.headers["Host"], "example.com");
        assert_eq!(transport.headers["User-Agent"], "Mozilla/5.0");
    }

    #[test]
    fn defaults_preserve_existing_values() {
        let mut config = Config::default();
        config.web_port = 8080;
        config.source_url = "https://ips.example.net/list.txt".to_string();
        config.credentials = vec![CredentialEntry::new("u1", "d1.example")];
        config
            .node_template
            .transport
            .headers
            .insert("Host".to_string(), "custom.example".to_string());
        config.apply_defaults();

        assert_eq!(config.web_port, 8080);
        assert_eq!(config.source_url, "https://ips.example.net/list.txt");
        assert_eq!(config.credentials.len(), 1);
        assert_eq!(config.credentials[0].uuid, "u1");
        // Existing header values survive; missing ones are added.
        let headers = &config.node_template.transport.headers;
        assert_eq!(headers["Host"], "custom.example");
        assert_eq!(headers["User-Agent"], "Mozilla/5.0");
    }

    #[test]
    fn defaults_are_idempotent() {
        let mut once = Config::default();
        once.apply_defaults();
        let mut twice = once.clone();
        twice.apply_defaults();
        assert_eq!(once, twice);
    }

    #[test]
    fn partial_json_degrades_to_zero_then_defaults() {
        let mut config: Config =
            serde_json::from_str(r#"{"web_port": 9000, "unknown_field": true}"#).unwrap();
        assert_eq!(config.web_port, 9000);
        assert!(config.credentials.is_empty());
        config.apply_defaults();
        assert_eq!(config.web_port, 9000);
        assert_eq!(config.node_template.node_port, 443);
    }
}
