//! Synthesized node descriptor.

use serde::Serialize;

use crate::config::{TlsTemplate, TransportTemplate};

/// One fully resolved endpoint: an address from the pool crossed with the
/// active credential.
///
/// Output-only and never persisted. `tls` and `transport` are owned copies
/// taken from the template at synthesis time; a descriptor shares no
/// mutable substructure with the live config or with other descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDescriptor {
    pub packet_encoding: String,
    pub server: String,
    pub server_port: u16,
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub uuid: String,
    pub tls: TlsTemplate,
    pub transport: TransportTemplate,
}
