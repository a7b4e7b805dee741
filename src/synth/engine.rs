//! Node synthesis engine.
//!
//! # Responsibilities
//! - Pick the active credential for "now" (hour-of-day rotation)
//! - Expand the active credential against every pooled address
//! - Hand every descriptor its own copies of the template substructures
//!
//! # Design Decisions
//! - Pure functions of (config, addresses, now): no I/O, no locks. Callers
//!   pass owned snapshots, so the config lock is already released by the
//!   time synthesis runs
//! - An all-empty credential list yields an empty descriptor list, not an
//!   error; the subscription endpoint never fails

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{Config, CredentialEntry};
use crate::synth::descriptor::NodeDescriptor;

/// Wall-clock hour (0–23, UTC) of `now`.
fn hour_of(now: SystemTime) -> u64 {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    (secs / 3600) % 24
}

/// Resolve the credential entry active at `now`.
///
/// The rotation index is `hour mod len`. An entry with an empty uuid at
/// that index falls back to the first entry whose uuid is non-empty; if no
/// entry qualifies, there is no active credential.
pub fn active_credential(entries: &[CredentialEntry], now: SystemTime) -> Option<&CredentialEntry> {
    if entries.is_empty() {
        return None;
    }
    let index = hour_of(now) as usize % entries.len();
    let picked = &entries[index];
    if !picked.uuid.is_empty() {
        return Some(picked);
    }
    entries.iter().find(|entry| !entry.uuid.is_empty())
}

/// Expand the active credential against every address, in address order.
///
/// Each descriptor clones the template's TLS and transport records; the
/// clone gives it its own header map, so overlapping calls can never leak
/// one call's domain into another's descriptors.
pub fn synthesize(config: &Config, addresses: &[String], now: SystemTime) -> Vec<NodeDescriptor> {
    let Some(active) = active_credential(&config.credentials, now) else {
        return Vec::new();
    };

    let template = &config.node_template;
    addresses
        .iter()
        .map(|address| {
            let mut tls = template.tls.clone();
            tls.server_name = active.domain.clone();

            let mut transport = template.transport.clone();
            transport
                .headers
                .insert("Host".to_string(), active.domain.clone());

            NodeDescriptor {
                packet_encoding: template.packet_encoding.clone(),
                server: address.clone(),
                server_port: template.node_port,
                tag: format!("{}-{}", active.domain, address),
                kind: template.kind.clone(),
                uuid: active.uuid.clone(),
                tls,
                transport,
            }
        })
        .collect()
}
