//! Dashboard form decoding.
//!
//! The save form submits the credential table as indexed pairs
//! (`uuid0`/`domain0`, `uuid1`/`domain1`, …). Decoding happens here so the
//! config store only ever sees an ordered `Vec<CredentialEntry>`, never
//! raw form keys.

use std::collections::HashMap;

use crate::config::{ConfigUpdate, CredentialEntry};

/// Build a [`ConfigUpdate`] from the submitted form fields.
///
/// Scalar fields pass through as raw strings; the store parses the numeric
/// ones and keeps the previous value when a field does not parse.
pub fn update_from_form(fields: &HashMap<String, String>) -> ConfigUpdate {
    let scalar = |key: &str| fields.get(key).cloned().unwrap_or_default();
    ConfigUpdate {
        web_port: scalar("web_port"),
        node_port: scalar("node_port"),
        source_url: scalar("source_url"),
        prefix_filter: scalar("prefix_filter"),
        credentials: parse_credential_rows(fields),
    }
}

/// Collect the indexed credential rows, preserving submission order.
///
/// Scans index 0, 1, 2, … and stops at the first index whose pair and the
/// next index's uuid are all empty. The lookahead rule is kept exactly as
/// shipped, including its quirk: a populated row directly after a
/// two-blank gap is never reached. Rows with at least one non-empty field
/// are kept.
pub fn parse_credential_rows(fields: &HashMap<String, String>) -> Vec<CredentialEntry> {
    let value = |key: String| fields.get(&key).map(String::as_str).unwrap_or("");

    let mut rows = Vec::new();
    let mut index = 0usize;
    loop {
        let uuid = value(format!("uuid{}", index));
        let domain = value(format!("domain{}", index));
        if uuid.is_empty() && domain.is_empty() && value(format!("uuid{}", index + 1)).is_empty() {
            break;
        }
        if !uuid.is_empty() || !domain.is_empty() {
            rows.push(CredentialEntry::new(uuid, domain));
        }
        index += 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn collects_rows_in_index_order() {
        let form = fields(&[
            ("uuid0", "u0"),
            ("domain0", "d0"),
            ("uuid1", "u1"),
            ("domain1", "d1"),
        ]);
        assert_eq!(
            parse_credential_rows(&form),
            vec![
                CredentialEntry::new("u0", "d0"),
                CredentialEntry::new("u1", "d1"),
            ]
        );
    }

    #[test]
    fn half_empty_rows_are_kept() {
        let form = fields(&[("uuid0", "u0"), ("domain0", ""), ("domain1", "d1")]);
        assert_eq!(
            parse_credential_rows(&form),
            vec![
                CredentialEntry::new("u0", ""),
                CredentialEntry::new("", "d1"),
            ]
        );
    }

    #[test]
    fn single_blank_row_is_skipped_when_next_uuid_is_populated() {
        // Row 1 is fully blank but row 2's uuid keeps the scan alive.
        let form = fields(&[("uuid0", "u0"), ("uuid2", "u2"), ("domain2", "d2")]);
        assert_eq!(
            parse_credential_rows(&form),
            vec![
                CredentialEntry::new("u0", ""),
                CredentialEntry::new("u2", "d2"),
            ]
        );
    }

    #[test]
    fn lookahead_stop_drops_row_after_adjacent_gap() {
        // Row 1 is blank and row 2 has no uuid, so the scan stops at
        // index 1 and row 2's domain is never read. Shipped behavior,
        // pinned here on purpose.
        let form = fields(&[("uuid0", "u0"), ("domain2", "d2")]);
        assert_eq!(parse_credential_rows(&form), vec![CredentialEntry::new("u0", "")]);
    }

    #[test]
    fn empty_form_yields_no_rows() {
        assert!(parse_credential_rows(&HashMap::new()).is_empty());
    }

    #[test]
    fn update_passes_scalars_through_raw() {
        let form = fields(&[
            ("web_port", "2222"),
            ("node_port", "not-a-number"),
            ("source_url", "https://ips.example.net/list.txt"),
            ("prefix_filter", "1.1|2.2"),
            ("uuid0", "u0"),
            ("domain0", "d0"),
        ]);
        let update = update_from_form(&form);
        assert_eq!(update.web_port, "2222");
        assert_eq!(update.node_port, "not-a-number");
        assert_eq!(update.source_url, "https://ips.example.net/list.txt");
        assert_eq!(update.prefix_filter, "1.1|2.2");
        assert_eq!(update.credentials, vec![CredentialEntry::new("u0", "d0")]);
    }
}
