//! Prefix allow-list filtering for fetched address lists.
//!
//! The filter string is `|`-separated literal prefixes ("104.16|172.67").
//! Matching is case-sensitive `starts_with`, not a pattern language. An
//! empty filter keeps everything.

/// Split a filter string into its non-empty, trimmed prefix tokens.
pub fn parse_prefixes(filter: &str) -> Vec<&str> {
    filter
        .split('|')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// True when `line` survives the allow-list (empty list keeps all lines).
pub fn matches_any(line: &str, prefixes: &[&str]) -> bool {
    prefixes.is_empty() || prefixes.iter().any(|prefix| line.starts_with(prefix))
}

/// Filter a fetched body down to the kept addresses, in fetch order.
/// Lines are trimmed; blank lines are skipped.
pub fn filter_addresses(body: &str, filter: &str) -> Vec<String> {
    let prefixes = parse_prefixes(filter);
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| matches_any(line, &prefixes))
        .map(str::to_string)
        .collect()
}
