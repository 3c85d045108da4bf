/// Events offered by the filter dropdown, in display order.
pub const EVENT_CATALOG: [&str; 8] = [
    "Xcoders",
    "Coin Quest",
    "Algo Rythms",
    "Caseathon",
    "Reverse Coding",
    "Virtuoso",
    "Thesis Precized",
    "Flip It Quiz It",
];

/// Canonical comparison form of an event name: trimmed, lower-cased, with
/// everything outside `[a-z0-9]` removed. `"Algo-Rythms"` and
/// `"algo rythms"` both become `"algorythms"`.
pub fn normalize_event_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

pub fn is_catalog_event(name: &str) -> bool {
    EVENT_CATALOG.contains(&name)
}
