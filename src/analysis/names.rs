//! Display labels for raw weapon and zone identifiers.
//!
//! Raw ids look like `ESPR_RIFLE_BALLISTIC_01` or `GLSN_MICROTECH_02`. The
//! labels are lossy: several raw ids can share one label, which is why the
//! weapon and zone filters match on groups of raw ids.

use crate::api::models::UNKNOWN;

const UNKNOWN_LABEL: &str = "UNKNOWN";

const WEAPON_PREFIXES: &[&str] = &["ESPR_", "GLSN_"];
const ZONE_PREFIXES: &[&str] = &["GLSN_"];

pub fn normalize_weapon_name(raw: &str) -> String {
    normalize(raw, WEAPON_PREFIXES)
}

pub fn normalize_zone_name(raw: &str) -> String {
    normalize(raw, ZONE_PREFIXES)
}

fn normalize(raw: &str, prefixes: &[&str]) -> String {
    if raw.is_empty() || raw == UNKNOWN {
        return UNKNOWN_LABEL.to_string();
    }

    // Prefixes are stripped in order, each at most once
    let mut name = raw;
    for prefix in prefixes {
        if let Some(rest) = name.strip_prefix(prefix) {
            name = rest;
        }
    }

    let name = strip_numeric_suffix(name);
    let label = name.replace('_', " ").to_uppercase();

    if label.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        label
    }
}

/// Drops a trailing `_<digits>` variant suffix.
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rfind('_') {
        Some(idx) => {
            let digits = &name[idx + 1..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                &name[..idx]
            } else {
                name
            }
        }
        None => name,
    }
}
