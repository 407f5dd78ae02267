//! ICMP Type Labels
//! Fixed lookup from exported ICMP type codes to readable names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Label for absent codes and codes outside the table.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Code → label pairs, in table order.
pub const ICMP_TYPE_TABLE: [(&str, &str); 8] = [
    ("0.0", "Echo Reply (ICMP)"),
    ("3.0", "Destination Unreachable (ICMP)"),
    ("5.0", "Redirect (ICMP)"),
    ("8.0", "Echo Request (ICMP)"),
    ("11.0", "Time Exceeded (ICMP)"),
    ("12.0", "Timestamp Request (ICMP)"),
    ("13.0", "Timestamp Reply (ICMP)"),
    (UNKNOWN_TYPE, UNKNOWN_TYPE),
];

static CODE_TO_LABEL: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ICMP_TYPE_TABLE.iter().copied().collect());

static LABEL_TO_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ICMP_TYPE_TABLE.iter().map(|&(code, label)| (label, code)).collect());

/// Resolve a code string to its label; anything not in the table is `Unknown`.
pub fn label_for_code(code: &str) -> &'static str {
    CODE_TO_LABEL.get(code).copied().unwrap_or(UNKNOWN_TYPE)
}

/// Reverse lookup, used to render canonical rows back into raw form.
pub fn code_for_label(label: &str) -> Option<&'static str> {
    LABEL_TO_CODE.get(label).copied()
}

/// Whether `code` has an entry of its own (`Unknown` included).
pub fn is_known_code(code: &str) -> bool {
    CODE_TO_LABEL.contains_key(code)
}

/// Every label the table can produce.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    ICMP_TYPE_TABLE.iter().map(|&(_, label)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_code_resolves_to_its_label() {
        for (code, label) in ICMP_TYPE_TABLE {
            assert_eq!(label_for_code(code), label);
        }
    }

    #[test]
    fn codes_outside_table_are_unknown() {
        assert_eq!(label_for_code("4.0"), UNKNOWN_TYPE);
        assert_eq!(label_for_code("8"), UNKNOWN_TYPE);
        assert_eq!(label_for_code(""), UNKNOWN_TYPE);
        assert_eq!(label_for_code("nan"), UNKNOWN_TYPE);
        assert!(!is_known_code("4.0"));
    }

    #[test]
    fn reverse_lookup_round_trips_labels() {
        assert_eq!(code_for_label("Echo Request (ICMP)"), Some("8.0"));
        assert_eq!(code_for_label(UNKNOWN_TYPE), Some(UNKNOWN_TYPE));
        assert_eq!(code_for_label("Echo"), None);
    }

    #[test]
    fn known_labels_include_unknown() {
        let labels: Vec<_> = known_labels().collect();
        assert_eq!(labels.len(), 8);
        assert!(labels.contains(&UNKNOWN_TYPE));
        assert!(labels.contains(&"Time Exceeded (ICMP)"));
    }
}
