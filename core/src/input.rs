use crate::error::{Error, Result};

/// Resolve `key` against `candidates`: exact match first, then a unique prefix.
/// Matching ignores ASCII case; the candidate is returned as written.
pub fn expand_key(key: &str, candidates: &[&str], kind: &'static str) -> Result<String> {
    let key = key.trim().to_lowercase();

    // 1. Exact match
    if let Some(exact) = candidates.iter().find(|c| c.eq_ignore_ascii_case(&key)) {
        return Ok(exact.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| !key.is_empty() && c.to_lowercase().starts_with(key.as_str()))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(Error::UnknownKey { kind, key }),
        _ => Err(Error::AmbiguousKey {
            kind,
            key,
            candidates: matches.iter().map(|s| s.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_key() {
        let candidates = vec!["cse", "ece", "me", "ce"];

        assert_eq!(expand_key("cse", &candidates, "department").unwrap(), "cse");
        assert_eq!(expand_key("cs", &candidates, "department").unwrap(), "cse");
        assert_eq!(expand_key("ECE", &candidates, "department").unwrap(), "ece");
        assert_eq!(expand_key("m", &candidates, "department").unwrap(), "me");

        // "ce" is exact even though "cse" does not share the prefix
        assert_eq!(expand_key("ce", &candidates, "department").unwrap(), "ce");

        // Ambiguous
        assert!(matches!(
            expand_key("c", &candidates, "department"),
            Err(Error::AmbiguousKey { .. })
        ));

        // Unknown
        assert!(matches!(
            expand_key("x", &candidates, "department"),
            Err(Error::UnknownKey { .. })
        ));
        assert!(expand_key("", &candidates, "department").is_err());
    }

    #[test]
    fn test_expand_key_keeps_candidate_case() {
        let candidates = vec!["PHY", "chem"];

        assert_eq!(expand_key("PHY", &candidates, "department").unwrap(), "PHY");
        assert_eq!(expand_key("phy", &candidates, "department").unwrap(), "PHY");
        assert_eq!(expand_key("P", &candidates, "department").unwrap(), "PHY");
        assert_eq!(expand_key("CH", &candidates, "department").unwrap(), "chem");
    }
}
