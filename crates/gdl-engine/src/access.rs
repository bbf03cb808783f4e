//! # Access-Role Filtering
//!
//! Narrows a link collection to what a given audience may see. Links with
//! no access roles are public and survive every filter; links carrying
//! roles survive only when the requested role is among them.
//!
//! Shorthand tokens expand by convention, not by enum lookup: `sampler`
//! becomes `untp:accessRole#Sampler` whether or not "sampler" is a
//! recognised role. Rejecting unknown shorthands here would turn a data
//! problem into a resolution failure.

use gdl_core::LinkRecord;

/// Expand a role token into its full URI form.
///
/// Tokens that already contain a `:` are passed through unchanged.
/// Anything else is titlecased (first character uppercase, remainder
/// lowercase) and prefixed with the `untp:accessRole#` convention.
pub fn normalise_role(token: &str) -> String {
    if token.contains(':') {
        return token.to_string();
    }
    let mut chars = token.chars();
    match chars.next() {
        None => token.to_string(),
        Some(first) => format!(
            "untp:accessRole#{}{}",
            first.to_uppercase(),
            chars.as_str().to_lowercase()
        ),
    }
}

/// Filter a link collection by a requested access role.
///
/// `None` or an empty token is the identity filter. Otherwise the token
/// is normalised and every public link, plus every link whose role set
/// contains the normalised token, is kept. Input records are never
/// mutated; the survivors are cloned out.
pub fn filter_by_access_role(records: &[LinkRecord], role: Option<&str>) -> Vec<LinkRecord> {
    let token = match role {
        Some(t) if !t.is_empty() => normalise_role(t),
        _ => return records.to_vec(),
    };

    records
        .iter()
        .filter(|record| {
            record.is_public()
                || record
                    .access_role
                    .as_ref()
                    .is_some_and(|roles| roles.iter().any(|r| r == &token))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted(role_uri: &str) -> LinkRecord {
        let mut record = LinkRecord::new("https://example.com", "gs1:pip");
        record.access_role = Some(vec![role_uri.to_string()]);
        record
    }

    #[test]
    fn test_normalise_passes_full_uris_through() {
        assert_eq!(normalise_role("untp:accessRole#Auditor"), "untp:accessRole#Auditor");
        assert_eq!(normalise_role("https://example.org/roles/x"), "https://example.org/roles/x");
    }

    #[test]
    fn test_normalise_titlecases_shorthand() {
        assert_eq!(normalise_role("auditor"), "untp:accessRole#Auditor");
        assert_eq!(normalise_role("AUDITOR"), "untp:accessRole#Auditor");
        assert_eq!(normalise_role("aUdItOr"), "untp:accessRole#Auditor");
    }

    #[test]
    fn test_normalise_accepts_unknown_tokens() {
        // convention-based expansion, not an enum lookup
        assert_eq!(normalise_role("zzgobbledygook"), "untp:accessRole#Zzgobbledygook");
    }

    #[test]
    fn test_no_role_is_identity() {
        let records = vec![restricted("untp:accessRole#Auditor")];
        assert_eq!(filter_by_access_role(&records, None).len(), 1);
        assert_eq!(filter_by_access_role(&records, Some("")).len(), 1);
    }

    #[test]
    fn test_public_records_always_survive() {
        let mut public = LinkRecord::new("https://example.com/pub", "gs1:pip");
        public.access_role = Some(Vec::new());
        let records = vec![
            LinkRecord::new("https://example.com/none", "gs1:pip"),
            public,
            restricted("untp:accessRole#Auditor"),
        ];
        let kept = filter_by_access_role(&records, Some("sampler"));
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.is_public()));
    }

    #[test]
    fn test_matching_role_survives() {
        let records = vec![restricted("untp:accessRole#Auditor")];
        let kept = filter_by_access_role(&records, Some("auditor"));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_full_uri_role_matches_verbatim() {
        let records = vec![restricted("untp:accessRole#Auditor")];
        let kept = filter_by_access_role(&records, Some("untp:accessRole#Auditor"));
        assert_eq!(kept.len(), 1);
        // case matters once the token is a full URI
        assert!(filter_by_access_role(&records, Some("untp:accessRole#auditor")).is_empty());
    }

    #[test]
    fn test_input_not_mutated() {
        let records = vec![restricted("untp:accessRole#Auditor")];
        let before = records.clone();
        let _ = filter_by_access_role(&records, Some("sampler"));
        assert_eq!(records, before);
    }
}
