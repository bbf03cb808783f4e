//! # Resolution Precedence Matching
//!
//! Selects the single link record that best answers a request's
//! descriptive attributes. The fallback order is a strict precedence
//! ladder — sequential guarded lookups that short-circuit on the first
//! level with a hit — not a scored match. Generalising this into a
//! weighted matcher would silently change the tie-break semantics.
//!
//! Within every level, records are scanned in **reverse** registration
//! order: when two records satisfy the same level, the last-registered
//! one wins.

use serde::{Deserialize, Serialize};

use gdl_core::LinkRecord;

/// A client-preferred `(language, context)` pair, ordered by preference
/// in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageContext {
    pub iana_language: String,
    pub context: String,
}

impl LanguageContext {
    pub fn new(iana_language: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            iana_language: iana_language.into(),
            context: context.into(),
        }
    }
}

/// Walk the precedence ladder and pick one record.
///
/// `link_type` is the requested relation token (`None` when the request
/// named no link type at all — the literal `all` never reaches this
/// function). `candidates` and `mime_types` come from content
/// negotiation, ordered by client preference. All attribute comparisons
/// are case-insensitive.
///
/// Levels, first hit wins:
///
/// 1. link type + (language, context) pair + mime type
/// 2. link type + pair + record is the scope's mime default
/// 3. link type + pair
/// 4. link type + language + record is the scope's context default
/// 5. link type + language
/// 6. link type + record is the scope's language default
/// 7. link type alone
/// 8. record is the global default link type (only without a requested
///    link type)
///
/// Returns `None` when no level matches anything.
pub fn select_record<'a>(
    records: &'a [LinkRecord],
    link_type: Option<&str>,
    candidates: &[LanguageContext],
    mime_types: &[String],
) -> Option<&'a LinkRecord> {
    let Some(requested) = link_type else {
        return last_match(records, |r| r.default_link_type);
    };

    let pair_matches = |r: &LinkRecord| {
        candidates.iter().any(|c| {
            r.iana_language.eq_ignore_ascii_case(&c.iana_language)
                && r.context.eq_ignore_ascii_case(&c.context)
        })
    };
    let language_matches = |r: &LinkRecord| {
        candidates
            .iter()
            .any(|c| r.iana_language.eq_ignore_ascii_case(&c.iana_language))
    };
    let mime_matches = |r: &LinkRecord| {
        mime_types
            .iter()
            .any(|m| r.mime_type.eq_ignore_ascii_case(m))
    };
    let type_matches = |r: &LinkRecord| r.link_type.matches(requested);

    last_match(records, |r| type_matches(r) && pair_matches(r) && mime_matches(r))
        .or_else(|| {
            last_match(records, |r| {
                type_matches(r) && pair_matches(r) && r.default_mime_type
            })
        })
        .or_else(|| last_match(records, |r| type_matches(r) && pair_matches(r)))
        .or_else(|| {
            last_match(records, |r| {
                type_matches(r) && language_matches(r) && r.default_context
            })
        })
        .or_else(|| last_match(records, |r| type_matches(r) && language_matches(r)))
        .or_else(|| {
            last_match(records, |r| type_matches(r) && r.default_iana_language)
        })
        .or_else(|| last_match(records, type_matches))
}

/// The last record (in registration order) satisfying the predicate,
/// among active records.
fn last_match<'a>(
    records: &'a [LinkRecord],
    predicate: impl Fn(&LinkRecord) -> bool,
) -> Option<&'a LinkRecord> {
    records.iter().rev().find(|r| r.active && predicate(r))
}
