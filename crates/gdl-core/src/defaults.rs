//! # Scope-Default Enforcement
//!
//! Keeps exactly one "default" link per scope. The four default flags form
//! a hierarchy of increasingly specific scopes:
//!
//! 1. `defaultLinkType` — one per record set.
//! 2. `defaultIanaLanguage` — one per `linkType`.
//! 3. `defaultContext` — one per `linkType` + `ianaLanguage`.
//! 4. `defaultMimeType` — one per `linkType` + `ianaLanguage` + `context`.
//!
//! Scope keys compare case-insensitively. Only active links participate;
//! inactive links always carry all-false flags. Within a scope, when more
//! than one link claims a flag the **last** claimant in registration order
//! keeps it; when none claims it the **first** active member is promoted.
//!
//! Scopes are computed as explicit string keys into index maps over the
//! flat slice — grouping never builds a nested structure.
//!
//! The pass is idempotent: re-running it on its own output changes
//! nothing.

use std::collections::HashMap;

use crate::record::LinkRecord;

/// Normalise all four default flags across the collection, in place.
///
/// Runs the fixed sequence: inactive links are cleared first, then each
/// flag is enforced per its scope. Empty input is a no-op.
pub fn enforce_scope_defaults(records: &mut [LinkRecord]) {
    if records.is_empty() {
        return;
    }

    for record in records.iter_mut() {
        if !record.active {
            record.clear_default_flags();
        }
    }

    enforce_flag(
        records,
        |_| String::new(),
        |r| r.default_link_type,
        |r, v| r.default_link_type = v,
    );
    enforce_flag(
        records,
        |r| r.link_type.as_str().to_lowercase(),
        |r| r.default_iana_language,
        |r, v| r.default_iana_language = v,
    );
    enforce_flag(
        records,
        |r| {
            format!(
                "{}|{}",
                r.link_type.as_str().to_lowercase(),
                r.iana_language.to_lowercase()
            )
        },
        |r| r.default_context,
        |r, v| r.default_context = v,
    );
    enforce_flag(
        records,
        |r| {
            format!(
                "{}|{}|{}",
                r.link_type.as_str().to_lowercase(),
                r.iana_language.to_lowercase(),
                r.context.to_lowercase()
            )
        },
        |r| r.default_mime_type,
        |r, v| r.default_mime_type = v,
    );
}

/// Enforce one flag within each scope group independently.
///
/// Active members of a scope are collected in registration order; the
/// keeper is the last member with the flag set, or the first member when
/// none is set. Scopes with zero active members are skipped.
fn enforce_flag(
    records: &mut [LinkRecord],
    scope_key: impl Fn(&LinkRecord) -> String,
    get: impl Fn(&LinkRecord) -> bool,
    set: impl Fn(&mut LinkRecord, bool),
) {
    let mut scopes: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.active {
            scopes.entry(scope_key(record)).or_default().push(idx);
        }
    }

    for members in scopes.values() {
        let keeper = members
            .iter()
            .rev()
            .find(|&&idx| get(&records[idx]))
            .copied()
            .unwrap_or(members[0]);
        for &idx in members {
            set(&mut records[idx], idx == keeper);
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::record::LinkRecord;
    use proptest::prelude::*;

    /// Strategy for small record sets with arbitrary flag claims.
    fn record_set() -> impl Strategy<Value = Vec<LinkRecord>> {
        let one = (
            prop_oneof![Just("gs1:pip"), Just("gs1:dpp"), Just("gs1:epil")],
            prop_oneof![Just("en"), Just("fr"), Just("")],
            prop_oneof![Just("us"), Just("gb"), Just("")],
            prop_oneof![Just("text/html"), Just("application/json"), Just("")],
            any::<bool>(),
            any::<[bool; 4]>(),
        )
            .prop_map(|(lt, lang, ctx, mime, active, flags)| {
                let mut record = LinkRecord::new("https://example.com", lt);
                record.iana_language = lang.to_string();
                record.context = ctx.to_string();
                record.mime_type = mime.to_string();
                record.active = active;
                record.default_link_type = flags[0];
                record.default_iana_language = flags[1];
                record.default_context = flags[2];
                record.default_mime_type = flags[3];
                record
            });
        prop::collection::vec(one, 0..12)
    }

    fn count_per_scope(
        records: &[LinkRecord],
        scope_key: impl Fn(&LinkRecord) -> String,
        get: impl Fn(&LinkRecord) -> bool,
    ) -> Vec<(usize, usize)> {
        let mut scopes: std::collections::HashMap<String, (usize, usize)> =
            std::collections::HashMap::new();
        for record in records.iter().filter(|r| r.active) {
            let entry = scopes.entry(scope_key(record)).or_insert((0, 0));
            entry.0 += 1;
            if get(record) {
                entry.1 += 1;
            }
        }
        scopes.into_values().collect()
    }

    proptest! {
        /// Re-running the pass on its own output changes nothing.
        #[test]
        fn enforce_is_idempotent(mut records in record_set()) {
            enforce_scope_defaults(&mut records);
            let once = records.clone();
            enforce_scope_defaults(&mut records);
            prop_assert_eq!(once, records);
        }

        /// Every populated scope holds exactly one default among active
        /// records, for each of the four flags.
        #[test]
        fn exactly_one_default_per_scope(mut records in record_set()) {
            enforce_scope_defaults(&mut records);
            for (members, defaults) in count_per_scope(&records, |_| String::new(), |r| r.default_link_type) {
                prop_assert!(members == 0 || defaults == 1);
            }
            for (members, defaults) in count_per_scope(
                &records,
                |r| r.link_type.as_str().to_lowercase(),
                |r| r.default_iana_language,
            ) {
                prop_assert!(members == 0 || defaults == 1);
            }
            for (members, defaults) in count_per_scope(
                &records,
                |r| format!("{}|{}", r.link_type.as_str().to_lowercase(), r.iana_language.to_lowercase()),
                |r| r.default_context,
            ) {
                prop_assert!(members == 0 || defaults == 1);
            }
            for (members, defaults) in count_per_scope(
                &records,
                |r| format!(
                    "{}|{}|{}",
                    r.link_type.as_str().to_lowercase(),
                    r.iana_language.to_lowercase(),
                    r.context.to_lowercase()
                ),
                |r| r.default_mime_type,
            ) {
                prop_assert!(members == 0 || defaults == 1);
            }
        }

        /// Inactive records never keep a default flag.
        #[test]
        fn inactive_records_all_false(mut records in record_set()) {
            enforce_scope_defaults(&mut records);
            for record in records.iter().filter(|r| !r.active) {
                prop_assert!(!record.default_link_type);
                prop_assert!(!record.default_iana_language);
                prop_assert!(!record.default_context);
                prop_assert!(!record.default_mime_type);
            }
        }
    }
}
