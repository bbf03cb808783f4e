//! # Linkset Construction
//!
//! Groups raw link records into the nested linkset document (RFC 9264
//! shape) and the flat HTTP-Link string. The document maps
//! extension-relation URIs — minted from the vocabulary domain and the
//! link-type suffix — to ordered lists of target descriptors, anchored at
//! the canonical identifier URL.
//!
//! The document is a derived view: it is recomputed from the record
//! snapshot on every request and never read back from storage.
//!
//! Version history participates too: a change that carries a previous
//! target URL becomes a `predecessor-version` descriptor appended after
//! the group's live entries, so clients can walk superseded targets.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use gdl_core::{IdentifierRecord, LinkRecord, ResolverConfig, VersionHistoryEntry};

use crate::header::{build_canonical_url, ResolutionContext};

/// Internal placeholder for an absent mime type or language. Gives empty
/// values a stable position in sort and group keys; restored to the empty
/// string on output.
const SENTINEL: &str = "xx";

// ─── Wire Types ──────────────────────────────────────────────────────

/// The top-level linkset document: `{"linkset": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSet {
    pub linkset: Vec<LinkContext>,
}

/// One anchor plus its relation map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkContext {
    /// Canonical URL of the identifier the links describe.
    pub anchor: String,
    /// Extension-relation URI to ordered target descriptors.
    #[serde(flatten)]
    pub relations: BTreeMap<String, Vec<LinkTarget>>,
}

/// A `title*` entry: one title in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedTitle {
    pub value: String,
    pub language: String,
}

/// One target descriptor within a relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTarget {
    pub href: String,
    #[serde(default)]
    pub title: String,
    /// Language-tagged titles backing `hreflang`.
    #[serde(rename = "title*", default, skip_serializing_if = "Vec::is_empty")]
    pub title_star: Vec<LocalizedTitle>,
    /// Mime type; empty when the target declared none.
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hreflang: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_role: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// `["predecessor-version"]` on historical entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<Vec<String>>,
}

// ─── HTTP-Link Line ──────────────────────────────────────────────────

/// Flat HTTP-Link rendition of a record's links: one entry per record in
/// input order, plus the trailing canonical `owl:sameAs` entry.
pub fn build_http_link_line(
    identifier: &IdentifierRecord,
    key_code: &str,
    config: &ResolverConfig,
) -> String {
    let ctx = context_for(identifier, key_code);
    let canonical = build_canonical_url(config, &ctx);
    let mut entries: Vec<String> = identifier
        .links
        .iter()
        .map(|record| {
            format!(
                "<{}>; rel=\"{}\"; type=\"{}\"; hreflang=\"{}\"; title=\"{}\"",
                record.target_url,
                record.link_type.as_str(),
                record.mime_type,
                record.iana_language,
                record.title
            )
        })
        .collect();
    entries.push(format!("<{canonical}>; rel=\"owl:sameAs\""));
    entries.join(", ")
}

// ─── Linkset Builder ─────────────────────────────────────────────────

/// Build the linkset context for a stored record's own link collection.
pub fn build_link_set(
    identifier: &IdentifierRecord,
    key_code: &str,
    config: &ResolverConfig,
    history: Option<&[VersionHistoryEntry]>,
) -> LinkContext {
    build_link_set_from(&identifier.links, identifier, key_code, config, history)
}

/// Build the linkset context from an explicit record slice (used when
/// access-role filtering narrowed the collection).
pub fn build_link_set_from(
    records: &[LinkRecord],
    identifier: &IdentifierRecord,
    key_code: &str,
    config: &ResolverConfig,
    history: Option<&[VersionHistoryEntry]>,
) -> LinkContext {
    let ctx = context_for(identifier, key_code);
    let anchor = build_canonical_url(config, &ctx);

    // blank relation tokens cannot be grouped; absent mime/language get
    // the sentinel so they sort and group deterministically
    let mut prepared: Vec<LinkRecord> = records
        .iter()
        .filter(|r| !r.link_type.is_blank())
        .cloned()
        .map(|mut r| {
            if r.mime_type.is_empty() {
                r.mime_type = SENTINEL.to_string();
            }
            if r.iana_language.is_empty() {
                r.iana_language = SENTINEL.to_string();
            }
            r
        })
        .collect();

    prepared.sort_by(|a, b| {
        a.link_type
            .as_str()
            .cmp(b.link_type.as_str())
            .then_with(|| a.context.cmp(&b.context))
            .then_with(|| a.mime_type.cmp(&b.mime_type))
    });

    let mut relations: BTreeMap<String, Vec<LinkTarget>> = BTreeMap::new();
    let mut start = 0;
    while start < prepared.len() {
        let link_type = prepared[start].link_type.clone();
        let mut end = start;
        while end < prepared.len() && prepared[end].link_type.as_str() == link_type.as_str() {
            end += 1;
        }
        let relation = format!("{}/{}", config.link_type_voc_domain, link_type.suffix());
        let targets = build_group_targets(&prepared[start..end], history);
        relations.entry(relation).or_default().extend(targets);
        start = end;
    }

    LinkContext { anchor, relations }
}

/// Target descriptors for one link-type group: one descriptor per
/// `targetUrl-mimeType-context` sub-group, then the group's
/// `predecessor-version` entries.
fn build_group_targets(
    group: &[LinkRecord],
    history: Option<&[VersionHistoryEntry]>,
) -> Vec<LinkTarget> {
    let mut order: Vec<&str> = Vec::new();
    let mut sub_groups: HashMap<String, Vec<&LinkRecord>> = HashMap::new();
    let keys: Vec<String> = group
        .iter()
        .map(|r| format!("{}-{}-{}", r.target_url, r.mime_type, r.context))
        .collect();
    for (record, key) in group.iter().zip(keys.iter()) {
        if !sub_groups.contains_key(key.as_str()) {
            order.push(key.as_str());
        }
        sub_groups.entry(key.clone()).or_default().push(record);
    }

    let mut targets = Vec::new();
    for key in order {
        let members = &sub_groups[key];
        let first = members[0];

        let mut hreflang: Vec<String> = Vec::new();
        let mut title_star: Vec<LocalizedTitle> = Vec::new();
        for member in members {
            if member.iana_language != SENTINEL
                && !hreflang.iter().any(|l| l == &member.iana_language)
            {
                hreflang.push(member.iana_language.clone());
                title_star.push(LocalizedTitle {
                    value: member.title.clone(),
                    language: member.iana_language.clone(),
                });
            }
        }

        targets.push(LinkTarget {
            href: first.target_url.clone(),
            title: first.title.clone(),
            title_star,
            media_type: restore_sentinel(&first.mime_type),
            hreflang,
            encryption_method: first.encryption_method.clone(),
            access_role: first
                .access_role
                .clone()
                .filter(|roles| !roles.is_empty()),
            method: first.method.clone(),
            rel: None,
        });
    }

    if let Some(entries) = history {
        for record in group {
            let Some(link_id) = record.link_id else {
                continue;
            };
            for entry in entries {
                for change in &entry.changes {
                    if change.link_id != link_id {
                        continue;
                    }
                    let Some(previous_url) = change
                        .previous_target_url
                        .as_deref()
                        .filter(|url| !url.is_empty())
                    else {
                        continue;
                    };
                    let mime = change
                        .previous_mime_type
                        .clone()
                        .unwrap_or_else(|| record.mime_type.clone());
                    let language = change
                        .previous_iana_language
                        .clone()
                        .unwrap_or_else(|| record.iana_language.clone());
                    let hreflang = if language == SENTINEL || language.is_empty() {
                        Vec::new()
                    } else {
                        vec![language]
                    };
                    targets.push(LinkTarget {
                        href: previous_url.to_string(),
                        title: record.title.clone(),
                        title_star: Vec::new(),
                        media_type: restore_sentinel(&mime),
                        hreflang,
                        encryption_method: None,
                        access_role: None,
                        method: None,
                        rel: Some(vec!["predecessor-version".to_string()]),
                    });
                }
            }
        }
    }

    targets
}

fn restore_sentinel(mime: &str) -> String {
    if mime == SENTINEL {
        String::new()
    } else {
        mime.to_string()
    }
}

fn context_for(identifier: &IdentifierRecord, key_code: &str) -> ResolutionContext {
    ResolutionContext {
        namespace: identifier.namespace.clone(),
        identification_key_type: key_code.to_string(),
        identification_key: identifier.identification_key.clone(),
        qualifier_path: identifier.qualifier_path.clone(),
        access_role: None,
    }
}
