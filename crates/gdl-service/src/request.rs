//! # Request and Response Shapes
//!
//! The normalised request as handed over by the routing/validation
//! collaborators — identifier coordinates plus descriptive attributes —
//! and the unified resolution result. Parameter extraction and
//! content-negotiation parsing happen upstream; by the time a
//! [`ResolutionRequest`] reaches this crate its attributes are plain
//! ordered lists.

use serde::{Deserialize, Serialize};

use gdl_engine::{LanguageContext, LinkSet};

/// One identifier component: a canonical qualifier and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierPart {
    /// Canonical qualifier code, e.g. `01` or `lot`.
    pub qualifier: String,
    /// The value, e.g. `09506000134352` or `ABC123`.
    pub id: String,
}

/// The primary key plus ordered secondary qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdentifiers {
    pub primary: IdentifierPart,
    #[serde(default)]
    pub secondaries: Vec<IdentifierPart>,
}

/// Content-negotiation attributes, already parsed and ordered by client
/// preference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptiveAttributes {
    /// Requested relation token, or the literal `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Requested audience role (shorthand or full URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_role: Option<String>,
    /// Acceptable mime types, most preferred first.
    #[serde(default)]
    pub mime_types: Vec<String>,
    /// Preferred (language, context) pairs, most preferred first.
    #[serde(default)]
    pub iana_language_contexts: Vec<LanguageContext>,
}

/// A resolution request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRequest {
    /// Identifier scheme namespace, e.g. `gs1`.
    pub namespace: String,
    pub identifiers: RequestIdentifiers,
    #[serde(default)]
    pub descriptive_attributes: DescriptiveAttributes,
}

/// The unified resolution result.
///
/// A single-target match carries `target_url` and `fwqs`; the
/// show-everything case carries neither. Both carry the linkset document
/// and the two header renditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    pub mime_type: String,
    /// The linkset document: `{"linkset": [...]}`.
    pub data: LinkSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fwqs: Option<bool>,
    /// Budgeted `Link:` header text.
    pub link_header_text: String,
    /// Unbudgeted header text with every active target entry.
    pub link_header_text_full: String,
}
