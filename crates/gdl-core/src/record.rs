//! # Link Records and Identifier Records
//!
//! The registered data model: an [`IdentifierRecord`] (one per registered
//! identifier + qualifier path) owning an ordered collection of
//! [`LinkRecord`]s, plus the append-only version history written by every
//! mutation.
//!
//! Mutations go through the lifecycle methods (`add_link`, `update_link`,
//! `soft_delete_link`, `hard_delete_link`). Each one re-runs the
//! scope-default enforcer and appends a [`VersionHistoryEntry`], so the
//! scope-default invariant holds after every mutation — it is never
//! repaired lazily at read time.
//!
//! Field names serialize in the camelCase spelling of the stored document
//! format (`targetUrl`, `ianaLanguage`, ...).

use serde::{Deserialize, Serialize};

use crate::defaults::enforce_scope_defaults;
use crate::error::RecordError;
use crate::identity::{LinkId, LinkType, QualifierPath};
use crate::temporal::Timestamp;

// ─── Link Record ─────────────────────────────────────────────────────

/// One registered target for an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Stable identity, assigned once at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_id: Option<LinkId>,
    /// The redirect target.
    pub target_url: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Namespaced relation token, e.g. `gs1:certificationInfo`.
    #[serde(default)]
    pub link_type: LinkType,
    /// IANA language tag, e.g. `en`.
    #[serde(default)]
    pub iana_language: String,
    /// Region/audience token, e.g. `us`.
    #[serde(default)]
    pub context: String,
    /// MIME type; the empty string is a valid "no type" value.
    #[serde(default)]
    pub mime_type: String,
    /// Whether the link participates in resolution.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Forward the request query string on redirect.
    #[serde(default)]
    pub fwqs: bool,
    /// Default among all links of the record set.
    #[serde(default)]
    pub default_link_type: bool,
    /// Default among links sharing this `link_type`.
    #[serde(default)]
    pub default_iana_language: bool,
    /// Default among links sharing `link_type` + `iana_language`.
    #[serde(default)]
    pub default_context: bool,
    /// Default among links sharing `link_type` + `iana_language` + `context`.
    #[serde(default)]
    pub default_mime_type: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Enumerated encryption token. The literal `"none"` is a value, not
    /// an absence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_method: Option<String>,
    /// Ordered set of role URIs allowed to see this link. Empty or absent
    /// means publicly visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_role: Option<Vec<String>>,
    /// HTTP method hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LinkRecord {
    /// A minimal active record for the given target and relation token.
    pub fn new(target_url: impl Into<String>, link_type: impl Into<LinkType>) -> Self {
        Self {
            link_id: None,
            target_url: target_url.into(),
            title: String::new(),
            link_type: link_type.into(),
            iana_language: String::new(),
            context: String::new(),
            mime_type: String::new(),
            active: true,
            fwqs: false,
            default_link_type: false,
            default_iana_language: false,
            default_context: false,
            default_mime_type: false,
            created_at: None,
            updated_at: None,
            encryption_method: None,
            access_role: None,
            method: None,
        }
    }

    /// Whether the link is visible to everyone (no access roles).
    pub fn is_public(&self) -> bool {
        self.access_role.as_ref().map_or(true, |roles| roles.is_empty())
    }

    /// Clear all four default-selection flags.
    pub(crate) fn clear_default_flags(&mut self) {
        self.default_link_type = false;
        self.default_iana_language = false;
        self.default_context = false;
        self.default_mime_type = false;
    }
}

// ─── Version History ─────────────────────────────────────────────────

/// What happened to a link in one mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    SoftDeleted,
    HardDeleted,
}

/// One link's change within a version-history entry.
///
/// A change carrying a non-empty `previous_target_url` is a traceable
/// prior target for that link; the linkset builder surfaces it as a
/// `predecessor-version` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkChange {
    pub link_id: LinkId,
    pub action: ChangeAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_target_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_iana_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_context: Option<String>,
}

impl LinkChange {
    fn bare(link_id: LinkId, action: ChangeAction) -> Self {
        Self {
            link_id,
            action,
            previous_target_url: None,
            previous_mime_type: None,
            previous_iana_language: None,
            previous_link_type: None,
            previous_context: None,
        }
    }
}

/// One append-only history entry, written per mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistoryEntry {
    pub version: u32,
    pub updated_at: Timestamp,
    pub changes: Vec<LinkChange>,
}

// ─── Identifier Record ───────────────────────────────────────────────

/// The registered entity owning an ordered collection of links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRecord {
    /// Identifier scheme namespace, e.g. `gs1`.
    pub namespace: String,
    /// Canonical qualifier of the primary key, e.g. `01`.
    pub identification_key_type: String,
    /// The primary key value.
    pub identification_key: String,
    /// Secondary qualifiers as a `/key/value/...` path; `/` = none.
    #[serde(default)]
    pub qualifier_path: QualifierPath,
    /// Whether the identifier resolves at all.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Ordered link collection. Order is significant: the matcher scans it
    /// in reverse so the last-registered link wins ties.
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_history: Option<Vec<VersionHistoryEntry>>,
    /// Materialised linkset left behind by older writers. Never trusted:
    /// resolution rebuilds from `links`, and fetching a document with this
    /// field set triggers a background strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkset: Option<serde_json::Value>,
}

impl IdentifierRecord {
    /// A new empty record for the given identifier.
    pub fn new(
        namespace: impl Into<String>,
        identification_key_type: impl Into<String>,
        identification_key: impl Into<String>,
        qualifier_path: QualifierPath,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            identification_key_type: identification_key_type.into(),
            identification_key: identification_key.into(),
            qualifier_path,
            active: true,
            links: Vec::new(),
            version: None,
            version_history: None,
            linkset: None,
        }
    }

    /// Active links only, in registration order.
    pub fn active_links(&self) -> Vec<&LinkRecord> {
        self.links.iter().filter(|l| l.active).collect()
    }

    /// Register a new link. Assigns a `link_id` if absent, stamps
    /// `created_at`, re-runs the scope-default enforcer, and appends a
    /// `created` history entry.
    pub fn add_link(&mut self, mut link: LinkRecord) -> LinkId {
        let link_id = *link.link_id.get_or_insert_with(LinkId::new);
        let now = Timestamp::now();
        link.created_at.get_or_insert(now);
        self.links.push(link);
        enforce_scope_defaults(&mut self.links);
        self.append_history(now, vec![LinkChange::bare(link_id, ChangeAction::Created)]);
        link_id
    }

    /// Replace the fields of an existing link. Stamps `updated_at`,
    /// re-runs the enforcer, and appends an `updated` history entry
    /// snapshotting whichever descriptive fields actually changed.
    pub fn update_link(&mut self, link_id: LinkId, updated: LinkRecord) -> Result<(), RecordError> {
        let idx = self.link_index(link_id)?;
        let now = Timestamp::now();
        let previous = self.links[idx].clone();

        let mut next = updated;
        next.link_id = Some(link_id);
        next.created_at = previous.created_at;
        next.updated_at = Some(now);
        self.links[idx] = next;
        enforce_scope_defaults(&mut self.links);

        let current = &self.links[idx];
        let change = LinkChange {
            link_id,
            action: ChangeAction::Updated,
            previous_target_url: changed(&previous.target_url, &current.target_url),
            previous_mime_type: changed(&previous.mime_type, &current.mime_type),
            previous_iana_language: changed(&previous.iana_language, &current.iana_language),
            previous_link_type: changed(previous.link_type.as_str(), current.link_type.as_str()),
            previous_context: changed(&previous.context, &current.context),
        };
        self.append_history(now, vec![change]);
        Ok(())
    }

    /// Deactivate a link without removing it. Its default flags are
    /// cleared by the enforcer pass.
    pub fn soft_delete_link(&mut self, link_id: LinkId) -> Result<(), RecordError> {
        let idx = self.link_index(link_id)?;
        let now = Timestamp::now();
        self.links[idx].active = false;
        self.links[idx].updated_at = Some(now);
        enforce_scope_defaults(&mut self.links);
        self.append_history(now, vec![LinkChange::bare(link_id, ChangeAction::SoftDeleted)]);
        Ok(())
    }

    /// Remove a link from the collection entirely, snapshotting it into
    /// the history entry.
    pub fn hard_delete_link(&mut self, link_id: LinkId) -> Result<(), RecordError> {
        let idx = self.link_index(link_id)?;
        let now = Timestamp::now();
        let removed = self.links.remove(idx);
        enforce_scope_defaults(&mut self.links);
        let change = LinkChange {
            link_id,
            action: ChangeAction::HardDeleted,
            previous_target_url: Some(removed.target_url),
            previous_mime_type: Some(removed.mime_type),
            previous_iana_language: Some(removed.iana_language),
            previous_link_type: Some(removed.link_type.0),
            previous_context: Some(removed.context),
        };
        self.append_history(now, vec![change]);
        Ok(())
    }

    fn link_index(&self, link_id: LinkId) -> Result<usize, RecordError> {
        self.links
            .iter()
            .position(|l| l.link_id == Some(link_id))
            .ok_or_else(|| RecordError::UnknownLink {
                link_id: link_id.to_string(),
            })
    }

    fn append_history(&mut self, updated_at: Timestamp, changes: Vec<LinkChange>) {
        let version = self.version.unwrap_or(0) + 1;
        self.version = Some(version);
        self.version_history
            .get_or_insert_with(Vec::new)
            .push(VersionHistoryEntry {
                version,
                updated_at,
                changes,
            });
    }
}

fn changed(previous: &str, current: &str) -> Option<String> {
    if previous != current && !previous.is_empty() {
        Some(previous.to_string())
    } else {
        None
    }
}
