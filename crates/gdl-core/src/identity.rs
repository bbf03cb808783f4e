//! # Identifier Primitives
//!
//! Newtype wrappers for the tokens that make up a Digital Link identifier:
//! the stable link identity, the namespaced link-type relation token, and
//! the qualifier path that narrows a primary key down to a specific
//! instance (`/lot/ABC123/ser/9922`).
//!
//! Newtypes keep these apart at the type level — a qualifier path is never
//! passed where a relation token is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a registered link, assigned once at registration.
///
/// Correlates a live link record with its version-history changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub Uuid);

impl LinkId {
    /// Generate a new random link identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LinkId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A namespaced link-relation token, e.g. `gs1:certificationInfo`.
///
/// The part before the first `:` is the vocabulary prefix; the part after
/// it names the relation within that vocabulary. Tokens compare
/// case-insensitively for matching purposes but preserve their original
/// spelling on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkType(pub String);

impl LinkType {
    /// Wrap a raw relation token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The relation name after the first `:`, or the whole token when it
    /// carries no prefix.
    pub fn suffix(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, rest)) => rest,
            None => &self.0,
        }
    }

    /// Case-insensitive equality against another token.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for LinkType {
    fn default() -> Self {
        Self(String::new())
    }
}

impl From<&str> for LinkType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LinkType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A qualifier path: alternating `/key/value` segments narrowing the
/// primary identifier, with `/` standing for "no qualifiers".
///
/// The path is stored verbatim — it is appended to canonical URLs exactly
/// as registered — but can be decomposed into key/value pairs and walked
/// towards the root for ancestor linkset references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifierPath(String);

impl QualifierPath {
    /// The root path (no qualifiers).
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Wrap a raw qualifier path. Empty input normalises to `/`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            Self::root()
        } else {
            Self(path)
        }
    }

    /// The raw path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// The non-empty `/`-delimited segments.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// The `(key, value)` qualifier pairs, left to right.
    ///
    /// A dangling key with no value is ignored.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let segments = self.segments();
        segments.chunks_exact(2).map(|c| (c[0], c[1])).collect()
    }

    /// Ancestor paths obtained by peeling qualifier pairs from the right,
    /// most specific first. The root ancestor is the empty string (its
    /// canonical URL carries no path suffix). Self is not included.
    ///
    /// `/lot/A/ser/B` yields `["/lot/A", ""]`; the root path yields
    /// nothing.
    pub fn ancestor_paths(&self) -> Vec<String> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(pairs.len());
        for keep in (0..pairs.len()).rev() {
            let mut path = String::new();
            for (key, value) in &pairs[..keep] {
                path.push('/');
                path.push_str(key);
                path.push('/');
                path.push_str(value);
            }
            out.push(path);
        }
        out
    }
}

impl Default for QualifierPath {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for QualifierPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QualifierPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
