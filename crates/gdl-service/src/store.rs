//! # Record Store Trait
//!
//! The persistence seam. Real deployments implement [`RecordStore`] over
//! their document database; this crate ships only [`MemoryStore`] for
//! tests and the CLI. `save` exists solely for the best-effort cleanup
//! path — resolution never writes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use gdl_core::{IdentifierRecord, QualifierPath};

use crate::request::ResolutionRequest;

/// Errors from a record-store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend failed; the message carries its diagnostic.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Composite lookup key for an identifier record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub namespace: String,
    pub identification_key_type: String,
    pub identification_key: String,
    pub qualifier_path: QualifierPath,
}

impl RecordKey {
    /// Key coordinates of a resolution request: the primary identifier
    /// plus secondaries folded into a qualifier path in request order.
    pub fn from_request(request: &ResolutionRequest) -> Self {
        let mut path = String::new();
        for secondary in &request.identifiers.secondaries {
            path.push('/');
            path.push_str(&secondary.qualifier);
            path.push('/');
            path.push_str(&secondary.id);
        }
        Self {
            namespace: request.namespace.clone(),
            identification_key_type: request.identifiers.primary.qualifier.clone(),
            identification_key: request.identifiers.primary.id.clone(),
            qualifier_path: QualifierPath::new(path),
        }
    }

    /// Key coordinates of a stored record.
    pub fn from_record(record: &IdentifierRecord) -> Self {
        Self {
            namespace: record.namespace.clone(),
            identification_key_type: record.identification_key_type.clone(),
            identification_key: record.identification_key.clone(),
            qualifier_path: record.qualifier_path.clone(),
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.namespace, self.identification_key_type, self.identification_key
        )?;
        if !self.qualifier_path.is_root() {
            f.write_str(self.qualifier_path.as_str())?;
        }
        Ok(())
    }
}

/// Lookup and best-effort save of identifier records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the record for a composite key, or `None` when nothing is
    /// registered there.
    async fn fetch(&self, key: &RecordKey) -> Result<Option<IdentifierRecord>, StoreError>;

    /// Persist a record. Only the cleanup path calls this; failures are
    /// the caller's to log.
    async fn save(&self, key: &RecordKey, record: IdentifierRecord) -> Result<(), StoreError>;
}

/// In-memory store for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<RecordKey, IdentifierRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a record corpus, keyed by each record's own
    /// coordinates.
    pub async fn from_records(records: Vec<IdentifierRecord>) -> Arc<Self> {
        let store = Arc::new(Self::new());
        {
            let mut map = store.records.write().await;
            for record in records {
                map.insert(RecordKey::from_record(&record), record);
            }
        }
        store
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch(&self, key: &RecordKey) -> Result<Option<IdentifierRecord>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, key: &RecordKey, record: IdentifierRecord) -> Result<(), StoreError> {
        self.records.write().await.insert(key.clone(), record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{IdentifierPart, RequestIdentifiers};

    #[test]
    fn test_key_from_request_folds_secondaries() {
        let request = ResolutionRequest {
            namespace: "gs1".to_string(),
            identifiers: RequestIdentifiers {
                primary: IdentifierPart {
                    qualifier: "01".to_string(),
                    id: "09506000134352".to_string(),
                },
                secondaries: vec![
                    IdentifierPart {
                        qualifier: "lot".to_string(),
                        id: "ABC".to_string(),
                    },
                    IdentifierPart {
                        qualifier: "ser".to_string(),
                        id: "123".to_string(),
                    },
                ],
            },
            descriptive_attributes: Default::default(),
        };
        let key = RecordKey::from_request(&request);
        assert_eq!(key.qualifier_path.as_str(), "/lot/ABC/ser/123");
        assert_eq!(key.to_string(), "gs1/01/09506000134352/lot/ABC/ser/123");
    }

    #[test]
    fn test_key_without_secondaries_is_root() {
        let request = ResolutionRequest {
            namespace: "gs1".to_string(),
            identifiers: RequestIdentifiers {
                primary: IdentifierPart {
                    qualifier: "01".to_string(),
                    id: "09506000134352".to_string(),
                },
                secondaries: Vec::new(),
            },
            descriptive_attributes: Default::default(),
        };
        let key = RecordKey::from_request(&request);
        assert!(key.qualifier_path.is_root());
        assert_eq!(key.to_string(), "gs1/01/09506000134352");
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let record = IdentifierRecord::new("gs1", "01", "09506000134352", QualifierPath::root());
        let key = RecordKey::from_record(&record);
        let store = MemoryStore::from_records(vec![record.clone()]).await;
        let fetched = store.fetch(&key).await.unwrap();
        assert_eq!(fetched, Some(record));
    }
}
