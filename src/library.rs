//! Policy library — the persistence boundary of the editor.
//!
//! The whole `PolicyDocument` is the unit of change here: the editor hands
//! back complete documents, never partial patches. The trait is async so
//! embedders can plug a real backend; `MemoryPolicyStore` covers tests and
//! single-process use.

use crate::types::{PolicyDocument, PolicyStatus};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Folder shown for policies with an empty folder name.
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("policy not found: {0}")]
    NotFound(Uuid),
}

/// Persistence trait for policy documents.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    async fn save(&self, doc: &PolicyDocument) -> Result<()>;
    async fn load(&self, id: Uuid) -> Result<Option<PolicyDocument>>;
    async fn list(
        &self,
        folder: Option<&str>,
        status: Option<PolicyStatus>,
    ) -> Result<Vec<PolicyDocument>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// In-memory PolicyStore for tests and single-process embedding.
pub struct MemoryPolicyStore {
    inner: RwLock<HashMap<Uuid, PolicyDocument>>,
}

impl MemoryPolicyStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PolicyStore for MemoryPolicyStore {
    async fn save(&self, doc: &PolicyDocument) -> Result<()> {
        let mut store = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;
        debug!(policy = %doc.id, name = %doc.name, "policy saved");
        store.insert(doc.id, doc.clone());
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Option<PolicyDocument>> {
        let store = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        Ok(store.get(&id).cloned())
    }

    async fn list(
        &self,
        folder: Option<&str>,
        status: Option<PolicyStatus>,
    ) -> Result<Vec<PolicyDocument>> {
        let store = self.inner.read().map_err(|e| anyhow!("Lock: {}", e))?;
        let mut results: Vec<_> = store
            .values()
            .filter(|doc| {
                if let Some(f) = folder {
                    if effective_folder(doc) != f {
                        return false;
                    }
                }
                if let Some(s) = status {
                    if doc.status != s {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(results)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut store = self.inner.write().map_err(|e| anyhow!("Lock: {}", e))?;
        store
            .remove(&id)
            .ok_or(LibraryError::NotFound(id))
            .map(|_| ())
            .map_err(Into::into)
    }
}

fn effective_folder(doc: &PolicyDocument) -> &str {
    if doc.folder.trim().is_empty() {
        UNCATEGORIZED
    } else {
        &doc.folder
    }
}

/// Group policies by folder for the sidebar: folder names sorted ascending,
/// empty folders mapped to "Uncategorized".
pub fn folder_groups(policies: &[PolicyDocument]) -> Vec<(String, Vec<&PolicyDocument>)> {
    let mut groups: Vec<(String, Vec<&PolicyDocument>)> = Vec::new();
    for doc in policies {
        let folder = effective_folder(doc);
        match groups.iter_mut().find(|(name, _)| name == folder) {
            Some((_, members)) => members.push(doc),
            None => groups.push((folder.to_string(), vec![doc])),
        }
    }
    groups.sort_by(|a, b| a.0.cmp(&b.0));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PolicyEdit;
    use crate::types::ImpactLevel;

    fn named_policy(name: &str, folder: &str) -> PolicyDocument {
        let mut doc = PolicyDocument::new_draft();
        doc.update_policy(PolicyEdit::Name(name.to_string()));
        doc.update_policy(PolicyEdit::Folder(folder.to_string()));
        doc
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let store = MemoryPolicyStore::new();
        let doc = named_policy("Block PII Egress", "Finance Rules");
        store.save(&doc).await.unwrap();

        let loaded = store.load(doc.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Block PII Egress");
        assert_eq!(loaded.impact, ImpactLevel::Low);
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let store = MemoryPolicyStore::new();
        assert!(store.load(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_document() {
        let store = MemoryPolicyStore::new();
        let mut doc = named_policy("Draft", UNCATEGORIZED);
        store.save(&doc).await.unwrap();

        doc.update_policy(PolicyEdit::Status(PolicyStatus::Active));
        doc.insert_after(None);
        store.save(&doc).await.unwrap();

        let loaded = store.load(doc.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, PolicyStatus::Active);
        assert_eq!(loaded.nodes.len(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_by_folder_and_status() {
        let store = MemoryPolicyStore::new();
        let mut active = named_policy("A", "Finance Rules");
        active.update_policy(PolicyEdit::Status(PolicyStatus::Active));
        store.save(&active).await.unwrap();
        store.save(&named_policy("B", "Finance Rules")).await.unwrap();
        store.save(&named_policy("C", "")).await.unwrap();

        let all = store.list(None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let finance = store.list(Some("Finance Rules"), None).await.unwrap();
        assert_eq!(finance.len(), 2);

        // Empty folder is listed under the Uncategorized fallback.
        let uncategorized = store.list(Some(UNCATEGORIZED), None).await.unwrap();
        assert_eq!(uncategorized.len(), 1);
        assert_eq!(uncategorized[0].name, "C");

        let drafts = store
            .list(None, Some(PolicyStatus::Draft))
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryPolicyStore::new();
        let id = Uuid::now_v7();
        let err = store.delete(id).await.unwrap_err();
        assert!(err.to_string().contains("policy not found"));
    }

    #[tokio::test]
    async fn test_delete_removes_document() {
        let store = MemoryPolicyStore::new();
        let doc = named_policy("A", "X");
        store.save(&doc).await.unwrap();
        store.delete(doc.id).await.unwrap();
        assert!(store.load(doc.id).await.unwrap().is_none());
    }

    #[test]
    fn test_folder_groups_sorted_with_fallback() {
        let policies = vec![
            named_policy("P1", "Finance Rules"),
            named_policy("P2", ""),
            named_policy("P3", "Access Control"),
            named_policy("P4", "Finance Rules"),
        ];
        let groups = folder_groups(&policies);
        let names: Vec<&str> = groups.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Access Control", "Finance Rules", UNCATEGORIZED]);
        assert_eq!(groups[1].1.len(), 2);
    }
}
