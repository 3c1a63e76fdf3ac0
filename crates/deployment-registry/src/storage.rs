//! In-memory storage for the Deployment Registry

use crate::models::Deployment;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Result of [`Storage::insert_if_absent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Conflict,
}

/// Result of [`Storage::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Storage backend for deployments, keyed by deployment id
///
/// All operations take `&self` and synchronize internally, so one instance can
/// be shared between request handlers behind an `Arc`.
#[derive(Debug, Default)]
pub struct Storage {
    deployments: RwLock<HashMap<Uuid, Deployment>>,
}

impl Storage {
    /// Create an empty storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `deployment` under `id` unless the key is already taken
    ///
    /// The existing record is left untouched on conflict.
    pub async fn insert_if_absent(&self, id: Uuid, deployment: Deployment) -> InsertOutcome {
        let mut deployments = self.deployments.write().await;

        match deployments.entry(id) {
            Entry::Occupied(_) => {
                debug!("Deployment already exists: {}", id);
                InsertOutcome::Conflict
            }
            Entry::Vacant(slot) => {
                slot.insert(deployment);
                info!("Stored deployment: {}", id);
                InsertOutcome::Inserted
            }
        }
    }

    /// Get deployment by id
    pub async fn get(&self, id: &Uuid) -> Option<Deployment> {
        self.deployments.read().await.get(id).cloned()
    }

    /// Delete a deployment
    pub async fn delete(&self, id: &Uuid) -> DeleteOutcome {
        match self.deployments.write().await.remove(id) {
            Some(_) => {
                info!("Deleted deployment: {}", id);
                DeleteOutcome::Deleted
            }
            None => DeleteOutcome::NotFound,
        }
    }

    /// Number of stored deployments
    pub async fn len(&self) -> usize {
        self.deployments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
