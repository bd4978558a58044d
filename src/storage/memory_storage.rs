//! Almacenamiento en memoria
//! 
//! Adaptador usado cuando no hay `REDIS_URL` configurada y en los tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{StoragePort, StorageResult};

/// Mapa clave-valor compartido en memoria
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de claves almacenadas
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StoragePort for MemoryStorage {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().await;
        let keys: Vec<String> = entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect();
        debug!("📋 Memory LIST '{}': {} claves", prefix, keys.len());
        Ok(keys)
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        debug!("💾 Memory SET para clave: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let removed = self.entries.write().await.remove(key).is_some();
        debug!("🗑️ Memory DELETE para clave: {} (eliminada: {})", key, removed);
        Ok(())
    }
}
