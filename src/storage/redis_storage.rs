use std::collections::HashSet;

use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::{debug, error, info, warn};

use async_trait::async_trait;

use super::{StorageConfig, StoragePort, StorageResult};

/// Adaptador Redis del puerto de almacenamiento, con connection manager
#[derive(Clone)]
pub struct RedisStorage {
    manager: ConnectionManager,
    config: StorageConfig,
}

impl RedisStorage {
    /// Conectar a Redis y verificar la conexión con PING
    pub async fn connect(config: StorageConfig) -> StorageResult<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }

    /// Clave física en Redis (con espacio de nombres)
    fn make_key(&self, key: &str) -> String {
        namespaced(&self.config.namespace, key)
    }
}

fn namespaced(namespace: &str, key: &str) -> String {
    format!("{}{}", namespace, key)
}

/// Patrón SCAN para un prefijo lógico. Escapa los metacaracteres glob.
fn scan_pattern(namespace: &str, prefix: &str) -> String {
    let mut pattern = String::with_capacity(namespace.len() + prefix.len() + 1);
    for c in namespace.chars().chain(prefix.chars()) {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('*');
    pattern
}

/// Claves lógicas de un SCAN: quita el espacio de nombres y descarta
/// repetidas (SCAN puede devolver una clave más de una vez).
fn logical_keys<I>(namespace: &str, raw_keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    raw_keys
        .into_iter()
        .filter_map(|key| key.strip_prefix(namespace).map(str::to_string))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

#[async_trait]
impl StoragePort for RedisStorage {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut conn = self.manager.clone();
        let pattern = scan_pattern(&self.config.namespace, prefix);

        let mut raw_keys = Vec::new();
        {
            let mut iter: redis::AsyncIter<String> = conn.scan_match(&pattern).await?;
            while let Some(key) = iter.next_item().await {
                raw_keys.push(key);
            }
        }
        let keys = logical_keys(&self.config.namespace, raw_keys);

        debug!("📋 Redis SCAN '{}': {} claves", pattern, keys.len());
        Ok(keys)
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(self.make_key(key)).await?;

        match &value {
            Some(_) => debug!("📥 Redis GET HIT para clave: {}", key),
            None => debug!("❌ Redis GET MISS para clave: {}", key),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.manager.clone();

        match conn.set::<_, _, ()>(self.make_key(key), value).await {
            Ok(()) => {
                debug!("💾 Redis SET para clave: {}", key);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando clave {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.manager.clone();

        match conn.del::<_, i64>(self.make_key(key)).await {
            Ok(count) => {
                debug!("🗑️ Redis DELETE para clave: {} (eliminados: {})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando clave {}: {}", key, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_key() {
        assert_eq!(
            namespaced("vehicle_registry:", "vehicle:1700000000000"),
            "vehicle_registry:vehicle:1700000000000"
        );
    }

    #[test]
    fn test_scan_pattern_escapes_glob_characters() {
        assert_eq!(scan_pattern("vehicle_registry:", "vehicle:"), "vehicle_registry:vehicle:*");
        assert_eq!(scan_pattern("ns[1]:", "a*b?"), "ns\\[1\\]:a\\*b\\?*");
    }

    #[test]
    fn test_logical_keys_drop_repeated_scan_results() {
        let raw = vec![
            "vehicle_registry:vehicle:2".to_string(),
            "vehicle_registry:vehicle:1".to_string(),
            "vehicle_registry:vehicle:2".to_string(),
            "other:vehicle:3".to_string(),
            "vehicle_registry:vehicle:1".to_string(),
        ];

        assert_eq!(
            logical_keys("vehicle_registry:", raw),
            vec!["vehicle:2".to_string(), "vehicle:1".to_string()]
        );
    }
}
