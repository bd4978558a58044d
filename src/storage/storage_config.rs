//! Configuración de almacenamiento
//! 
//! Este módulo contiene la configuración del backend clave-valor.

use serde::{Deserialize, Serialize};

/// Configuración del backend Redis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    pub redis_url: String,
    /// Espacio de nombres antepuesto a todas las claves en Redis
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            namespace: "vehicle_registry:".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn with_url(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            ..Self::default()
        }
    }
}
