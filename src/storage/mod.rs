//! Almacenamiento clave-valor
//! 
//! Este módulo define el puerto de almacenamiento que usa el cadastro de
//! vehículos y sus adaptadores (memoria y Redis).

pub mod memory_storage;
pub mod redis_storage;
pub mod storage_config;

use async_trait::async_trait;
use thiserror::Error;

pub use memory_storage::MemoryStorage;
pub use redis_storage::RedisStorage;
pub use storage_config::StorageConfig;

/// Errores de los adaptadores de almacenamiento
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage not initialized")]
    NotInitialized,

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Puerto clave-valor asíncrono.
///
/// Los valores son strings opacos; la serialización es responsabilidad
/// del repositorio.
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Listar las claves que empiezan con `prefix`, en el orden del backend
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Eliminar una clave. Una clave inexistente no es un error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
