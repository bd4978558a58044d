use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::models::vehicle::{VehicleRecord, VEHICLE_KEY_PREFIX};
use crate::services::vehicle_submitter::{SubmitReceipt, VehicleSubmitter};
use crate::storage::{StorageError, StoragePort};
use crate::utils::errors::{AppError, AppResult};

/// Gateway de persistencia de vehículos sobre el puerto clave-valor
#[derive(Clone)]
pub struct VehicleRepository {
    storage: Arc<dyn StoragePort>,
}

impl VehicleRepository {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self { storage }
    }

    /// Listar todos los vehículos persistidos.
    ///
    /// Un fallo del listado se trata como "sin registros". Un registro que
    /// desapareció o no se puede interpretar se omite.
    pub async fn list_vehicles(&self) -> Vec<VehicleRecord> {
        let keys = match self.storage.list(VEHICLE_KEY_PREFIX).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("⚠️ No se pudo listar vehículos, se asume lista vacía: {}", e);
                return Vec::new();
            }
        };

        let fetches = keys.iter().map(|key| self.fetch(key));
        let results = join_all(fetches).await;

        let mut vehicles = Vec::with_capacity(results.len());
        for (key, result) in keys.iter().zip(results) {
            match result {
                Ok(Some(record)) => vehicles.push(record),
                Ok(None) => debug!("❌ Clave {} desapareció durante el listado", key),
                Err(e) => warn!("⚠️ Registro {} ignorado: {}", key, e),
            }
        }

        debug!("📋 {} vehículos cargados", vehicles.len());
        vehicles
    }

    /// Obtener un vehículo por id
    pub async fn find_vehicle(&self, id: &str) -> AppResult<Option<VehicleRecord>> {
        if !id.starts_with(VEHICLE_KEY_PREFIX) {
            return Ok(None);
        }
        Ok(self.fetch(id).await?)
    }

    async fn fetch(&self, key: &str) -> Result<Option<VehicleRecord>, StorageError> {
        match self.storage.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializar y guardar el registro bajo su propio id
    pub async fn save_vehicle(&self, record: &VehicleRecord) -> AppResult<()> {
        let serialized = serde_json::to_string(record).map_err(StorageError::from)?;
        self.storage.set(&record.id, &serialized).await?;
        info!("💾 Vehículo {} guardado ({})", record.placa, record.id);
        Ok(())
    }

    /// Eliminar un vehículo por id
    pub async fn delete_vehicle(&self, id: &str) -> AppResult<()> {
        if !id.starts_with(VEHICLE_KEY_PREFIX) {
            return Err(AppError::BadRequest(format!("id de veículo inválido: '{}'", id)));
        }
        self.storage.delete(id).await?;
        info!("🗑️ Vehículo {} eliminado", id);
        Ok(())
    }
}

#[async_trait]
impl VehicleSubmitter for VehicleRepository {
    async fn submit(&self, record: &VehicleRecord) -> AppResult<SubmitReceipt> {
        self.save_vehicle(record).await?;
        Ok(SubmitReceipt::default())
    }
}
