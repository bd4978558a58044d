//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::clients::vehicle_api_client::VehicleApiClient;
use crate::config::environment::EnvironmentConfig;
use crate::controllers::vehicle_form_controller::VehicleFormPanel;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::storage::{MemoryStorage, RedisStorage, StorageConfig, StoragePort};
use crate::utils::errors::AppResult;
use crate::utils::validation::FieldValidator;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    /// El lock se libera mientras un envío está en curso
    pub panel: Arc<Mutex<VehicleFormPanel>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, panel: VehicleFormPanel) -> Self {
        Self {
            config,
            panel: Arc::new(Mutex::new(panel)),
        }
    }

    /// Montar almacenamiento, destino de envíos y panel según la configuración
    pub async fn from_config(config: EnvironmentConfig) -> AppResult<Self> {
        let storage: Arc<dyn StoragePort> = match &config.redis_url {
            Some(url) => Arc::new(RedisStorage::connect(StorageConfig::with_url(url.clone())).await?),
            None => {
                info!("🧠 REDIS_URL no definida, usando almacenamiento en memoria");
                Arc::new(MemoryStorage::new())
            }
        };

        let repository = VehicleRepository::new(storage);
        let mut panel = VehicleFormPanel::new(repository, FieldValidator::new());

        if let Some(endpoint) = &config.vehicle_api_url {
            let client = VehicleApiClient::new(endpoint.clone());
            info!("🌐 Envíos dirigidos al endpoint remoto: {}", client.endpoint());
            panel = panel.with_submitter(Arc::new(client));
        }

        panel.reload().await;
        info!("📋 {} vehículos cargados al iniciar", panel.vehicles().len());

        Ok(Self::new(config, panel))
    }
}
