//! Cliente HTTP del endpoint de creación de vehículos
//! 
//! Transporte alternativo al almacenamiento clave-valor: envía el payload
//! del vehículo con un POST JSON.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::models::vehicle::{VehiclePayload, VehicleRecord};
use crate::services::vehicle_submitter::{SubmitReceipt, VehicleSubmitter};
use crate::utils::errors::{AppError, AppResult};

/// Cliente del endpoint remoto de vehículos
#[derive(Clone)]
pub struct VehicleApiClient {
    client: Client,
    endpoint: String,
}

impl VehicleApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Crear un vehículo en el endpoint remoto.
    ///
    /// Devuelve el cuerpo JSON de la respuesta si existe y es JSON válido.
    /// Una respuesta no-2xx se convierte en `AppError::RemoteRejected` con
    /// el status, el texto del status y el cuerpo crudo.
    pub async fn create_vehicle(&self, payload: &VehiclePayload) -> AppResult<Option<serde_json::Value>> {
        debug!("📤 POST {} placa={}", self.endpoint, payload.placa);

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Falha ao enviar para {}: {}", self.endpoint, e);
                AppError::ExternalApi(e.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(AppError::RemoteRejected {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        info!("✅ Vehículo {} aceptado por el endpoint remoto ({})", payload.placa, status);
        Ok(serde_json::from_str(&body).ok())
    }
}

#[async_trait]
impl VehicleSubmitter for VehicleApiClient {
    async fn submit(&self, record: &VehicleRecord) -> AppResult<SubmitReceipt> {
        let response = self.create_vehicle(&record.payload()).await?;
        Ok(SubmitReceipt { response })
    }
}
