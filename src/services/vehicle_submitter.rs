//! Destino de los envíos del formulario
//! 
//! El panel envía el registro validado a un `VehicleSubmitter`: el
//! repositorio clave-valor (por defecto) o el endpoint HTTP remoto.

use async_trait::async_trait;

use crate::models::vehicle::VehicleRecord;
use crate::utils::errors::AppResult;

/// Resultado de un envío exitoso
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitReceipt {
    /// Cuerpo JSON devuelto por el destino, si lo hubo
    pub response: Option<serde_json::Value>,
}

#[async_trait]
pub trait VehicleSubmitter: Send + Sync {
    async fn submit(&self, record: &VehicleRecord) -> AppResult<SubmitReceipt>;
}
