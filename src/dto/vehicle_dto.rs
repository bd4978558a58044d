use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::vehicle::VehicleField;
use crate::services::vehicle_list_renderer::VehicleRow;

/// Estados del panel: idle → validating → (idle_with_errors | submitting → idle_with_result)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStatus {
    Idle,
    Validating,
    IdleWithErrors,
    Submitting,
    IdleWithResult,
}

// Request para cambiar el valor de un campo
#[derive(Debug, Deserialize)]
pub struct FieldChangeRequest {
    pub value: String,
}

// Snapshot del panel tras cada evento
#[derive(Debug, Serialize)]
pub struct FormSnapshot {
    pub values: BTreeMap<VehicleField, String>,
    /// Sólo errores de campos tocados
    pub errors: BTreeMap<VehicleField, String>,
    pub touched: BTreeMap<VehicleField, bool>,
    pub is_valid: bool,
    pub can_submit: bool,
    pub submitting: bool,
    pub status: PanelStatus,
    pub result_message: Option<String>,
    pub vehicles: Vec<VehicleRow>,
}
