use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::dto::vehicle_dto::{FormSnapshot, PanelStatus};
use crate::models::vehicle::{VehicleField, VehicleRecord};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::form_state::FormState;
use crate::services::vehicle_list_renderer::{render_rows, render_text, VehicleRow};
use crate::services::vehicle_submitter::{SubmitReceipt, VehicleSubmitter};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::FieldValidator;

pub const SUBMIT_SUMMARY_MESSAGE: &str = "Corrija os erros antes de salvar.";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Veículo salvo com sucesso.";

/// Panel de cadastro de vehículos: formulario, listado y envío
pub struct VehicleFormPanel {
    form: FormState,
    repository: VehicleRepository,
    submitter: Arc<dyn VehicleSubmitter>,
    vehicles: Vec<VehicleRecord>,
    status: PanelStatus,
    submitting: bool,
    result_message: Option<String>,
}

impl VehicleFormPanel {
    /// Crear panel que guarda los envíos en el repositorio
    pub fn new(repository: VehicleRepository, validator: FieldValidator) -> Self {
        let submitter: Arc<dyn VehicleSubmitter> = Arc::new(repository.clone());
        Self {
            form: FormState::new(validator),
            repository,
            submitter,
            vehicles: Vec::new(),
            status: PanelStatus::Idle,
            submitting: false,
            result_message: None,
        }
    }

    /// Reemplazar el destino de los envíos (p. ej. el endpoint HTTP)
    pub fn with_submitter(mut self, submitter: Arc<dyn VehicleSubmitter>) -> Self {
        self.submitter = submitter;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    pub fn rows(&self) -> Vec<VehicleRow> {
        render_rows(&self.vehicles)
    }

    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// El botón de guardar sólo se habilita con formulario válido y sin envío en curso
    pub fn can_submit(&self) -> bool {
        self.form.is_valid() && !self.submitting
    }

    pub fn result_message(&self) -> Option<&str> {
        self.result_message.as_deref()
    }

    pub fn repository(&self) -> &VehicleRepository {
        &self.repository
    }

    pub fn submitter(&self) -> Arc<dyn VehicleSubmitter> {
        Arc::clone(&self.submitter)
    }

    pub fn change_field(&mut self, field: VehicleField, raw: &str) {
        self.form.change(field, raw);
        if !self.submitting {
            self.status = PanelStatus::Idle;
        }
    }

    pub fn blur_field(&mut self, field: VehicleField) {
        self.form.blur(field);
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.result_message = None;
        if !self.submitting {
            self.status = PanelStatus::Idle;
        }
    }

    /// Primera fase del envío: validar todo y construir el registro.
    ///
    /// Deja el panel en `Submitting`; el llamador debe cerrar con
    /// `finish_submit` cuando el destino responda.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> AppResult<VehicleRecord> {
        if self.submitting {
            return Err(AppError::Conflict(
                "Já existe um salvamento em andamento.".to_string(),
            ));
        }

        self.result_message = None;
        self.status = PanelStatus::Validating;

        if let Err(failures) = self.form.validate_for_submit() {
            warn!("⚠️ Envío bloqueado: {} campos inválidos", failures.errors().len());
            self.status = PanelStatus::IdleWithErrors;
            self.result_message = Some(SUBMIT_SUMMARY_MESSAGE.to_string());
            return Err(AppError::Validation(failures));
        }

        let record = match self.form.build_record(now) {
            Ok(record) => record,
            Err(e) => {
                self.status = PanelStatus::IdleWithErrors;
                self.result_message = Some(e.user_message());
                return Err(e);
            }
        };

        self.submitting = true;
        self.status = PanelStatus::Submitting;
        Ok(record)
    }

    /// Segunda fase del envío. Devuelve `true` si se guardó, en cuyo caso
    /// el formulario queda reseteado y el listado debe recargarse.
    pub fn finish_submit(&mut self, outcome: &AppResult<SubmitReceipt>) -> bool {
        self.submitting = false;
        self.status = PanelStatus::IdleWithResult;

        match outcome {
            Ok(receipt) => {
                let message = match &receipt.response {
                    Some(body) => format!("{} Resposta: {}", SUBMIT_SUCCESS_MESSAGE, body),
                    None => SUBMIT_SUCCESS_MESSAGE.to_string(),
                };
                self.result_message = Some(message);
                self.form.reset();
                true
            }
            Err(e) => {
                error!("❌ Error guardando vehículo: {}", e);
                self.result_message = Some(e.user_message());
                false
            }
        }
    }

    /// Envío completo: validar, guardar, recargar y resetear
    pub async fn submit(&mut self) -> AppResult<VehicleRecord> {
        let record = self.begin_submit(Utc::now())?;
        let outcome = self.submitter.submit(&record).await;

        if self.finish_submit(&outcome) {
            info!("✅ Vehículo {} registrado", record.placa);
            self.reload().await;
        }
        outcome.map(|_| record)
    }

    /// Recargar el listado completo desde el almacenamiento
    pub async fn reload(&mut self) {
        let vehicles = self.repository.list_vehicles().await;
        debug!("📋 Listado recargado:\n{}", render_text(&vehicles));
        self.apply_vehicles(vehicles);
    }

    pub fn apply_vehicles(&mut self, vehicles: Vec<VehicleRecord>) {
        self.vehicles = vehicles;
    }

    /// Eliminar un vehículo. Los fallos se registran en el log y no se
    /// muestran al usuario.
    pub async fn delete(&mut self, id: &str) {
        match self.repository.delete_vehicle(id).await {
            Ok(()) => self.reload().await,
            Err(e) => error!("❌ Error eliminando vehículo {}: {}", id, e),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let errors: BTreeMap<VehicleField, String> = VehicleField::ALL
            .iter()
            .filter_map(|f| self.form.visible_error(*f).map(|m| (*f, m.to_string())))
            .collect();

        FormSnapshot {
            values: self.form.values().clone(),
            errors,
            touched: self.form.touched().clone(),
            is_valid: self.form.is_valid(),
            can_submit: self.can_submit(),
            submitting: self.submitting,
            status: self.status,
            result_message: self.result_message.clone(),
            vehicles: self.rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError, StoragePort, StorageResult};
    use async_trait::async_trait;

    /// Almacenamiento que lista bien pero falla al escribir y borrar
    struct ReadOnlyStorage(MemoryStorage);

    #[async_trait]
    impl StoragePort for ReadOnlyStorage {
        async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
            self.0.list(prefix).await
        }
        async fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key).await
        }
        async fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
        async fn delete(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Backend("permission denied".to_string()))
        }
    }

    fn panel_with(storage: Arc<dyn StoragePort>) -> VehicleFormPanel {
        VehicleFormPanel::new(
            VehicleRepository::new(storage),
            FieldValidator::with_current_year(2025),
        )
    }

    fn fill(panel: &mut VehicleFormPanel, ano: &str) {
        panel.change_field(VehicleField::Placa, "abc1234");
        panel.change_field(VehicleField::Marca, "Toyota");
        panel.change_field(VehicleField::Modelo, "Corolla");
        panel.change_field(VehicleField::Ano, ano);
        panel.change_field(VehicleField::Proprietario, "João Silva");
    }

    #[tokio::test]
    async fn test_valid_submit_persists_reloads_and_resets() {
        let mut panel = panel_with(Arc::new(MemoryStorage::new()));
        fill(&mut panel, "2023");
        assert!(panel.can_submit());

        let record = panel.submit().await.unwrap();

        assert_eq!(record.placa, "ABC1234");
        assert_eq!(panel.vehicles().len(), 1);
        assert_eq!(panel.vehicles()[0].placa, "ABC1234");
        assert_eq!(panel.status(), PanelStatus::IdleWithResult);
        assert_eq!(panel.result_message(), Some(SUBMIT_SUCCESS_MESSAGE));
        assert!(panel.form().values().values().all(String::is_empty));
        assert!(!panel.is_submitting());
    }

    #[tokio::test]
    async fn test_invalid_year_blocks_submit() {
        let storage = MemoryStorage::new();
        let mut panel = panel_with(Arc::new(storage.clone()));
        fill(&mut panel, "1800");

        let err = panel.submit().await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(panel.status(), PanelStatus::IdleWithErrors);
        assert_eq!(panel.result_message(), Some(SUBMIT_SUMMARY_MESSAGE));
        let message = panel.form().visible_error(VehicleField::Ano).unwrap();
        assert!(message.contains("inválido"));
        assert!(message.contains("1886"));
        assert!(storage.is_empty().await);
        // El formulario conserva lo que escribió el usuario
        assert_eq!(panel.form().value(VehicleField::Marca), "Toyota");
    }

    #[tokio::test]
    async fn test_save_failure_is_surfaced_and_form_kept() {
        let mut panel = panel_with(Arc::new(ReadOnlyStorage(MemoryStorage::new())));
        fill(&mut panel, "2023");

        assert!(panel.submit().await.is_err());

        let message = panel.result_message().unwrap();
        assert!(message.starts_with("Falha ao salvar:"));
        assert!(message.contains("quota exceeded"));
        assert_eq!(panel.form().value(VehicleField::Placa), "ABC1234");
        assert!(panel.can_submit());
    }

    #[tokio::test]
    async fn test_delete_failure_is_logged_not_surfaced() {
        let mut panel = panel_with(Arc::new(ReadOnlyStorage(MemoryStorage::new())));

        panel.delete("vehicle:404").await;

        assert_eq!(panel.result_message(), None);
        assert_eq!(panel.status(), PanelStatus::Idle);
    }

    #[tokio::test]
    async fn test_delete_of_missing_id_is_harmless() {
        let mut panel = panel_with(Arc::new(MemoryStorage::new()));
        fill(&mut panel, "2023");
        panel.submit().await.unwrap();

        panel.delete("vehicle:0").await;
        assert_eq!(panel.vehicles().len(), 1);

        let id = panel.vehicles()[0].id.clone();
        panel.delete(&id).await;
        assert!(panel.vehicles().is_empty());
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut panel = panel_with(Arc::new(MemoryStorage::new()));
        fill(&mut panel, "2023");

        panel.begin_submit(Utc::now()).unwrap();
        assert_eq!(panel.status(), PanelStatus::Submitting);
        assert!(!panel.can_submit());

        let err = panel.begin_submit(Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let saved = panel.finish_submit(&Ok(SubmitReceipt {
            response: Some(serde_json::json!({ "id": 7 })),
        }));
        assert!(saved);
        assert_eq!(
            panel.result_message(),
            Some("Veículo salvo com sucesso. Resposta: {\"id\":7}")
        );
    }

    #[test]
    fn test_snapshot_only_shows_touched_errors() {
        let mut panel = panel_with(Arc::new(MemoryStorage::new()));
        panel.change_field(VehicleField::Marca, "T");
        panel.blur_field(VehicleField::Marca);

        let snapshot = panel.snapshot();
        assert_eq!(snapshot.values.len(), 5);
        assert_eq!(snapshot.errors.len(), 1);
        assert_eq!(snapshot.errors[&VehicleField::Marca], "Marca muito curta.");
        assert!(!snapshot.can_submit);
        assert_eq!(snapshot.status, PanelStatus::Idle);
    }
}
