use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use tracing::{debug, error};

use crate::dto::vehicle_dto::{FieldChangeRequest, FormSnapshot};
use crate::models::vehicle::{VehicleField, VehicleRecord};
use crate::services::vehicle_list_renderer::VehicleRow;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, AppError};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/form", get(get_form))
        .route("/form/submit", post(submit_form))
        .route("/form/reset", post(reset_form))
        .route("/form/:field", put(change_field))
        .route("/form/:field/blur", post(blur_field))
        .route("/:id", get(get_vehicle).delete(delete_vehicle))
}

fn parse_field(raw: &str) -> Result<VehicleField, AppError> {
    raw.parse::<VehicleField>()
        .map_err(|e| bad_request_error(&e.to_string()))
}

/// Código HTTP para un envío que no llegó a guardarse
fn submit_status(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn list_vehicles(State(state): State<AppState>) -> Json<Vec<VehicleRow>> {
    let mut panel = state.panel.lock().await;
    panel.reload().await;
    Json(panel.rows())
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VehicleRecord>, AppError> {
    let repository = state.panel.lock().await.repository().clone();
    repository
        .find_vehicle(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Veículo '{}' não encontrado", id)))
}

/// Eliminar y devolver el listado recargado. Los fallos sólo van al log.
async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<VehicleRow>> {
    let mut panel = state.panel.lock().await;
    panel.delete(&id).await;
    Json(panel.rows())
}

async fn get_form(State(state): State<AppState>) -> Json<FormSnapshot> {
    Json(state.panel.lock().await.snapshot())
}

async fn change_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(request): Json<FieldChangeRequest>,
) -> Result<Json<FormSnapshot>, AppError> {
    let field = parse_field(&field)?;
    let mut panel = state.panel.lock().await;
    panel.change_field(field, &request.value);
    Ok(Json(panel.snapshot()))
}

async fn blur_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
) -> Result<Json<FormSnapshot>, AppError> {
    let field = parse_field(&field)?;
    let mut panel = state.panel.lock().await;
    panel.blur_field(field);
    Ok(Json(panel.snapshot()))
}

async fn reset_form(State(state): State<AppState>) -> Json<FormSnapshot> {
    let mut panel = state.panel.lock().await;
    panel.reset();
    Json(panel.snapshot())
}

/// Envío en dos fases: el lock del panel se libera mientras el destino responde.
/// La segunda fase corre en su propia tarea, así termina aunque el cliente
/// abandone la petición.
async fn submit_form(State(state): State<AppState>) -> (StatusCode, Json<FormSnapshot>) {
    let (record, submitter) = {
        let mut panel = state.panel.lock().await;
        match panel.begin_submit(Utc::now()) {
            Ok(record) => (record, panel.submitter()),
            Err(e) => return (submit_status(&e), Json(panel.snapshot())),
        }
    };

    let panel = Arc::clone(&state.panel);
    let task = tokio::spawn(async move {
        debug!("📤 Enviando vehículo {}", record.id);
        let outcome = submitter.submit(&record).await;
        let status = match &outcome {
            Ok(_) => StatusCode::OK,
            Err(e) => submit_status(e),
        };

        let mut panel = panel.lock().await;
        if panel.finish_submit(&outcome) {
            panel.reload().await;
        }
        (status, panel.snapshot())
    });

    match task.await {
        Ok((status, snapshot)) => (status, Json(snapshot)),
        Err(e) => {
            error!("❌ Tarea de envío abortada: {}", e);
            let failure = AppError::Internal(format!("tarea de envío abortada: {}", e));
            let status = submit_status(&failure);
            let mut panel = state.panel.lock().await;
            panel.finish_submit(&Err(failure));
            (status, Json(panel.snapshot()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_status_mapping() {
        let conflict = AppError::Conflict("em andamento".to_string());
        assert_eq!(submit_status(&conflict), StatusCode::CONFLICT);

        let aborted = AppError::Internal("tarea de envío abortada".to_string());
        assert_eq!(submit_status(&aborted), StatusCode::INTERNAL_SERVER_ERROR);

        let remote = AppError::ExternalApi("connection refused".to_string());
        assert_eq!(submit_status(&remote), StatusCode::BAD_GATEWAY);
    }
}
