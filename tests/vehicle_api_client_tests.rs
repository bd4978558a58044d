use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use vehicle_registry::clients::VehicleApiClient;
use vehicle_registry::controllers::VehicleFormPanel;
use vehicle_registry::models::vehicle::{VehicleField, VehiclePayload};
use vehicle_registry::repositories::VehicleRepository;
use vehicle_registry::storage::MemoryStorage;
use vehicle_registry::utils::errors::AppError;
use vehicle_registry::utils::validation::FieldValidator;

/// Levantar un endpoint falso en un puerto libre
async fn spawn_endpoint() -> SocketAddr {
    let app = Router::new()
        .route(
            "/api/vehicle",
            post(|Json(body): Json<Value>| async move {
                (StatusCode::CREATED, Json(json!({ "id": 42, "placa": body["placa"] })))
            }),
        )
        .route("/api/empty", post(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/api/reject",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "placa duplicada") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn payload() -> VehiclePayload {
    VehiclePayload {
        placa: "ABC1234".to_string(),
        marca: "Toyota".to_string(),
        modelo: "Corolla".to_string(),
        ano: 2023,
        proprietario: "João Silva".to_string(),
    }
}

#[tokio::test]
async fn test_create_vehicle_returns_json_body() {
    let addr = spawn_endpoint().await;
    let client = VehicleApiClient::new(format!("http://{}/api/vehicle", addr));
    assert_eq!(client.endpoint(), format!("http://{}/api/vehicle", addr));

    let body = client.create_vehicle(&payload()).await.unwrap();

    assert_eq!(body, Some(json!({ "id": 42, "placa": "ABC1234" })));
}

#[tokio::test]
async fn test_create_vehicle_accepts_empty_body() {
    let addr = spawn_endpoint().await;
    let client = VehicleApiClient::new(format!("http://{}/api/empty", addr));

    assert_eq!(client.create_vehicle(&payload()).await.unwrap(), None);
}

#[tokio::test]
async fn test_non_success_status_is_reported_with_body() {
    let addr = spawn_endpoint().await;
    let client = VehicleApiClient::new(format!("http://{}/api/reject", addr));

    let err = client.create_vehicle(&payload()).await.unwrap_err();

    match &err {
        AppError::RemoteRejected { status, status_text, body } => {
            assert_eq!(*status, 422);
            assert_eq!(status_text, "Unprocessable Entity");
            assert_eq!(body, "placa duplicada");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        err.user_message(),
        "Erro na requisição: 422 Unprocessable Entity - placa duplicada"
    );
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_send_failure() {
    // Puerto reservado y liberado: nadie escucha ahí
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VehicleApiClient::new(format!("http://{}/api/vehicle", addr));
    let err = client.create_vehicle(&payload()).await.unwrap_err();

    assert!(matches!(err, AppError::ExternalApi(_)));
    assert!(err.user_message().starts_with("Falha ao enviar:"));
}

#[tokio::test]
async fn test_panel_submits_through_remote_endpoint() {
    let addr = spawn_endpoint().await;
    let storage = MemoryStorage::new();
    let mut panel = VehicleFormPanel::new(
        VehicleRepository::new(Arc::new(storage.clone())),
        FieldValidator::with_current_year(2025),
    )
    .with_submitter(Arc::new(VehicleApiClient::new(format!("http://{}/api/vehicle", addr))));

    panel.change_field(VehicleField::Placa, "abc-1234");
    panel.change_field(VehicleField::Marca, "Toyota");
    panel.change_field(VehicleField::Modelo, "Corolla");
    panel.change_field(VehicleField::Ano, "2023");
    panel.change_field(VehicleField::Proprietario, "João Silva");

    let record = panel.submit().await.unwrap();

    assert_eq!(record.placa, "ABC1234");
    let message = panel.result_message().unwrap();
    assert!(message.starts_with("Veículo salvo com sucesso. Resposta:"));
    assert!(message.contains("\"id\":42"));
    // El transporte remoto no escribe en el almacenamiento local
    assert!(storage.is_empty().await);
    assert_eq!(panel.form().value(VehicleField::Placa), "");
}
