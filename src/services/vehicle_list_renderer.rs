//! Renderizado del listado de vehículos
//! 
//! Convierte los registros en memoria en filas listas para mostrar.
//! Sin paginación, orden ni búsqueda: se respeta el orden del almacenamiento.

use serde::Serialize;

use crate::models::vehicle::VehicleRecord;

/// Fila del listado; `id` es el destino de la acción de eliminar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRow {
    pub id: String,
    pub placa: String,
    pub descricao: String,
    pub proprietario: String,
    pub cadastrado_em: String,
}

impl From<&VehicleRecord> for VehicleRow {
    fn from(record: &VehicleRecord) -> Self {
        Self {
            id: record.id.clone(),
            placa: record.placa.clone(),
            descricao: format!("{} {} ({})", record.marca, record.modelo, record.ano),
            proprietario: record.proprietario.clone(),
            cadastrado_em: record.data_cadastro.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

pub fn render_rows(vehicles: &[VehicleRecord]) -> Vec<VehicleRow> {
    vehicles.iter().map(VehicleRow::from).collect()
}

/// Tabla en texto plano, una línea por vehículo
pub fn render_text(vehicles: &[VehicleRecord]) -> String {
    if vehicles.is_empty() {
        return "Nenhum veículo cadastrado.".to_string();
    }

    render_rows(vehicles)
        .iter()
        .map(|row| {
            format!(
                "{:<8} | {} | {} | {}",
                row.placa, row.descricao, row.proprietario, row.cadastrado_em
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(placa: &str) -> VehicleRecord {
        let created_at = Utc.with_ymd_and_hms(2024, 12, 24, 18, 5, 0).unwrap();
        VehicleRecord {
            id: VehicleRecord::key_for(created_at),
            placa: placa.to_string(),
            marca: "Fiat".to_string(),
            modelo: "Uno".to_string(),
            ano: 2012,
            proprietario: "Ana Souza".to_string(),
            data_cadastro: created_at,
        }
    }

    #[test]
    fn test_row_rendering() {
        let row = VehicleRow::from(&record("ABC1234"));
        assert_eq!(row.descricao, "Fiat Uno (2012)");
        assert_eq!(row.cadastrado_em, "24/12/2024 18:05");
        assert!(row.id.starts_with("vehicle:"));
    }

    #[test]
    fn test_render_text_keeps_store_order() {
        assert_eq!(render_text(&[]), "Nenhum veículo cadastrado.");

        let text = render_text(&[record("XYZ9876"), record("ABC1234")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("XYZ9876"));
        assert!(lines[1].contains("Ana Souza"));
    }
}
