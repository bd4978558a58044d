//! Modelo de Vehicle
//!
//! Este módulo contiene el registro persistido del vehículo y los nombres
//! de los campos del formulario de cadastro.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefijo de las claves de vehículos en el almacenamiento clave-valor
pub const VEHICLE_KEY_PREFIX: &str = "vehicle:";

/// Campos del formulario, en el orden en que se muestran
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleField {
    Placa,
    Marca,
    Modelo,
    Ano,
    Proprietario,
}

impl VehicleField {
    /// Todos los campos - el formulario siempre tiene exactamente estos cinco
    pub const ALL: [VehicleField; 5] = [
        VehicleField::Placa,
        VehicleField::Marca,
        VehicleField::Modelo,
        VehicleField::Ano,
        VehicleField::Proprietario,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleField::Placa => "placa",
            VehicleField::Marca => "marca",
            VehicleField::Modelo => "modelo",
            VehicleField::Ano => "ano",
            VehicleField::Proprietario => "proprietario",
        }
    }
}

impl fmt::Display for VehicleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error al interpretar un nombre de campo desconocido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "campo desconhecido: '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for VehicleField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "placa" => Ok(VehicleField::Placa),
            "marca" => Ok(VehicleField::Marca),
            "modelo" => Ok(VehicleField::Modelo),
            "ano" => Ok(VehicleField::Ano),
            "proprietario" => Ok(VehicleField::Proprietario),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Registro de vehículo persistido - nunca se modifica in place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub ano: i32,
    pub proprietario: String,
    pub data_cadastro: DateTime<Utc>,
}

impl VehicleRecord {
    /// Generar la clave `vehicle:<timestamp>` a partir del instante de creación.
    /// No se verifica colisión: dos registros en el mismo milisegundo comparten id.
    pub fn key_for(created_at: DateTime<Utc>) -> String {
        format!("{}{}", VEHICLE_KEY_PREFIX, created_at.timestamp_millis())
    }

    /// Cuerpo enviado al endpoint remoto (sin id ni fecha)
    pub fn payload(&self) -> VehiclePayload {
        VehiclePayload {
            placa: self.placa.clone(),
            marca: self.marca.clone(),
            modelo: self.modelo.clone(),
            ano: self.ano,
            proprietario: self.proprietario.clone(),
        }
    }
}

/// Payload de creación para el transporte HTTP alternativo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePayload {
    pub placa: String,
    pub marca: String,
    pub modelo: String,
    pub ano: i32,
    pub proprietario: String,
}
