//! Utilidades de validación
//!
//! Este módulo contiene las reglas de validación por campo del formulario
//! de cadastro. Cada regla devuelve un `ValidationError` con el mensaje que
//! se muestra junto al campo; `FieldValidator::validate` lo aplana a un
//! string (vacío = válido).

use std::borrow::Cow;

use chrono::{Datelike, Local};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::vehicle::VehicleField;

/// Año del primer automóvil patentado
pub const MIN_VEHICLE_YEAR: i32 = 1886;

pub const PLATE_MIN_LEN: usize = 4;
pub const PLATE_MAX_LEN: usize = 8;

lazy_static! {
    /// 3 letras seguidas de 4-5 alfanuméricos (formato antiguo y Mercosul)
    static ref PLATE_REGEX: Regex = Regex::new(r"^[A-Z]{3}[0-9A-Z]{4,5}$").unwrap();
}

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Normalizar una placa: mayúsculas y sin guiones
pub fn normalize_plate(value: &str) -> String {
    value.to_uppercase().replace('-', "")
}

/// Validar formato de placa brasileña
pub fn validate_plate(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule_error("required", "Placa é obrigatória.".to_string()));
    }

    let normalized = normalize_plate(value);
    let len = normalized.chars().count();
    if len < PLATE_MIN_LEN || len > PLATE_MAX_LEN || !PLATE_REGEX.is_match(&normalized) {
        let mut error = rule_error(
            "plate",
            "Placa inválida (use 3 letras seguidas de 4-5 caracteres alfanuméricos).".to_string(),
        );
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar año del vehículo dentro de [1886, año_actual + 1]
pub fn validate_year(value: &str, current_year: i32) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule_error("required", "Ano é obrigatório.".to_string()));
    }

    let year: i64 = trimmed
        .parse()
        .map_err(|_| rule_error("numeric", "Ano deve ser numérico.".to_string()))?;

    let max_year = i64::from(current_year) + 1;
    if year < i64::from(MIN_VEHICLE_YEAR) || year > max_year {
        let mut error = rule_error(
            "range",
            format!("Ano inválido (entre {} e {}).", MIN_VEHICLE_YEAR, max_year),
        );
        error.add_param("min".into(), &MIN_VEHICLE_YEAR);
        error.add_param("max".into(), &max_year);
        error.add_param("actual".into(), &year);
        return Err(error);
    }
    Ok(())
}

/// Validar campo de texto obligatorio con longitud mínima
pub fn validate_min_length(
    value: &str,
    min: usize,
    required_message: &str,
    short_message: &str,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule_error("required", required_message.to_string()));
    }

    let len = trimmed.chars().count();
    if len < min {
        let mut error = rule_error("length", short_message.to_string());
        error.add_param("min".into(), &min);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validador de campos con el año de referencia fijado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldValidator {
    current_year: i32,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldValidator {
    /// Crear validador usando el año del reloj local
    pub fn new() -> Self {
        Self {
            current_year: Local::now().year(),
        }
    }

    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Validar por nombre de campo. Nombres desconocidos no producen error.
    pub fn validate(&self, field_name: &str, raw_value: &str) -> String {
        match field_name.parse::<VehicleField>() {
            Ok(field) => self.validate_field(field, raw_value),
            Err(_) => String::new(),
        }
    }

    /// Validar un campo conocido; string vacío = válido
    pub fn validate_field(&self, field: VehicleField, raw_value: &str) -> String {
        match self.check_field(field, raw_value) {
            Ok(()) => String::new(),
            Err(error) => error
                .message
                .map(|m| m.into_owned())
                .unwrap_or_else(|| error.code.into_owned()),
        }
    }

    /// Aplicar la regla del campo conservando el error estructurado
    pub fn check_field(&self, field: VehicleField, raw_value: &str) -> Result<(), ValidationError> {
        match field {
            VehicleField::Placa => validate_plate(raw_value),
            VehicleField::Marca => {
                validate_min_length(raw_value, 2, "Marca é obrigatória.", "Marca muito curta.")
            }
            VehicleField::Modelo => {
                validate_min_length(raw_value, 1, "Modelo é obrigatório.", "Modelo muito curto.")
            }
            VehicleField::Ano => validate_year(raw_value, self.current_year),
            VehicleField::Proprietario => validate_min_length(
                raw_value,
                3,
                "Proprietário é obrigatório.",
                "Informe ao menos 3 caracteres para o proprietário.",
            ),
        }
    }
}

/// Validar con el año actual del reloj local
pub fn validate(field_name: &str, raw_value: &str) -> String {
    FieldValidator::new().validate(field_name, raw_value)
}
