//! Estado del formulario de cadastro
//! 
//! Guarda los valores crudos de los cinco campos, los mensajes de error,
//! los campos "tocados" y la validez global. Cada cambio revalida los cinco
//! campos.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use validator::ValidationErrors;

use crate::models::vehicle::{VehicleField, VehicleRecord};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{normalize_plate, FieldValidator, PLATE_MAX_LEN};

/// Filtrar la entrada del usuario antes de guardarla en el formulario
pub fn filter_input(field: VehicleField, raw: &str) -> String {
    match field {
        VehicleField::Ano => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        VehicleField::Placa => raw
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
            .take(PLATE_MAX_LEN)
            .collect(),
        _ => raw.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    validator: FieldValidator,
    values: BTreeMap<VehicleField, String>,
    errors: BTreeMap<VehicleField, String>,
    touched: BTreeMap<VehicleField, bool>,
    is_valid: bool,
}

impl FormState {
    pub fn new(validator: FieldValidator) -> Self {
        let mut state = Self {
            validator,
            values: VehicleField::ALL.iter().map(|f| (*f, String::new())).collect(),
            errors: BTreeMap::new(),
            touched: BTreeMap::new(),
            is_valid: false,
        };
        state.revalidate_all();
        state
    }

    pub fn value(&self, field: VehicleField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<VehicleField, String> {
        &self.values
    }

    /// Error actual del campo (vacío = válido), aunque no esté tocado
    pub fn error(&self, field: VehicleField) -> &str {
        self.errors.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &BTreeMap<VehicleField, String> {
        &self.errors
    }

    /// Error a mostrar: sólo para campos tocados
    pub fn visible_error(&self, field: VehicleField) -> Option<&str> {
        let message = self.error(field);
        if self.is_touched(field) && !message.is_empty() {
            Some(message)
        } else {
            None
        }
    }

    pub fn is_touched(&self, field: VehicleField) -> bool {
        self.touched.get(&field).copied().unwrap_or(false)
    }

    pub fn touched(&self) -> &BTreeMap<VehicleField, bool> {
        &self.touched
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Registrar un cambio de campo; devuelve el valor ya filtrado
    pub fn change(&mut self, field: VehicleField, raw: &str) -> &str {
        let filtered = filter_input(field, raw);
        self.values.insert(field, filtered);
        self.revalidate_all();
        self.value(field)
    }

    /// Marcar el campo como tocado y recalcular su error
    pub fn blur(&mut self, field: VehicleField) {
        self.touched.insert(field, true);
        let message = self.validator.validate_field(field, self.value(field));
        self.errors.insert(field, message);
        self.is_valid = self.errors.values().all(String::is_empty);
    }

    /// Validación completa previa al envío: marca todos los campos como
    /// tocados y devuelve los errores estructurados si los hay.
    pub fn validate_for_submit(&mut self) -> Result<(), ValidationErrors> {
        for field in VehicleField::ALL {
            self.touched.insert(field, true);
        }
        self.revalidate_all();

        let mut failures = ValidationErrors::new();
        for field in VehicleField::ALL {
            if let Err(error) = self.validator.check_field(field, self.value(field)) {
                failures.add(field.as_str(), error);
            }
        }

        if failures.errors().is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    /// Construir el registro normalizado a partir de un formulario válido
    pub fn build_record(&self, now: DateTime<Utc>) -> AppResult<VehicleRecord> {
        let ano = self.value(VehicleField::Ano).trim().parse::<i32>().map_err(|_| {
            AppError::BadRequest(format!("ano inválido: '{}'", self.value(VehicleField::Ano)))
        })?;

        Ok(VehicleRecord {
            id: VehicleRecord::key_for(now),
            placa: normalize_plate(self.value(VehicleField::Placa)),
            marca: self.value(VehicleField::Marca).trim().to_string(),
            modelo: self.value(VehicleField::Modelo).trim().to_string(),
            ano,
            proprietario: self.value(VehicleField::Proprietario).trim().to_string(),
            data_cadastro: now,
        })
    }

    /// Volver al formulario vacío
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.touched.clear();
        self.revalidate_all();
    }

    fn revalidate_all(&mut self) {
        for field in VehicleField::ALL {
            let message = self.validator.validate_field(field, self.value(field));
            self.errors.insert(field, message);
        }
        self.is_valid = self.errors.values().all(String::is_empty);
    }
}
