//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Sin URL se usa el almacenamiento en memoria
    pub redis_url: Option<String>,
    /// Con URL los envíos van al endpoint HTTP en lugar del almacenamiento
    pub vehicle_api_url: Option<String>,
    /// Vacío = CORS permisivo
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            redis_url: None,
            vehicle_api_url: None,
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración desde una función de búsqueda de variables
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::Configuration(format!("PORT must be a valid number, got '{}'", raw))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            environment: non_empty("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: non_empty("HOST").unwrap_or(defaults.host),
            redis_url: non_empty("REDIS_URL"),
            vehicle_api_url: non_empty("VEHICLE_API_URL"),
            cors_origins: non_empty("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EnvironmentConfig::default());
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("REDIS_URL", "redis://cache:6379"),
            ("VEHICLE_API_URL", "https://example.com/api/vehicle"),
            ("CORS_ORIGINS", "http://localhost:5173, https://app.example.com,"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.vehicle_api_url.as_deref(), Some("https://example.com/api/vehicle"));
        assert_eq!(config.cors_origins, vec!["http://localhost:5173", "https://app.example.com"]);
    }

    #[test]
    fn test_invalid_port_is_a_configuration_error() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[("REDIS_URL", "  ")])).unwrap();
        assert_eq!(config.redis_url, None);
    }
}
