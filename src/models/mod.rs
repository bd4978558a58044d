//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos del cadastro de vehículos
//! tal como se serializan en el almacenamiento clave-valor.

pub mod vehicle;

pub use vehicle::*;
