//! Cadastro de veículos
//!
//! Formulario de registro de vehículos con validación por campo, estado
//! del formulario y persistencia en un almacenamiento clave-valor.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;
