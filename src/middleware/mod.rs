//! Middleware
//! 
//! Este módulo contiene el middleware HTTP del servicio.

pub mod cors;
