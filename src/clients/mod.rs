//! Clients - HTTP Clients for External APIs
//! 
//! This module contains HTTP clients for communicating with external APIs.

pub mod vehicle_api_client;

pub use vehicle_api_client::VehicleApiClient;
