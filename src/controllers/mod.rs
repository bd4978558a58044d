pub mod vehicle_form_controller;

pub use vehicle_form_controller::VehicleFormPanel;
