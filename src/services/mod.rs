//! Services module
//! 
//! Este módulo contiene la lógica del formulario de cadastro: estado del
//! formulario, renderizado del listado y el contrato de envío.

pub mod form_state;
pub mod vehicle_list_renderer;
pub mod vehicle_submitter;

pub use form_state::*;
pub use vehicle_list_renderer::*;
pub use vehicle_submitter::*;
