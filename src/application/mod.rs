pub mod chart_service;
pub mod events;

pub use chart_service::*;
pub use events::*;
