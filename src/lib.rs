use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
#[cfg(not(feature = "logic-only"))]
pub mod presentation;
pub mod view_state;

/// Installs the console logger, the browser clock and the panic hook.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let logger: Box<dyn domain::logging::Logger> = if cfg!(debug_assertions) {
        Box::new(infrastructure::ConsoleLogger::new_development())
    } else {
        Box::new(infrastructure::ConsoleLogger::new_production())
    };
    domain::logging::init_logger(logger);
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "liquidity chart module ready");
}
