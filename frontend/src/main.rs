use log::{error, info};

use hackathon_site::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if let Err(e) = console_log::init_with_level(config::log_level()) {
        gloo_console::error!("error initializing log:", e.to_string());
    }

    info!("Starting page script");
    if let Err(e) = hackathon_site::start() {
        error!("Page script not started: {}", e);
    }
}
