//! Degen Scanner WASM frontend.
//!
//! Browser shell around `ds-scanner-core`: binds the page, the Phantom provider,
//! `fetch` and `localStorage` to the controller.

pub mod api;
pub mod dom;
pub mod events;
pub mod provider;
pub mod shell;
pub mod state;
pub mod theme;

use std::rc::Rc;

use ds_scanner_core::Controller;
use tracing::{Level, info};
use wasm_bindgen::prelude::*;

use crate::api::FetchClient;
use crate::provider::PhantomProvider;
use crate::shell::BrowserShell;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let config = state::load_config();
    init_logging(&config.log_level);

    let els = dom::Elements::bind()?;
    theme::restore(&els, &config.theme_key);

    let provider = PhantomProvider::detect();
    if provider.is_none() {
        info!("Phantom not detected");
    }

    let client = FetchClient::new(config.clone());
    let shell = BrowserShell::new(els.clone());
    let controller = Rc::new(Controller::new(
        config,
        provider.clone(),
        client.clone(),
        client,
        shell,
    ));

    if let Some(provider) = &provider {
        provider.subscribe(&controller);
    }
    events::bind_events(&controller, &els)?;

    controller.attempt_silent_connect().await;
    Ok(())
}

fn init_logging(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(level)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}
