//! Event binding.
//!
//! Wires all UI event listeners to the controller. Async handlers are spawned
//! via `wasm_bindgen_futures::spawn_local`.

use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::{self, Elements};
use crate::state::AppController;
use crate::theme;

/// Id of the refresh control inside server-rendered report markup.
pub const REFRESH_BUTTON_ID: &str = "refreshBtn";

/// Helper: attach async click handler that receives the controller.
macro_rules! on_click_async {
    ($el:expr, $ctl:expr, $els:expr, $handler:expr) => {{
        let ctl = Rc::clone($ctl);
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let ctl2 = Rc::clone(&ctl);
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&ctl2, &els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(ctl: &Rc<AppController>, els: &Elements) -> Result<(), JsValue> {
    // ── Wallet ──
    on_click_async!(els.connect_btn, ctl, els, on_connect);
    on_click_async!(els.disconnect_btn, ctl, els, on_disconnect);

    // ── Scan ──
    on_click_async!(els.scan_btn, ctl, els, on_scan);
    {
        // The report is replaced wholesale on every scan, so listen on the container.
        let ctl2 = Rc::clone(ctl);
        on_click!(els.report_content, move |ev: web_sys::MouseEvent| {
            if !is_refresh_target(&ev) {
                return;
            }
            let ctl3 = Rc::clone(&ctl2);
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = ctl3.refresh_scan().await;
                debug!(?outcome, "refresh");
            });
        });
    }

    // ── Report actions ──
    on_click_async!(els.download_card_btn, ctl, els, on_download_card);
    {
        let ctl2 = Rc::clone(ctl);
        on_click!(els.share_twitter_btn, move |_: web_sys::MouseEvent| {
            if ctl2.share().is_none() {
                debug!("share clicked without a report");
            }
        });
    }

    // ── Theme ──
    {
        let els2 = els.clone();
        on_click!(els.theme_toggle_btn, move |_: web_sys::MouseEvent| {
            theme::toggle(&els2);
        });
    }

    Ok(())
}

fn is_refresh_target(ev: &web_sys::MouseEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .is_some_and(|el| el.id() == REFRESH_BUTTON_ID)
}

async fn on_connect(ctl: &Rc<AppController>, _els: &Elements) {
    // Failures are alerted by the controller.
    let _ = ctl.connect().await;
}

async fn on_disconnect(ctl: &Rc<AppController>, _els: &Elements) {
    let _ = ctl.disconnect().await;
}

async fn on_scan(ctl: &Rc<AppController>, els: &Elements) {
    let address = dom::get_input_value(&els.token_address_input);
    let outcome = ctl.start_scan(&address).await;
    debug!(?outcome, "scan");
}

async fn on_download_card(ctl: &Rc<AppController>, _els: &Elements) {
    let outcome = ctl.generate_card().await;
    debug!(?outcome, "card");
}
