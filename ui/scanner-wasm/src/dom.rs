//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a field
//! here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

// ── Helpers ──

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok()?
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Show or hide via inline `display`, keeping the element's own layout when shown.
pub fn set_visible(el: &HtmlElement, visible: bool, display: &str) {
    let value = if visible { display } else { "none" };
    let _ = el.style().set_property("display", value);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

// ── Elements struct ──

/// All DOM element references used by the scanner page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub root: Element,

    // Wallet
    pub wallet_connector: HtmlElement,
    pub connect_btn: HtmlButtonElement,
    pub disconnect_btn: HtmlButtonElement,
    pub wallet_address: Element,

    // Scanner
    pub scanner_section: HtmlElement,
    pub token_address_input: HtmlInputElement,
    pub scan_btn: HtmlButtonElement,
    pub loading: HtmlElement,
    pub report_content: HtmlElement,

    // Report actions
    pub download_card_btn: HtmlButtonElement,
    pub share_twitter_btn: HtmlButtonElement,

    // Theme
    pub theme_toggle_btn: HtmlButtonElement,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after load.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            root: document()?
                .document_element()
                .ok_or_else(|| JsValue::from_str("missing document element"))?,

            wallet_connector: get_typed!(HtmlElement, "wallet-connector"),
            connect_btn: get_typed!(HtmlButtonElement, "connectBtn"),
            disconnect_btn: get_typed!(HtmlButtonElement, "disconnectBtn"),
            wallet_address: get_el!("walletAddress"),

            scanner_section: get_typed!(HtmlElement, "scannerSection"),
            token_address_input: get_typed!(HtmlInputElement, "tokenAddressInput"),
            scan_btn: get_typed!(HtmlButtonElement, "scanBtn"),
            loading: get_typed!(HtmlElement, "loading"),
            report_content: get_typed!(HtmlElement, "report-content"),

            download_card_btn: get_typed!(HtmlButtonElement, "downloadCardBtn"),
            share_twitter_btn: get_typed!(HtmlButtonElement, "shareTwitterBtn"),

            theme_toggle_btn: get_typed!(HtmlButtonElement, "themeToggleBtn"),
        })
    }
}
