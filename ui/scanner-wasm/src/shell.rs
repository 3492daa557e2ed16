//! Applies controller views to the page and performs browser side effects.

use std::cell::RefCell;

use ds_scanner_core::{CardImage, ReportView, Shell, View};
use js_sys::{Array, Uint8Array};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

use crate::dom::{self, Elements};

pub struct BrowserShell {
    els: Elements,
    /// Last report written to the page; avoids rebuilding identical markup.
    shown_report: RefCell<Option<ReportView>>,
}

impl BrowserShell {
    pub fn new(els: Elements) -> Self {
        Self {
            els,
            shown_report: RefCell::new(None),
        }
    }

    fn render_report(&self, report: &ReportView) -> Result<(), JsValue> {
        if self.shown_report.borrow().as_ref() == Some(report) {
            return Ok(());
        }
        let target = &self.els.report_content;
        match report {
            ReportView::Hidden => {
                target.set_inner_html("");
                dom::set_visible(target, false, "block");
            }
            ReportView::Empty => {
                target.set_inner_html("");
                dom::set_visible(target, true, "block");
            }
            ReportView::Markup(markup) => {
                target.set_inner_html(markup);
                dom::set_visible(target, true, "block");
            }
            ReportView::Failure(message) => {
                let container = dom::create_element("div")?;
                container.set_class_name("report-container card");
                let line: HtmlElement = dom::create_element("p")?.dyn_into()?;
                line.set_class_name("scan-error");
                let _ = line.style().set_property("color", "red");
                line.set_text_content(Some(&format!("Scan failed: {message}")));
                container.append_child(&line)?;
                target.set_inner_html("");
                target.append_child(&container)?;
                dom::set_visible(target, true, "block");
            }
        }
        *self.shown_report.borrow_mut() = Some(report.clone());
        Ok(())
    }

    fn save_blob(&self, filename: &str, image: &CardImage) -> Result<(), JsValue> {
        let parts = Array::of1(&Uint8Array::from(image.bytes.as_slice()));
        let props = BlobPropertyBag::new();
        props.set_type(image.content_type.as_deref().unwrap_or("image/png"));
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let anchor: HtmlAnchorElement = dom::create_element("a")?.dyn_into()?;
        let _ = anchor.style().set_property("display", "none");
        anchor.set_href(&url);
        anchor.set_download(filename);
        let body = dom::document()?
            .body()
            .ok_or_else(|| JsValue::from_str("missing body"))?;
        body.append_child(&anchor)?;
        anchor.click();
        Url::revoke_object_url(&url)?;
        anchor.remove();
        Ok(())
    }
}

impl Shell for BrowserShell {
    fn render(&self, view: &View) {
        let els = &self.els;

        dom::set_visible(&els.wallet_connector, view.connector_visible, "block");
        dom::set_visible(&els.connect_btn, view.connect_button.visible, "inline-block");
        els.connect_btn.set_disabled(!view.connect_button.enabled);
        dom::set_text(&els.connect_btn, view.connect_button.label);

        dom::set_visible(&els.scanner_section, view.scanner_visible, "block");
        dom::set_text(&els.wallet_address, view.wallet_label.as_deref().unwrap_or(""));
        dom::set_visible(&els.loading, view.loading_visible, "block");

        if let Err(err) = self.render_report(&view.report) {
            warn!("report render failed: {:?}", err);
        }

        let card = &view.card_button;
        dom::set_visible(&els.download_card_btn, card.visible, "inline-block");
        els.download_card_btn.set_disabled(!card.enabled);
        dom::set_text(&els.download_card_btn, card.label);
        dom::set_visible(&els.share_twitter_btn, view.share_visible, "inline-block");
    }

    fn alert(&self, message: &str) {
        if let Ok(window) = dom::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn download(&self, filename: &str, image: &CardImage) {
        if let Err(err) = self.save_blob(filename, image) {
            warn!("card download failed: {:?}", err);
            self.alert("Error: could not save the generated card.");
        }
    }

    fn open_url(&self, url: &str) {
        let opened = dom::window().and_then(|w| w.open_with_url_and_target(url, "_blank"));
        if let Err(err) = opened {
            warn!("could not open {}: {:?}", url, err);
        }
    }
}
