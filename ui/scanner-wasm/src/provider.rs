//! Phantom wallet provider binding (`window.phantom.solana`).

use std::rc::Rc;

use async_trait::async_trait;
use ds_scanner_core::{WalletError, WalletProvider};
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;
use crate::state::AppController;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type SolanaProvider;

    #[wasm_bindgen(method, getter, js_name = isPhantom)]
    fn is_phantom(this: &SolanaProvider) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = publicKey)]
    fn public_key(this: &SolanaProvider) -> JsValue;

    #[wasm_bindgen(method, catch)]
    fn connect(this: &SolanaProvider, opts: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn disconnect(this: &SolanaProvider) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &SolanaProvider, event: &str, callback: &Function);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectOptions {
    only_if_trusted: bool,
}

#[derive(Clone)]
pub struct PhantomProvider {
    inner: SolanaProvider,
}

impl PhantomProvider {
    /// `None` when Phantom is not installed.
    pub fn detect() -> Option<Self> {
        let window = dom::window().ok()?;
        let phantom = Reflect::get(&window, &JsValue::from_str("phantom")).ok()?;
        if phantom.is_undefined() || phantom.is_null() {
            return None;
        }
        let solana = Reflect::get(&phantom, &JsValue::from_str("solana")).ok()?;
        if solana.is_undefined() || solana.is_null() {
            return None;
        }
        let inner: SolanaProvider = solana.unchecked_into();
        inner
            .is_phantom()
            .is_truthy()
            .then_some(Self { inner })
    }

    /// Forward the provider's own `connect`/`disconnect` events to the controller.
    pub fn subscribe(&self, controller: &Rc<AppController>) {
        let ctl = controller.clone();
        let on_connect = Closure::wrap(Box::new(move |public_key: JsValue| {
            match base58(&public_key) {
                Some(id) => {
                    ctl.handle_connect(&id);
                }
                None => debug!("connect event without a public key"),
            }
        }) as Box<dyn FnMut(JsValue)>);
        self.inner
            .on("connect", on_connect.as_ref().unchecked_ref());
        on_connect.forget();

        let ctl = controller.clone();
        let on_disconnect = Closure::wrap(Box::new(move || {
            ctl.handle_disconnect();
        }) as Box<dyn FnMut()>);
        self.inner
            .on("disconnect", on_disconnect.as_ref().unchecked_ref());
        on_disconnect.forget();
    }
}

fn js_error(err: JsValue) -> WalletError {
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    WalletError::Rejected(message)
}

/// `publicKey.toBase58()` of a Solana public key object.
fn base58(public_key: &JsValue) -> Option<String> {
    if public_key.is_undefined() || public_key.is_null() {
        return None;
    }
    let to_base58: Function = Reflect::get(public_key, &JsValue::from_str("toBase58"))
        .ok()?
        .dyn_into()
        .ok()?;
    to_base58.call0(public_key).ok()?.as_string()
}

#[async_trait(?Send)]
impl WalletProvider for PhantomProvider {
    async fn connect(&self, only_if_trusted: bool) -> Result<String, WalletError> {
        let opts = serde_wasm_bindgen::to_value(&ConnectOptions { only_if_trusted })
            .map_err(|err| WalletError::Rejected(err.to_string()))?;
        let promise = self.inner.connect(&opts).map_err(js_error)?;
        let resolved = JsFuture::from(promise).await.map_err(js_error)?;

        let key = Reflect::get(&resolved, &JsValue::from_str("publicKey"))
            .ok()
            .filter(|k| !k.is_undefined())
            .unwrap_or_else(|| self.inner.public_key());
        base58(&key).ok_or_else(|| WalletError::Rejected("provider returned no public key".into()))
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        let promise = self.inner.disconnect().map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }
}
