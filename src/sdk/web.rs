//! Browser binding for the page's global `sdk` object

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{AdSdk, EventKind, Handler, ListenerId, SdkEvent};
use crate::error::{Error, Result};

#[wasm_bindgen]
extern "C" {
    /// Ad SDK object exposed by the hosting page
    pub type JsSdk;

    #[wasm_bindgen(method)]
    fn start(this: &JsSdk);

    #[wasm_bindgen(method)]
    fn install(this: &JsSdk);

    #[wasm_bindgen(method)]
    fn finish(this: &JsSdk);

    #[wasm_bindgen(method, getter)]
    fn interactions(this: &JsSdk) -> JsValue;

    #[wasm_bindgen(method)]
    fn on(this: &JsSdk, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &JsSdk, event: &str, handler: &js_sys::Function);
}

type JsListener = Closure<dyn Fn(JsValue, JsValue)>;

/// [`AdSdk`] over the JS SDK
///
/// JS closures stay alive in `listeners` until unsubscribed; dropping the
/// closure after `off` frees it.
pub struct WebSdk {
    js: JsSdk,
    next_id: Cell<u32>,
    listeners: RefCell<HashMap<ListenerId, (EventKind, JsListener)>>,
}

impl WebSdk {
    /// Bind to `globalThis.sdk`
    pub fn from_global() -> Result<Self> {
        let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("sdk"))
            .map_err(|_| Error::SdkUnavailable)?;
        if !value.is_object() {
            return Err(Error::SdkUnavailable);
        }
        Ok(Self {
            js: value.unchecked_into(),
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        })
    }
}

impl AdSdk for WebSdk {
    fn start(&self) {
        self.js.start();
    }

    fn install(&self) {
        self.js.install();
    }

    fn finish(&self) {
        self.js.finish();
    }

    fn interactions(&self) -> u32 {
        match self.js.interactions().as_f64() {
            Some(n) if n.is_finite() && n >= 0.0 => n as u32,
            _ => 0,
        }
    }

    fn subscribe(&self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let closure = JsListener::new(move |first: JsValue, second: JsValue| {
            match SdkEvent::decode(kind, first.as_f64(), second.as_f64()) {
                Some(event) => handler(&event),
                None => log::warn!("Dropping malformed `{}` event", kind.as_str()),
            }
        });
        self.js.on(kind.as_str(), closure.as_ref().unchecked_ref());
        self.listeners.borrow_mut().insert(id, (kind, closure));

        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let removed = self.listeners.borrow_mut().remove(&id);
        match removed {
            Some((kind, closure)) => {
                self.js.off(kind.as_str(), closure.as_ref().unchecked_ref());
                true
            }
            None => false,
        }
    }
}
