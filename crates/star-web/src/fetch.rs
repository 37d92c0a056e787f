//! Single-shot catalog fetches that can be cancelled.
//!
//! All requests of one batch share an `AbortController`. Aborting (or
//! dropping the fetcher) cancels them, and a generation counter drops any
//! response that still resolves afterwards. Responses land in a
//! [`CatalogInbox`] that the frame loop drains.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_net::http::Request;
use star_engine::{CatalogDocument, CatalogError, SkyRenderer};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AbortController, AbortSignal};

type Delivery = (CatalogDocument, Result<String, CatalogError>);

/// Fetched documents waiting for the next frame.
#[derive(Clone, Default)]
pub struct CatalogInbox {
    pending: Rc<RefCell<Vec<Delivery>>>,
}

impl CatalogInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, doc: CatalogDocument, body: Result<String, CatalogError>) {
        self.pending.borrow_mut().push((doc, body));
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Hand every waiting document to the sky, oldest first.
    pub fn drain_into(&self, sky: &mut SkyRenderer) -> usize {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        let count = pending.len();
        for (doc, body) in pending {
            sky.deliver(doc, body);
        }
        count
    }
}

pub struct CatalogFetcher {
    controller: Option<AbortController>,
    generation: Rc<Cell<u32>>,
}

impl CatalogFetcher {
    pub fn new() -> Self {
        Self {
            controller: None,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Start one request per document. Earlier requests are cancelled first.
    pub fn start(&mut self, requests: Vec<(CatalogDocument, String)>, inbox: &CatalogInbox) -> Result<(), JsValue> {
        self.abort();
        let controller = AbortController::new()?;
        let generation = self.generation.get();

        for (doc, url) in requests {
            let signal = controller.signal();
            let current = Rc::clone(&self.generation);
            let inbox = inbox.clone();
            spawn_local(async move {
                log::debug!("{}: fetching {}", doc, url);
                let body = fetch_text(&url, &signal).await;
                if current.get() != generation {
                    log::debug!("{}: dropping stale response", doc);
                    return;
                }
                inbox.push(doc, body);
            });
        }
        self.controller = Some(controller);
        Ok(())
    }

    /// Cancel every in-flight request.
    pub fn abort(&mut self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some(controller) = self.controller.take() {
            controller.abort();
        }
    }
}

impl Default for CatalogFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CatalogFetcher {
    fn drop(&mut self) {
        self.abort();
    }
}

async fn fetch_text(url: &str, signal: &AbortSignal) -> Result<String, CatalogError> {
    let network = |err: gloo_net::Error| {
        if signal.aborted() {
            CatalogError::Aborted
        } else {
            CatalogError::Network(err.to_string())
        }
    };
    let resp = Request::get(url)
        .abort_signal(Some(signal))
        .send()
        .await
        .map_err(network)?;
    if !resp.ok() {
        return Err(CatalogError::Status(resp.status()));
    }
    resp.text().await.map_err(network)
}
