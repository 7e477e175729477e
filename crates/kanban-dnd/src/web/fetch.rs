use std::rc::Rc;

use async_trait::async_trait;
use kanban_domain::{MoveAck, MoveCardRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response, Window};

use crate::sync::{reconcile_move, MoveClient, MoveDispatcher, Reloader, TransportError};

pub const MOVE_ENDPOINT: &str = "/mover-tarjeta";

fn request_error(err: JsValue) -> TransportError {
    TransportError::Request(format!("{:?}", err))
}

/// Posts moves to the server with `window.fetch`.
#[derive(Clone)]
pub struct FetchClient {
    window: Window,
    endpoint: String,
}

impl FetchClient {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            endpoint: MOVE_ENDPOINT.to_string(),
        }
    }

    async fn send(&self, body: &str) -> Result<Response, TransportError> {
        let headers = Headers::new().map_err(request_error)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(request_error)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));

        let request =
            Request::new_with_str_and_init(&self.endpoint, &init).map_err(request_error)?;
        let response = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(request_error)?;
        response.dyn_into::<Response>().map_err(request_error)
    }
}

#[async_trait(?Send)]
impl MoveClient for FetchClient {
    async fn post_move(&self, request: &MoveCardRequest) -> Result<MoveAck, TransportError> {
        let body =
            serde_json::to_string(request).map_err(|e| TransportError::Request(e.to_string()))?;
        let response = self.send(&body).await?;

        let text = JsFuture::from(response.text().map_err(request_error)?)
            .await
            .map_err(request_error)?
            .as_string()
            .unwrap_or_default();

        // A 400 still carries a readable `{ok:false,error}` body.
        serde_json::from_str(&text).map_err(|e| {
            TransportError::Decode(format!("status {}: {}", response.status(), e))
        })
    }
}

/// Reloads the page from the server.
#[derive(Clone)]
pub struct LocationReloader {
    window: Window,
}

impl LocationReloader {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Reloader for LocationReloader {
    fn reload(&self) {
        if let Err(err) = self.window.location().reload() {
            tracing::error!("Reload failed: {:?}", err);
        }
    }
}

/// Runs each move's reconciliation on the browser event loop without
/// awaiting it.
pub struct SpawnDispatcher<C, R> {
    client: Rc<C>,
    reloader: Rc<R>,
}

impl<C, R> SpawnDispatcher<C, R> {
    pub fn new(client: C, reloader: R) -> Self {
        Self {
            client: Rc::new(client),
            reloader: Rc::new(reloader),
        }
    }
}

impl<C, R> MoveDispatcher for SpawnDispatcher<C, R>
where
    C: MoveClient + 'static,
    R: Reloader + 'static,
{
    fn dispatch(&mut self, request: MoveCardRequest) {
        let client = Rc::clone(&self.client);
        let reloader = Rc::clone(&self.reloader);
        wasm_bindgen_futures::spawn_local(async move {
            reconcile_move(client.as_ref(), reloader.as_ref(), &request).await;
        });
    }
}
