//! Browser binding: wires document-level listeners to one shared
//! [`DragController`] over the rendered dashboard.

mod dom;
mod fetch;

pub use dom::{DomSurface, ACTION_CONTROL_SELECTOR, CARD_SELECTOR, COLUMN_SELECTOR};
pub use fetch::{FetchClient, LocationReloader, SpawnDispatcher, MOVE_ENDPOINT};

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, DragEvent, Element, Event, HtmlElement, Node, TouchEvent};

use crate::controller::DragController;
use crate::surface::Point;

type BrowserController = DragController<DomSurface, SpawnDispatcher<FetchClient, LocationReloader>>;
type Shared = Rc<RefCell<BrowserController>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let dispatcher = SpawnDispatcher::new(
        FetchClient::new(window.clone()),
        LocationReloader::new(window),
    );
    let controller: Shared = Rc::new(RefCell::new(DragController::new(
        DomSurface::new(document.clone()),
        dispatcher,
    )));

    install_pointer_listeners(&document, &controller)?;
    install_touch_listeners(&document, &controller)?;
    Ok(())
}

fn closest(event: &Event, selector: &str) -> Option<HtmlElement> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn listen(
    target: &web_sys::Document,
    kind: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn install_pointer_listeners(document: &web_sys::Document, controller: &Shared) -> Result<(), JsValue> {
    let c = Rc::clone(controller);
    listen(document, "dragstart", true, move |event| {
        let Some(card) = closest(&event, CARD_SELECTOR) else {
            return;
        };
        if !c.borrow_mut().drag_start(&card) {
            return;
        }
        if let Some(transfer) = event.dyn_ref::<DragEvent>().and_then(|e| e.data_transfer()) {
            transfer.set_effect_allowed("move");
            let id = card.dataset().get("cardId").unwrap_or_default();
            let _ = transfer.set_data("text/plain", &id);
        }
    })?;

    let c = Rc::clone(controller);
    listen(document, "dragover", false, move |event| {
        if let Some(column) = closest(&event, COLUMN_SELECTOR) {
            event.prevent_default();
            c.borrow_mut().drag_over(&column);
        }
    })?;

    let c = Rc::clone(controller);
    listen(document, "dragleave", true, move |event| {
        let Some(column) = closest(&event, COLUMN_SELECTOR) else {
            return;
        };
        let still_inside = event
            .dyn_ref::<DragEvent>()
            .and_then(|e| e.related_target())
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|node| column.contains(Some(&node)));
        c.borrow_mut().drag_leave(&column, still_inside);
    })?;

    let c = Rc::clone(controller);
    listen(document, "drop", false, move |event| {
        if let Some(column) = closest(&event, COLUMN_SELECTOR) {
            event.prevent_default();
            c.borrow_mut().drop_on(&column);
        }
    })?;

    let c = Rc::clone(controller);
    listen(document, "dragend", true, move |_event| {
        c.borrow_mut().drag_end();
    })
}

fn touch_point(event: &Event, changed: bool) -> Option<Point> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touches = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    let touch = touches.get(0)?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

fn install_touch_listeners(document: &web_sys::Document, controller: &Shared) -> Result<(), JsValue> {
    let c = Rc::clone(controller);
    listen(document, "touchstart", true, move |event| {
        let Some(card) = closest(&event, CARD_SELECTOR) else {
            return;
        };
        let on_action_control = closest(&event, ACTION_CONTROL_SELECTOR).is_some();
        c.borrow_mut().touch_start(&card, on_action_control);
    })?;

    // Not passive: an active touch drag suppresses scrolling.
    let c = Rc::clone(controller);
    listen(document, "touchmove", false, move |event| {
        let Some(point) = touch_point(&event, false) else {
            return;
        };
        if c.borrow_mut().touch_move(point) {
            event.prevent_default();
        }
    })?;

    let c = Rc::clone(controller);
    listen(document, "touchend", true, move |event| {
        if let Some(point) = touch_point(&event, true) {
            c.borrow_mut().touch_end(point);
        }
    })
}
