use kanban_domain::{parse_id, CardId, ListRef};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::surface::{BoardSurface, Point, Relocation};

pub const CARD_SELECTOR: &str = ".kanban-card";
pub const COLUMN_SELECTOR: &str = ".kanban-cards";
pub const ACTION_CONTROL_SELECTOR: &str = "[data-edit-btn]";

const DRAGGING_CLASS: &str = "dragging";
const DROP_CANDIDATE_CLASS: &str = "drag-over";
const GHOST_CLASS: &str = "touch-clone";

/// The rendered dashboard. Cards and columns are the `.kanban-card` and
/// `.kanban-cards` elements; ids come from their `data-*` attributes.
#[derive(Clone)]
pub struct DomSurface {
    document: Document,
    ghost: Option<HtmlElement>,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ghost: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn location_of(element: &HtmlElement) -> Option<ListRef> {
        let dataset = element.dataset();
        let board_id = parse_id(&dataset.get("boardId")?)?;
        let list_id = parse_id(&dataset.get("listId")?)?;
        Some(ListRef::new(board_id, list_id))
    }

    fn for_each(&self, selector: &str, mut f: impl FnMut(HtmlElement)) {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                f(element);
            }
        }
    }

    fn column_for(&self, list: ListRef) -> Option<Element> {
        let selector = format!(
            "{}[data-board-id=\"{}\"][data-list-id=\"{}\"]",
            COLUMN_SELECTOR, list.board_id, list.list_id
        );
        self.document.query_selector(&selector).ok().flatten()
    }

    /// `document.startViewTransition`, when the browser has it.
    fn view_transition(&self) -> Option<js_sys::Function> {
        js_sys::Reflect::get(&self.document, &JsValue::from_str("startViewTransition"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }
}

impl BoardSurface for DomSurface {
    type Card = HtmlElement;
    type Column = HtmlElement;

    fn card_id(&self, card: &HtmlElement) -> Option<CardId> {
        parse_id(&card.dataset().get("cardId")?)
    }

    fn card_location(&self, card: &HtmlElement) -> Option<ListRef> {
        Self::location_of(card)
    }

    fn column_location(&self, column: &HtmlElement) -> Option<ListRef> {
        Self::location_of(column)
    }

    fn set_dragging(&mut self, card: &HtmlElement, dragging: bool) {
        let _ = card
            .class_list()
            .toggle_with_force(DRAGGING_CLASS, dragging);
    }

    fn set_drop_candidate(&mut self, column: &HtmlElement, candidate: bool) {
        let _ = column
            .class_list()
            .toggle_with_force(DROP_CANDIDATE_CLASS, candidate);
    }

    fn clear_drop_candidates(&mut self) {
        self.for_each(COLUMN_SELECTOR, |column| {
            let _ = column.class_list().remove_1(DROP_CANDIDATE_CLASS);
        });
    }

    fn append_card(&mut self, card: &HtmlElement, column: &HtmlElement) {
        if let Err(err) = column.append_child(card) {
            tracing::warn!("Could not append card: {:?}", err);
        }
    }

    fn stamp_location(&mut self, card: &HtmlElement, at: ListRef) {
        let dataset = card.dataset();
        let _ = dataset.set("listId", &at.list_id.to_string());
        let _ = dataset.set("boardId", &at.board_id.to_string());
    }

    fn refresh_count(&mut self, list: ListRef) {
        let count = self
            .column_for(list)
            .and_then(|column| column.query_selector_all(CARD_SELECTOR).ok())
            .map(|cards| cards.length())
            .unwrap_or(0);

        let selector = format!(
            ".kanban-list[data-board-id=\"{}\"][data-list-id=\"{}\"] .kanban-list-count",
            list.board_id, list.list_id
        );
        if let Ok(Some(badge)) = self.document.query_selector(&selector) {
            badge.set_text_content(Some(&count.to_string()));
        }
    }

    fn relocate(&mut self, relocation: Relocation<HtmlElement, HtmlElement>) {
        let Some(transition) = self.view_transition() else {
            relocation.apply(self);
            return;
        };

        let mut deferred = self.clone();
        let update = Closure::once_into_js(move || relocation.apply(&mut deferred));
        if let Err(err) = transition.call1(&self.document, &update) {
            tracing::warn!("View transition failed: {:?}", err);
        }
    }

    fn spawn_ghost(&mut self, card: &HtmlElement) {
        self.remove_ghost();

        let Some(ghost) = card
            .clone_node_with_deep(true)
            .ok()
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let rect = card.get_bounding_client_rect();
        let _ = ghost.class_list().add_1(GHOST_CLASS);
        let style = ghost.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("pointer-events", "none");
        let _ = style.set_property("z-index", "1000");
        let _ = style.set_property("left", &format!("{}px", rect.left()));
        let _ = style.set_property("top", &format!("{}px", rect.top()));
        let _ = style.set_property("width", &format!("{}px", rect.width()));

        if let Some(body) = self.document.body() {
            if body.append_child(&ghost).is_ok() {
                self.ghost = Some(ghost);
            }
        }
    }

    fn move_ghost(&mut self, point: Point) {
        let Some(ghost) = &self.ghost else {
            return;
        };
        let rect = ghost.get_bounding_client_rect();
        let style = ghost.style();
        let _ = style.set_property("left", &format!("{}px", point.x - rect.width() / 2.0));
        let _ = style.set_property("top", &format!("{}px", point.y - rect.height() / 2.0));
    }

    fn remove_ghost(&mut self) {
        if let Some(ghost) = self.ghost.take() {
            ghost.remove();
        }
    }

    fn column_at(&mut self, point: Point) -> Option<HtmlElement> {
        // The ghost sits under the finger; hide it so the hit-test sees
        // through to the board.
        let ghost_style = self.ghost.as_ref().map(|ghost| ghost.style());
        if let Some(style) = &ghost_style {
            let _ = style.set_property("display", "none");
        }
        let hit = self
            .document
            .element_from_point(point.x as f32, point.y as f32);
        if let Some(style) = &ghost_style {
            let _ = style.remove_property("display");
        }

        hit?
            .closest(COLUMN_SELECTOR)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}
