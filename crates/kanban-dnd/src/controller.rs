use kanban_domain::{CardId, CardMove, ListRef, MoveCardRequest};

use crate::surface::{BoardSurface, Point, Relocation};
use crate::sync::MoveDispatcher;

/// Where an in-flight drag started.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOrigin<C> {
    pub card: C,
    pub card_id: CardId,
    pub from: ListRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag in flight, or the drop landed outside any column.
    Ignored,
    /// Dropped back onto the list it came from; nothing changes.
    SameList,
    /// Relocated on the page and dispatched to the server.
    Moved(CardMove),
}

/// Drag state for one board surface.
///
/// Pointer drags follow `idle → dragging → (dropped | cancelled) → idle`;
/// touch drags emulate the same move with a floating ghost and hit-testing.
/// Both end in the same commit: relocate on the page, then dispatch.
pub struct DragController<S: BoardSurface, D: MoveDispatcher> {
    surface: S,
    dispatcher: D,
    pointer: Option<DragOrigin<S::Card>>,
    touch: Option<DragOrigin<S::Card>>,
}

impl<S: BoardSurface, D: MoveDispatcher> DragController<S, D> {
    pub fn new(surface: S, dispatcher: D) -> Self {
        Self {
            surface,
            dispatcher,
            pointer: None,
            touch: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn pointer_origin(&self) -> Option<&DragOrigin<S::Card>> {
        self.pointer.as_ref()
    }

    pub fn touch_origin(&self) -> Option<&DragOrigin<S::Card>> {
        self.touch.as_ref()
    }

    fn origin_of(&self, card: &S::Card) -> Option<DragOrigin<S::Card>> {
        Some(DragOrigin {
            card: card.clone(),
            card_id: self.surface.card_id(card)?,
            from: self.surface.card_location(card)?,
        })
    }

    // Pointer ---------------------------------------------------------------

    /// Returns false when the card carries no readable id or list.
    pub fn drag_start(&mut self, card: &S::Card) -> bool {
        let Some(origin) = self.origin_of(card) else {
            tracing::debug!("Ignoring drag of a card without id or list");
            return false;
        };
        self.surface.set_dragging(card, true);
        self.pointer = Some(origin);
        true
    }

    pub fn drag_over(&mut self, column: &S::Column) {
        if self.pointer.is_some() {
            self.surface.set_drop_candidate(column, true);
        }
    }

    /// `still_inside` is true when the pointer only moved onto a child of
    /// the column.
    pub fn drag_leave(&mut self, column: &S::Column, still_inside: bool) {
        if !still_inside {
            self.surface.set_drop_candidate(column, false);
        }
    }

    pub fn drop_on(&mut self, column: &S::Column) -> DropOutcome {
        self.surface.set_drop_candidate(column, false);

        let Some(origin) = self.pointer.take() else {
            return DropOutcome::Ignored;
        };
        let Some(to) = self.surface.column_location(column) else {
            self.pointer = Some(origin);
            return DropOutcome::Ignored;
        };
        if to == origin.from {
            // Left in place for drag_end to clean up.
            self.pointer = Some(origin);
            return DropOutcome::SameList;
        }

        DropOutcome::Moved(self.commit(origin, column, to))
    }

    /// Runs after every pointer drag, dropped or cancelled.
    pub fn drag_end(&mut self) {
        if let Some(origin) = self.pointer.take() {
            self.surface.set_dragging(&origin.card, false);
        }
        self.surface.clear_drop_candidates();
    }

    // Touch -----------------------------------------------------------------

    /// Touches that begin on a card's action control (its edit button) are
    /// left to that control. Returns whether a touch drag started.
    pub fn touch_start(&mut self, card: &S::Card, on_action_control: bool) -> bool {
        if on_action_control {
            return false;
        }
        let Some(origin) = self.origin_of(card) else {
            return false;
        };
        if let Some(stale) = self.touch.take() {
            self.surface.set_dragging(&stale.card, false);
            self.surface.remove_ghost();
        }

        self.surface.spawn_ghost(card);
        self.surface.set_dragging(card, true);
        self.touch = Some(origin);
        true
    }

    /// Returns true while a touch drag is in flight, meaning the caller
    /// should suppress the default scroll.
    pub fn touch_move(&mut self, point: Point) -> bool {
        if self.touch.is_none() {
            return false;
        }
        self.surface.move_ghost(point);
        let column = self.surface.column_at(point);
        self.surface.clear_drop_candidates();
        if let Some(column) = column {
            self.surface.set_drop_candidate(&column, true);
        }
        true
    }

    pub fn touch_end(&mut self, point: Point) -> DropOutcome {
        let Some(origin) = self.touch.take() else {
            return DropOutcome::Ignored;
        };
        let card = origin.card.clone();

        let target = self
            .surface
            .column_at(point)
            .and_then(|column| Some((self.surface.column_location(&column)?, column)));

        let outcome = match target {
            Some((to, _)) if to == origin.from => DropOutcome::SameList,
            Some((to, column)) => DropOutcome::Moved(self.commit(origin, &column, to)),
            None => DropOutcome::Ignored,
        };

        self.surface.clear_drop_candidates();
        self.surface.set_dragging(&card, false);
        self.surface.remove_ghost();
        outcome
    }

    // Commit ----------------------------------------------------------------

    fn commit(&mut self, origin: DragOrigin<S::Card>, column: &S::Column, to: ListRef) -> CardMove {
        let mv = CardMove::new(origin.card_id, origin.from, to);
        tracing::debug!(
            "Moving card {} from list {} to list {}",
            mv.card_id,
            mv.from.list_id,
            mv.to.list_id
        );

        self.surface.relocate(Relocation {
            card: origin.card,
            target: column.clone(),
            from: origin.from,
            to,
        });
        self.dispatcher.dispatch(MoveCardRequest::from(mv));
        mv
    }
}
