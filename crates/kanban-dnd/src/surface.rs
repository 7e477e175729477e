use kanban_domain::{CardId, ListRef};

/// Viewport coordinates of a touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One optimistic card relocation, applied to the page as a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct Relocation<C, K> {
    pub card: C,
    pub target: K,
    pub from: ListRef,
    pub to: ListRef,
}

impl<C, K> Relocation<C, K> {
    /// Append the card to the target column, record its new list on it,
    /// drop the dragging marker and recount both lists. The counts are taken
    /// after the append so they already reflect the move.
    pub fn apply<S>(self, surface: &mut S)
    where
        S: BoardSurface<Card = C, Column = K> + ?Sized,
    {
        surface.append_card(&self.card, &self.target);
        surface.stamp_location(&self.card, self.to);
        surface.set_dragging(&self.card, false);
        surface.refresh_count(self.from);
        surface.refresh_count(self.to);
    }
}

/// The rendered board as the drag controller sees it.
///
/// `Card` is a handle to a rendered card, `Column` a handle to a list's card
/// container. Implementations read ids from whatever the page carries
/// (data attributes in the browser) and perform the visual side effects.
pub trait BoardSurface {
    type Card: Clone;
    type Column: Clone;

    fn card_id(&self, card: &Self::Card) -> Option<CardId>;

    /// The list a card is currently rendered in.
    fn card_location(&self, card: &Self::Card) -> Option<ListRef>;

    /// The list a column renders.
    fn column_location(&self, column: &Self::Column) -> Option<ListRef>;

    fn set_dragging(&mut self, card: &Self::Card, dragging: bool);

    fn set_drop_candidate(&mut self, column: &Self::Column, candidate: bool);

    fn clear_drop_candidates(&mut self);

    fn append_card(&mut self, card: &Self::Card, column: &Self::Column);

    fn stamp_location(&mut self, card: &Self::Card, at: ListRef);

    /// Update the item-count indicator of a list from what is rendered.
    fn refresh_count(&mut self, list: ListRef);

    /// Apply a relocation. Surfaces that animate may defer the whole step,
    /// but must run it as a unit so the recount sees the moved card.
    fn relocate(&mut self, relocation: Relocation<Self::Card, Self::Column>) {
        relocation.apply(self);
    }

    /// Float a copy of the card over its current bounding box.
    fn spawn_ghost(&mut self, card: &Self::Card);

    /// Center the floating copy under a point.
    fn move_ghost(&mut self, point: Point);

    fn remove_ghost(&mut self);

    /// The column under a point, ignoring the floating copy.
    fn column_at(&mut self, point: Point) -> Option<Self::Column>;
}
