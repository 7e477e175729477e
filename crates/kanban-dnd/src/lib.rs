//! Client-side card moves for the dashboard.
//!
//! A [`DragController`] owns the state of one drag surface: at most one
//! pointer drag and one touch drag in flight. Drops that change a card's
//! list are applied to the page first ([`BoardSurface::relocate`]) and then
//! handed to a [`MoveDispatcher`] as a fire-and-forget request. The
//! authoritative answer is reconciled by [`reconcile_move`]: anything but a
//! positive acknowledgement forces a full reload.

pub mod controller;
pub mod surface;
pub mod sync;
#[cfg(feature = "web")]
pub mod web;

pub use controller::{DragController, DragOrigin, DropOutcome};
pub use surface::{BoardSurface, Point, Relocation};
pub use sync::{
    reconcile_move, MoveClient, MoveDispatcher, ReloadReason, Reloader, SyncOutcome,
    TransportError,
};
