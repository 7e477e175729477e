//! Server-rendered HTML views.

pub mod dashboard;
pub mod layout;
pub mod pages;
