pub mod card;
pub mod pages;
