//! Translation of raw peripheral readings into menu events.

pub mod button;
pub mod snapshot;
pub mod store;

pub use store::{Events, Store};
