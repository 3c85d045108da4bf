pub mod catalog;
pub mod collate;
pub mod model;

pub use catalog::{normalize_event_name, EVENT_CATALOG};
pub use model::{derive_visible, SortField, ViewError, ViewModel, ViewState};
