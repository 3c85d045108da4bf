pub mod registrant;

pub use registrant::{RegisteredEvent, Registrant};
