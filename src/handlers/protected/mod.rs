pub mod events;
pub mod favorites;
pub mod me;
pub mod organizer;

pub use events::{event_delete, event_patch, events_post, manage_events_get};
pub use favorites::{favorite_delete, favorites_get, favorites_post};
pub use me::me_get;
pub use organizer::request_post;
