pub mod catalog;
pub mod events;
pub mod outreach;
pub mod turnstile;

pub use catalog::{categories_get, category_get, cities_get};
pub use events::{counts_get, event_get, events_get, organizer_count_get, view_post};
pub use outreach::{contact_post, newsletter_post};
pub use turnstile::verify_post;
