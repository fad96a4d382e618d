pub mod catalog;
pub mod events;
pub mod newsletter;
pub mod organizer;
pub mod users;

pub use catalog::{category_delete, category_patch, category_post, city_post};
pub use events::feature_patch;
pub use newsletter::subscribers_get;
pub use organizer::{all_requests_get, organizers_get, requests_get, revoke_delete, validate_post};
pub use users::{role_patch, status_patch};
