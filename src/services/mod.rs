pub mod catalog_service;
pub mod engagement_service;
pub mod event_service;
pub mod organizer_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use engagement_service::{EngagementService, ToggleOutcome};
pub use event_service::{CreateEventInput, EventService, UpdateEventInput};
pub use organizer_service::{Decision, OrganizerProfileInput, OrganizerService, WorkflowError};
pub use user_service::{UserAdminError, UserService};
