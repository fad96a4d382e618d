pub mod catalog;
pub mod engagement;
pub mod event;
pub mod organizer;
pub mod role;
pub mod session;
pub mod user;

pub use catalog::{Category, City};
pub use engagement::{ContactMessage, Favorite, FavoriteRow, NewsletterSubscription};
pub use event::{Event, EventStatus, EventSummary, OrganizerEventCount, PriceType};
pub use organizer::{
    OrganizerListing, OrganizerProfile, OrganizerRequest, OrganizerStatus, PendingRequestRow,
    RequestHistoryRow,
};
pub use role::Role;
pub use session::Session;
pub use user::{AccountStatus, User};
