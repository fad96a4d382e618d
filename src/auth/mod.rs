pub mod guard;
pub mod identity;
pub mod roles;
pub mod session;

pub use guard::{require_admin, require_auth, require_moderator, require_organizer};
pub use identity::Identity;
pub use roles::RoleRegistry;
pub use session::{extract_bearer_token, SessionStore};
