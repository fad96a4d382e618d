use crate::database::models::{Session, User};

/// Request-scoped identity resolved once per request by the session
/// middleware and passed explicitly to guards and handlers.
///
/// Consumers match exhaustively; there is no optional-field probing and no
/// ambient mutable session state.
#[derive(Debug, Clone)]
pub enum Identity {
    Authenticated { user: User, session: Session },
    Anonymous,
}
