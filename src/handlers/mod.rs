// Three handler tiers, matching the guard each route runs behind:
// public (no identity required) -> protected (require_auth and friends)
// -> admin (require_admin / require_moderator).
pub mod admin;
pub mod protected;
pub mod public;
