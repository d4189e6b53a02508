// handlers/mod.rs - Handlers grouped by the guard their routes sit behind
//
// Public (no guard) → Protected (logged in, self-or-admin) → Elevated (admin only)
//
// Every route runs behind the router-wide `authenticate` layer; the tier only
// says which `require_*` guard is layered onto the handler in `app::router`.
pub mod elevated;
pub mod protected;
pub mod public;
