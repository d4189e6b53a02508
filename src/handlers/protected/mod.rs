// handlers/protected/mod.rs - Protected handlers (logged in / self-or-admin)
//
// `whoami` only needs an identity. Routes keyed by `:username` need the caller
// to be that user or an admin; ownership comes from the path, never the body.
pub mod auth;
pub mod users;
