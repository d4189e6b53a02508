// handlers/public/mod.rs - Public handlers (no guard)
//
// Token acquisition, job browsing and liveness. An identity may still be
// attached by `authenticate`, but nothing here depends on it.
pub mod auth;
pub mod jobs;
pub mod root;

pub use root::{health, root};
