// handlers/elevated/mod.rs - Elevated handlers (admin only)
pub mod jobs;
pub mod users;
