pub mod job;
pub mod user;

pub use job::{Job, JobQuery, NewJob, JOB_FILTER_COLUMNS, JOB_UPDATE_FIELDS};
pub use user::{LoginRequest, NewUser, User, USER_UPDATE_FIELDS};
