pub mod auth;
pub mod extract;
pub mod response;

pub use auth::{authenticate, require_admin, require_logged_in, require_self_or_admin};
pub use extract::{ApiJson, ApiQuery};
pub use response::{ApiResponse, ApiResult, IntoApiResponse};
