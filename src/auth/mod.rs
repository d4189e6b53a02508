pub mod guard;
pub mod password;
pub mod token;

pub use guard::{authenticate, check_all, AuthError, Guard, Identity};
pub use token::{Claims, TokenCodec, TokenError};
