pub mod jwt;
pub mod password;

pub use jwt::{create_token, signing_secret, validate_token};
pub use password::{hash_password, verify_password};
