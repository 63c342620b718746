//! Accounts: password hashing and registration rules.

mod account;
mod password;

pub use account::{
    MIN_PASSWORD_LEN, validate_email, validate_password, validate_phone, validate_username,
};
pub use password::{PasswordError, hash_password, verify_password};
