//! Authentication primitives.
//!
//! Only password hashing lives here; there is no session or token
//! machinery in this system.

pub mod password;

pub use password::{PasswordError, hash_password, verify_password};
