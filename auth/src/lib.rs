//! Password utilities library
//!
//! Provides the credential primitives the account service builds on:
//! - Password hashing and verification (Argon2id, configurable cost)
//! - Password policy checks for new passwords
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Password Policy
//! ```
//! use auth::PasswordPolicy;
//!
//! let policy = PasswordPolicy::default();
//! assert!(policy.check("secret1").is_ok());
//! assert!(policy.check("abc").is_err());
//! ```

pub mod password;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use password::PasswordPolicyError;
