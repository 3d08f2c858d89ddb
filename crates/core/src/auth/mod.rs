//! Auth surface - the identity types this crate consumes and the
//! user-facing messages for known provider error codes. Sign-in flows and
//! token handling belong to the external identity provider.

mod auth_model;

pub use auth_model::{register_error_message, sign_in_error_message, AuthUser};
