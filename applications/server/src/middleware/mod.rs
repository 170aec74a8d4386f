/// Request middleware
pub mod auth;

pub use auth::{access_middleware, AccessControl, AccessPolicy, AccessRule, AuthenticatedUser, Requirement};
