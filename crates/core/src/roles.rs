//! Well-known role name constants.
//!
//! `user` and `viewer` are granted implicitly to every authenticated
//! viewer; widget definitions requiring only these are visible to anyone
//! logged in.

pub const ROLE_USER: &str = "user";
pub const ROLE_VIEWER: &str = "viewer";
pub const ROLE_ADMIN: &str = "admin";
