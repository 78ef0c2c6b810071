//! Authentication extractors.
//!
//! - [`auth::VerifiedIdentity`] -- a verified identity token, registered or not.
//! - [`auth::CurrentUser`] -- the registered local user behind the token.

pub mod auth;
