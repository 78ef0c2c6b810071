//! Identity-token verification and local identity resolution.
//!
//! - [`token`] -- the [`token::TokenVerifier`] seam plus the Firebase (RS256/JWKS)
//!   and shared-secret (HS256) implementations.
//! - [`identity`] -- bearer extraction and the token → local user chain.

pub mod identity;
pub mod token;
