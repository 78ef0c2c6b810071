//! Domain primitives shared by the Yakbot API server and the feed ingestor.
//!
//! Nothing in this crate performs I/O: it holds the error taxonomy, id and
//! timestamp aliases, and the input rules both binaries agree on.

pub mod drugs;
pub mod error;
pub mod types;
pub mod users;
