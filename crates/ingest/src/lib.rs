//! Drug-registry feed ingestor.
//!
//! Pages through the MFDS easy-drug-info list and upserts every item into
//! the local `drugs` cache, either once or on a fixed interval.

pub mod config;
pub mod feed;
pub mod schedule;
pub mod sync;
