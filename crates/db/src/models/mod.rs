//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The input DTOs the repositories accept for writes

pub mod drug;
pub mod favorite;
pub mod user;
pub mod user_setting;
