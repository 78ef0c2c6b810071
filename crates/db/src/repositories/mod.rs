//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod drug_repo;
pub mod favorite_repo;
pub mod user_repo;
pub mod user_setting_repo;

pub use drug_repo::DrugRepo;
pub use favorite_repo::FavoriteRepo;
pub use user_repo::UserRepo;
pub use user_setting_repo::UserSettingRepo;
