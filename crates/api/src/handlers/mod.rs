pub mod drugs;
pub mod favorites;
pub mod recognize;
pub mod users;
