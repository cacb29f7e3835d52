pub mod soccer;
pub mod user;
pub mod user_match;
