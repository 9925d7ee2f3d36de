pub mod handlers;
pub mod ratings;
