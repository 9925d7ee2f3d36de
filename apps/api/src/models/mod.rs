pub mod location;
pub mod quote;
pub mod request;
pub mod review;
pub mod user;
