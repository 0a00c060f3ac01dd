pub mod auth;
pub mod conversation;
pub mod dish;
pub mod intake;
pub mod message;
pub mod profile;
pub mod shared;
pub mod user;
