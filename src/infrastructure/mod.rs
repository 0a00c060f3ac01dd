pub mod config;
pub mod http;
pub mod storage;
pub mod token_store;
