pub mod auth;
pub mod category;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod openapi;
pub mod report;
pub mod transaction;
