//! Monthly report engine: date-range resolution, category attribution and
//! aggregation over a [`store::TransactionStore`].

pub mod attribution;
pub mod handlers;
pub mod models;
pub mod range;
pub mod service;
pub mod store;

pub use handlers::month_report;
