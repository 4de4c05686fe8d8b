pub mod auth;
pub mod dataset;
pub mod datasource;
pub mod destination;
pub mod detail;
pub mod expectation;
pub mod schedule;
pub mod schema;
pub mod user;
