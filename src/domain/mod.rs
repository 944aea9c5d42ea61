//! Domain aggregates exposed by the service layer.

pub mod company;
pub mod employee;
pub mod types;
