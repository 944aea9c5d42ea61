//! Database models backing the company and employee repositories.

pub mod company;
#[cfg(feature = "server")]
pub mod config;
pub mod employee;
