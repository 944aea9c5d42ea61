//! Business workflows sitting between the HTTP layer and the repository.
//!
//! Every function is synchronous and generic over the repository traits so
//! it can run inside `web::block` in production and against mocks in tests.

pub mod bulk;
pub mod company;
pub mod employee;
pub mod errors;
pub mod query;
pub mod validation;

pub use errors::{ServiceError, ServiceResult};
