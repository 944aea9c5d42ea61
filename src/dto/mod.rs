//! Response bodies returned by the services.

use serde::Serialize;

pub mod company;
pub mod employee;
pub mod projection;

/// `{"message": "..."}` body used for bulk outcomes.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
