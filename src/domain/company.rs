use serde::Serialize;

use crate::domain::types::{
    CompanyAddress, CompanyDescription, CompanyId, CompanyName, PhoneNumber,
};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub name: CompanyName,
    pub address: CompanyAddress,
    pub phone: PhoneNumber,
    pub description: Option<CompanyDescription>,
}

/// A company together with the number of employees it currently owns.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompanyOverview {
    pub company: Company,
    pub employee_count: usize,
}

/// Minimal company reference embedded in employee payloads.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompanyRef {
    pub id: CompanyId,
    pub name: CompanyName,
}

#[derive(Clone, Debug)]
pub struct NewCompany {
    pub id: CompanyId,
    pub name: CompanyName,
    pub address: CompanyAddress,
    pub phone: PhoneNumber,
    pub description: Option<CompanyDescription>,
}

impl NewCompany {
    /// Builds a new company with a freshly generated identifier.
    #[must_use]
    pub fn new(
        name: CompanyName,
        address: CompanyAddress,
        phone: PhoneNumber,
        description: Option<CompanyDescription>,
    ) -> Self {
        Self {
            id: CompanyId::generate(),
            name,
            address,
            phone,
            description,
        }
    }
}

/// Partial set of changes for a company. `None` leaves the column untouched;
/// `description: Some(None)` clears the description.
#[derive(Clone, Debug, Default)]
pub struct UpdateCompany {
    pub name: Option<CompanyName>,
    pub address: Option<CompanyAddress>,
    pub phone: Option<PhoneNumber>,
    pub description: Option<Option<CompanyDescription>>,
}

impl UpdateCompany {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.description.is_none()
    }
}
