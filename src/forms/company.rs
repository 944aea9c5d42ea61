use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::company::{NewCompany, UpdateCompany};
use crate::domain::types::{
    CompanyAddress, CompanyDescription, CompanyName, PHONE_REGEX, PhoneNumber,
};
use crate::forms::errors::{ErrorKind, FieldErrors};
use crate::forms::{FieldKind, FieldwisePayload, deserialize_present, require, typed_field};

/// Body of `POST /company/` and `PATCH /company/{id}/`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompanyPayload {
    pub name: Option<String>,
    pub address: Option<String>,
    #[validate(regex(
        path = *PHONE_REGEX,
        code = "invalid_format",
        message = "The phone number must begin with the prefix '+36' or '06' and contain 9 digits."
    ))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    /// Employees created together with the company. Items are decoded
    /// one by one so each reports its own errors.
    #[serde(default)]
    pub employees: Option<Vec<Value>>,
    #[serde(skip)]
    type_errors: FieldErrors,
}

impl FieldwisePayload for CompanyPayload {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("name", FieldKind::Text),
        ("address", FieldKind::Text),
        ("phone", FieldKind::Text),
        ("description", FieldKind::Text),
        ("employees", FieldKind::List),
    ];

    fn set_type_errors(&mut self, errors: FieldErrors) {
        self.type_errors = errors;
    }
}

impl CompanyPayload {
    fn field_errors(&self) -> FieldErrors {
        let mut errors = self.type_errors.clone();
        if let Err(invalid) = self.validate() {
            errors.merge(invalid.into());
        }
        errors
    }

    fn description(&self, errors: &mut FieldErrors) -> Option<Option<CompanyDescription>> {
        match &self.description {
            None => None,
            Some(None) => Some(None),
            Some(Some(text)) => match CompanyDescription::parse(text.as_str()) {
                Ok(description) => Some(description),
                Err(err) => {
                    errors.push("description", err.into());
                    None
                }
            },
        }
    }

    /// Checks the company fields of a create request. Nested employees are
    /// validated separately because they need the store.
    pub fn to_new_company(&self) -> Result<NewCompany, FieldErrors> {
        let mut errors = self.field_errors();

        let name = typed_field(&mut errors, "name", self.name.as_deref(), |v| {
            CompanyName::new(v)
        });
        let address = typed_field(&mut errors, "address", self.address.as_deref(), |v| {
            CompanyAddress::new(v)
        });
        let phone = typed_field(&mut errors, "phone", self.phone.as_deref(), |v| {
            PhoneNumber::new(v)
        });
        let description = self.description(&mut errors);

        let name = require(&mut errors, "name", name);
        let address = require(&mut errors, "address", address);
        let phone = require(&mut errors, "phone", phone);

        match (name, address, phone) {
            (Some(name), Some(address), Some(phone)) if errors.is_empty() => Ok(NewCompany::new(
                name,
                address,
                phone,
                description.flatten(),
            )),
            _ => Err(errors),
        }
    }

    /// Checks a partial update. Only the fields present are validated.
    pub fn to_update_company(&self) -> Result<UpdateCompany, FieldErrors> {
        let mut errors = self.field_errors();

        let updates = UpdateCompany {
            name: typed_field(&mut errors, "name", self.name.as_deref(), |v| {
                CompanyName::new(v)
            }),
            address: typed_field(&mut errors, "address", self.address.as_deref(), |v| {
                CompanyAddress::new(v)
            }),
            phone: typed_field(&mut errors, "phone", self.phone.as_deref(), |v| {
                PhoneNumber::new(v)
            }),
            description: self.description(&mut errors),
        };

        if self.employees.is_some() {
            errors.add(
                "employees",
                ErrorKind::InvalidFormat,
                "Employees cannot be changed through a company update.",
            );
        }

        errors.into_result().map(|()| updates)
    }
}
