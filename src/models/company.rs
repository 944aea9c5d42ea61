//! Diesel models for the `companies` table.

use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany, UpdateCompany as DomainUpdateCompany,
};
use crate::domain::types::{
    CompanyAddress, CompanyDescription, CompanyName, PhoneNumber, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub description: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
/// Insertable form of [`Company`].
pub struct NewCompany<'a> {
    pub id: String,
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub description: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
/// Changeset for a partial company update; `None` columns are skipped.
pub struct UpdateCompany<'a> {
    pub name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: company.id.parse()?,
            name: CompanyName::new(company.name)?,
            address: CompanyAddress::new(company.address)?,
            phone: PhoneNumber::new(company.phone)?,
            description: match company.description {
                Some(text) => CompanyDescription::parse(text)?,
                None => None,
            },
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            id: company.id.to_string(),
            name: company.name.as_str(),
            address: company.address.as_str(),
            phone: company.phone.as_str(),
            description: company.description.as_ref().map(CompanyDescription::as_str),
        }
    }
}

impl<'a> From<&'a DomainUpdateCompany> for UpdateCompany<'a> {
    fn from(updates: &'a DomainUpdateCompany) -> Self {
        Self {
            name: updates.name.as_ref().map(CompanyName::as_str),
            address: updates.address.as_ref().map(CompanyAddress::as_str),
            phone: updates.phone.as_ref().map(PhoneNumber::as_str),
            description: updates
                .description
                .as_ref()
                .map(|d| d.as_ref().map(CompanyDescription::as_str)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Company {
        Company {
            id: "5f0c6b1e-8a4e-4c43-9d57-0d7b3b8f7a10".to_string(),
            name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            phone: "06301234567".to_string(),
            description: Some("".to_string()),
        }
    }

    #[test]
    fn row_into_domain() {
        let domain = DomainCompany::try_from(sample_row()).unwrap();
        assert_eq!(domain.name.as_str(), "Acme");
        assert_eq!(domain.phone.as_str(), "06301234567");
        assert_eq!(domain.description, None);
    }

    #[test]
    fn corrupt_row_is_rejected() {
        let mut row = sample_row();
        row.id = "not-a-uuid".to_string();
        assert_eq!(
            DomainCompany::try_from(row),
            Err(TypeConstraintError::InvalidUuid)
        );
    }

    #[test]
    fn update_changeset_clears_description() {
        let updates = DomainUpdateCompany {
            description: Some(None),
            ..DomainUpdateCompany::default()
        };
        let changeset = UpdateCompany::from(&updates);
        assert_eq!(changeset.description, Some(None));
        assert!(changeset.name.is_none());
    }
}
