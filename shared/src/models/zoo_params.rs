//! Zoo Parameters Model
//!
//! Site-wide configuration record (contact details, currency, locale).

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{validate_currency, validate_not_blank, validate_phone};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ZooParams {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub currency: String,
    pub address: Option<String>,
    pub language: String,
    /// Display pattern for dates, e.g. "DD/MM/YYYY"
    pub format_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ZooParamsCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub format_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ZooParamsUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_currency"))]
    pub currency: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub format_date: Option<String>,
}

impl ZooParamsUpdate {
    pub fn apply(self, params: &mut ZooParams) {
        if let Some(name) = self.name {
            params.name = name;
        }
        if let Some(email) = self.email {
            params.email = crate::util::normalize_email(&email);
        }
        if let Some(phone) = self.phone {
            params.phone = phone;
        }
        if let Some(currency) = self.currency {
            params.currency = currency.to_ascii_uppercase();
        }
        if let Some(address) = self.address {
            params.address = Some(address);
        }
        if let Some(language) = self.language {
            params.language = language;
        }
        if let Some(format_date) = self.format_date {
            params.format_date = format_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_contact_fields() {
        let create = ZooParamsCreate {
            name: "Zoo de Kinshasa".into(),
            email: "contact".into(),
            phone: "abc".into(),
            currency: "FRANC".into(),
            address: None,
            language: None,
            format_date: None,
        };
        let errors = create.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("currency"));
    }
}
