//! Sale Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{validate_currency, validate_not_blank};
use crate::util::round_money;

/// Sale entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub client_name: String,
    pub total_revenue: f64,
    pub total_paid: f64,
    pub primary_currency: String,
    pub date: NaiveDate,
}

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaleCreate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub client_name: String,
    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub total_revenue: f64,
    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub total_paid: f64,
    #[validate(custom(function = "validate_currency"))]
    pub primary_currency: String,
    pub date: NaiveDate,
}

impl SaleCreate {
    /// Round money fields and upper-case the currency before persisting
    pub fn normalized(mut self) -> Self {
        self.total_revenue = round_money(self.total_revenue);
        self.total_paid = round_money(self.total_paid);
        self.primary_currency = self.primary_currency.to_ascii_uppercase();
        self
    }
}

/// Update sale payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SaleUpdate {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub client_name: Option<String>,
    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub total_revenue: Option<f64>,
    #[validate(range(min = 0.0, max = 1_000_000_000.0))]
    pub total_paid: Option<f64>,
    #[validate(custom(function = "validate_currency"))]
    pub primary_currency: Option<String>,
    pub date: Option<NaiveDate>,
}

impl SaleUpdate {
    pub fn apply(self, sale: &mut Sale) {
        if let Some(client_name) = self.client_name {
            sale.client_name = client_name;
        }
        if let Some(total_revenue) = self.total_revenue {
            sale.total_revenue = round_money(total_revenue);
        }
        if let Some(total_paid) = self.total_paid {
            sale.total_paid = round_money(total_paid);
        }
        if let Some(currency) = self.primary_currency {
            sale.primary_currency = currency.to_ascii_uppercase();
        }
        if let Some(date) = self.date {
            sale.date = date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized() {
        let sale = SaleCreate {
            client_name: "School trip".into(),
            total_revenue: 150.126,
            total_paid: 99.994,
            primary_currency: "cdf".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        }
        .normalized();
        assert_eq!(sale.total_revenue, 150.13);
        assert_eq!(sale.total_paid, 99.99);
        assert_eq!(sale.primary_currency, "CDF");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let sale = SaleCreate {
            client_name: "Refund".into(),
            total_revenue: -1.0,
            total_paid: 0.0,
            primary_currency: "USD".into(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        };
        let errors = sale.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("total_revenue"));
    }
}
