//! Ticket Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Ticket category code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TicketType {
    Standard,
    Vip,
    Etudiant,
    Famille,
    Groupe,
}

impl TicketType {
    pub const ALL: [TicketType; 5] = [
        TicketType::Standard,
        TicketType::Vip,
        TicketType::Etudiant,
        TicketType::Famille,
        TicketType::Groupe,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TicketType::Standard => "standard",
            TicketType::Vip => "vip",
            TicketType::Etudiant => "etudiant",
            TicketType::Famille => "famille",
            TicketType::Groupe => "groupe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Pending,
    Confirmed,
    Used,
    Cancelled,
}

/// Ticket entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ticket {
    pub id: i64,
    /// Unique human-facing reference
    pub reference: String,
    /// Owning visitor account
    pub visitor: i64,
    pub type_ticket: TicketType,
    pub category: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub quantity: i64,
    pub price: i64,
    pub status: TicketStatus,
    pub created_at: i64,
}

/// Create ticket payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketCreate {
    /// Generated when omitted
    #[validate(length(min = 1, max = 64))]
    pub reference: Option<String>,
    pub visitor: i64,
    pub type_ticket: TicketType,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub visit_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub quantity: Option<i64>,
    /// Absent or zero means "use the rate table"
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub status: Option<TicketStatus>,
}

/// Update ticket payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TicketUpdate {
    #[validate(length(min = 1, max = 64))]
    pub reference: Option<String>,
    pub visitor: Option<i64>,
    pub type_ticket: Option<TicketType>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    pub visit_date: Option<NaiveDate>,
    #[validate(range(min = 1))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub status: Option<TicketStatus>,
}

impl TicketUpdate {
    pub fn apply(self, ticket: &mut Ticket) {
        if let Some(reference) = self.reference {
            ticket.reference = reference;
        }
        if let Some(visitor) = self.visitor {
            ticket.visitor = visitor;
        }
        if let Some(type_ticket) = self.type_ticket {
            ticket.type_ticket = type_ticket;
        }
        if let Some(category) = self.category {
            ticket.category = Some(category);
        }
        if let Some(visit_date) = self.visit_date {
            ticket.visit_date = Some(visit_date);
        }
        if let Some(quantity) = self.quantity {
            ticket.quantity = quantity;
        }
        if let Some(price) = self.price {
            ticket.price = price;
        }
        if let Some(status) = self.status {
            ticket.status = status;
        }
    }
}
