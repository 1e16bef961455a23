//! Reservation Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Reservation category code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ReservationType {
    Adulte,
    Enfant,
    Groupe,
    Vip,
    Etudiant,
    Couple,
}

impl ReservationType {
    pub const ALL: [ReservationType; 6] = [
        ReservationType::Adulte,
        ReservationType::Enfant,
        ReservationType::Groupe,
        ReservationType::Vip,
        ReservationType::Etudiant,
        ReservationType::Couple,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ReservationType::Adulte => "adulte",
            ReservationType::Enfant => "enfant",
            ReservationType::Groupe => "groupe",
            ReservationType::Vip => "vip",
            ReservationType::Etudiant => "etudiant",
            ReservationType::Couple => "couple",
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    /// Booking visitor account
    pub visitors: Option<i64>,
    /// Linked ticket
    pub tickets: Option<i64>,
    /// Linked event
    pub event: Option<i64>,
    pub type_of_reservation: ReservationType,
    pub total_price: i64,
    pub arrival_time: Option<NaiveDateTime>,
    pub has_booked: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    pub visitors: Option<i64>,
    pub tickets: Option<i64>,
    pub event: Option<i64>,
    pub type_of_reservation: ReservationType,
    /// Absent or zero means "use the rate table"
    #[validate(range(min = 0))]
    pub total_price: Option<i64>,
    pub arrival_time: Option<NaiveDateTime>,
    pub has_booked: Option<bool>,
}

/// Update reservation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReservationUpdate {
    pub visitors: Option<i64>,
    pub tickets: Option<i64>,
    pub event: Option<i64>,
    pub type_of_reservation: Option<ReservationType>,
    #[validate(range(min = 0))]
    pub total_price: Option<i64>,
    pub arrival_time: Option<NaiveDateTime>,
    pub has_booked: Option<bool>,
}

impl ReservationUpdate {
    pub fn apply(self, reservation: &mut Reservation) {
        if let Some(visitors) = self.visitors {
            reservation.visitors = Some(visitors);
        }
        if let Some(tickets) = self.tickets {
            reservation.tickets = Some(tickets);
        }
        if let Some(event) = self.event {
            reservation.event = Some(event);
        }
        if let Some(kind) = self.type_of_reservation {
            reservation.type_of_reservation = kind;
        }
        if let Some(total_price) = self.total_price {
            reservation.total_price = total_price;
        }
        if let Some(arrival_time) = self.arrival_time {
            reservation.arrival_time = Some(arrival_time);
        }
        if let Some(has_booked) = self.has_booked {
            reservation.has_booked = has_booked;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_match_wire_format() {
        for t in ReservationType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.code()));
        }
    }

    #[test]
    fn test_apply_keeps_untouched_price() {
        let mut r = Reservation {
            id: 1,
            visitors: None,
            tickets: None,
            event: None,
            type_of_reservation: ReservationType::Enfant,
            total_price: 1000,
            arrival_time: None,
            has_booked: false,
            created_at: 0,
            updated_at: 0,
        };
        ReservationUpdate {
            has_booked: Some(true),
            type_of_reservation: Some(ReservationType::Couple),
            ..Default::default()
        }
        .apply(&mut r);
        assert!(r.has_booked);
        assert_eq!(r.type_of_reservation, ReservationType::Couple);
        assert_eq!(r.total_price, 1000);
    }
}
