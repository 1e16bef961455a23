//! Rate tables
//!
//! Immutable category → amount mappings, built once at start-up and shared
//! through [`ServerState`](crate::core::ServerState).

use std::collections::HashMap;
use std::hash::Hash;

use shared::models::{ReservationType, TicketType};

/// Category code → fixed amount
#[derive(Debug, Clone)]
pub struct RateTable<C> {
    rates: HashMap<C, i64>,
}

impl<C: Copy + Eq + Hash> RateTable<C> {
    pub fn new(pairs: impl IntoIterator<Item = (C, i64)>) -> Self {
        Self {
            rates: pairs.into_iter().collect(),
        }
    }

    /// Exact-match lookup
    pub fn get(&self, code: C) -> Option<i64> {
        self.rates.get(&code).copied()
    }

    pub fn contains(&self, code: C) -> bool {
        self.rates.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Both rate tables, injected into the repositories
#[derive(Debug, Clone)]
pub struct RateBook {
    pub tickets: RateTable<TicketType>,
    pub reservations: RateTable<ReservationType>,
}

impl RateBook {
    pub fn new(
        tickets: RateTable<TicketType>,
        reservations: RateTable<ReservationType>,
    ) -> Self {
        Self {
            tickets,
            reservations,
        }
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self {
            tickets: default_ticket_rates(),
            reservations: default_reservation_rates(),
        }
    }
}

pub fn default_ticket_rates() -> RateTable<TicketType> {
    RateTable::new([
        (TicketType::Standard, 10_000),
        (TicketType::Vip, 25_000),
        (TicketType::Etudiant, 7_000),
        (TicketType::Famille, 18_000),
        (TicketType::Groupe, 15_000),
    ])
}

pub fn default_reservation_rates() -> RateTable<ReservationType> {
    RateTable::new([
        (ReservationType::Adulte, 2_000),
        (ReservationType::Enfant, 1_000),
        (ReservationType::Groupe, 10_000),
        (ReservationType::Vip, 25_000),
        (ReservationType::Etudiant, 3_000),
        (ReservationType::Couple, 35_000),
    ])
}
