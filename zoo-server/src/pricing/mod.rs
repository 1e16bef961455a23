//! Derived-price rule
//!
//! Tickets and reservations carry a category code. When their price is
//! absent or zero at persistence time it is looked up in the matching
//! [`RateTable`]; a non-zero price is never overwritten.

mod rates;

pub use rates::*;

use std::hash::Hash;

use shared::models::{Reservation, ReservationType, Ticket, TicketType};

/// Fill `current` from `table` when it is absent or zero.
///
/// Codes missing from the table pass `current` through unchanged,
/// including `None`.
pub fn reconcile_price<C: Copy + Eq + Hash>(
    table: &RateTable<C>,
    code: C,
    current: Option<i64>,
) -> Option<i64> {
    match current {
        None | Some(0) => table.get(code).or(current),
        Some(price) => Some(price),
    }
}

/// A persisted record priced by category
pub trait PricedItem {
    type Category: Copy + Eq + Hash;

    fn category(&self) -> Self::Category;
    fn price(&self) -> i64;
    fn set_price(&mut self, price: i64);
}

impl PricedItem for Ticket {
    type Category = TicketType;

    fn category(&self) -> TicketType {
        self.type_ticket
    }

    fn price(&self) -> i64 {
        self.price
    }

    fn set_price(&mut self, price: i64) {
        self.price = price;
    }
}

impl PricedItem for Reservation {
    type Category = ReservationType;

    fn category(&self) -> ReservationType {
        self.type_of_reservation
    }

    fn price(&self) -> i64 {
        self.total_price
    }

    fn set_price(&mut self, price: i64) {
        self.total_price = price;
    }
}

/// Re-run the rule on a merged record (update path)
pub fn apply_rate<T: PricedItem>(table: &RateTable<T::Category>, item: &mut T) {
    if let Some(price) = reconcile_price(table, item.category(), Some(item.price())) {
        item.set_price(price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_price_takes_tabled_value() {
        let table = default_ticket_rates();
        for t in TicketType::ALL {
            assert_eq!(reconcile_price(&table, t, None), table.get(t));
            assert_eq!(reconcile_price(&table, t, Some(0)), table.get(t));
        }
    }

    #[test]
    fn test_explicit_price_preserved() {
        let table = default_ticket_rates();
        assert_eq!(reconcile_price(&table, TicketType::Vip, Some(1)), Some(1));
        assert_eq!(
            reconcile_price(&table, TicketType::Standard, Some(99_999)),
            Some(99_999)
        );
    }

    #[test]
    fn test_idempotent() {
        let table = default_reservation_rates();
        for r in ReservationType::ALL {
            for current in [None, Some(0), Some(4_200)] {
                let once = reconcile_price(&table, r, current);
                assert_eq!(reconcile_price(&table, r, once), once);
            }
        }
    }

    #[test]
    fn test_code_outside_table_passes_through() {
        let table = RateTable::new([(ReservationType::Adulte, 2_000)]);
        assert_eq!(reconcile_price(&table, ReservationType::Vip, None), None);
        assert_eq!(reconcile_price(&table, ReservationType::Vip, Some(0)), Some(0));
        assert_eq!(reconcile_price(&table, ReservationType::Vip, Some(7)), Some(7));
    }

    #[test]
    fn test_apply_rate_on_merged_record() {
        let mut reservation = Reservation {
            id: 1,
            visitors: None,
            tickets: None,
            event: None,
            type_of_reservation: ReservationType::Enfant,
            total_price: 0,
            arrival_time: None,
            has_booked: false,
            created_at: 0,
            updated_at: 0,
        };
        apply_rate(&default_reservation_rates(), &mut reservation);
        assert_eq!(reservation.total_price, 1_000);

        reservation.total_price = 1_500;
        apply_rate(&default_reservation_rates(), &mut reservation);
        assert_eq!(reservation.total_price, 1_500);
    }
}
