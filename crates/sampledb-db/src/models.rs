//! Rust models matching the database schema.
//!
//! Stored rows carry their store-generated ID. The `New*` types are the
//! inputs for inserts, borrowing their text from the caller.

use chrono::NaiveDate;
use sampledb_common::{
    CinemaId, ClientId, ClientType, Money, MovieId, PaymentMethod, ProductId, SaleId, ScreeningId,
};
use serde::{Deserialize, Serialize};

/// Commerce: a buyer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub firm_name: String,
    pub client_type: ClientType,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub contact_person: Option<String>,
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewClient<'a> {
    pub firm_name: &'a str,
    pub client_type: ClientType,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub contact_person: Option<&'a str>,
    pub account_number: Option<&'a str>,
}

/// Commerce: a product on sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub price: Money,
    /// Units in stock.
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewProduct<'a> {
    pub product_name: &'a str,
    pub price: Money,
    pub quantity: i64,
}

/// Commerce: one client buying one product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: SaleId,
    pub sale_date: NaiveDate,
    pub client_id: ClientId,
    pub product_id: ProductId,
    pub quantity_sold: i64,
    /// Percent, the store only accepts 3..=20.
    pub discount: f64,
    pub payment_method: PaymentMethod,
    pub delivery_needed: bool,
    pub delivery_cost: Money,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewSale {
    pub sale_date: NaiveDate,
    pub client_id: ClientId,
    pub product_id: ProductId,
    pub quantity_sold: i64,
    pub discount: f64,
    pub payment_method: PaymentMethod,
    pub delivery_needed: bool,
    pub delivery_cost: Money,
}

/// Cinema: a venue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cinema {
    pub id: CinemaId,
    pub name: String,
    pub ticket_price: Money,
    pub seat_count: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCinema<'a> {
    pub name: &'a str,
    pub ticket_price: Money,
    pub seat_count: i64,
    pub address: Option<&'a str>,
    pub phone: Option<&'a str>,
}

/// Cinema: a film.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub genre: String,
    pub duration_minutes: i64,
    /// One decimal place, 0..=10.
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewMovie<'a> {
    pub title: &'a str,
    pub genre: &'a str,
    pub duration_minutes: i64,
    pub rating: Option<f64>,
}

/// Cinema: a movie running in a cinema for a number of days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Screening {
    pub id: ScreeningId,
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    pub start_date: NaiveDate,
    pub show_days: i64,
}

impl Screening {
    /// Last day the movie is shown, `None` if it falls outside the calendar.
    pub fn end_date(&self) -> Option<NaiveDate> {
        last_show_day(self.start_date, self.show_days)
    }
}

/// Last day of a run of `show_days` days starting at `start_date`.
///
/// `None` for a non-positive `show_days` or when the date would overflow.
pub fn last_show_day(start_date: NaiveDate, show_days: i64) -> Option<NaiveDate> {
    let extra = u64::try_from(show_days.checked_sub(1)?).ok()?;
    start_date.checked_add_days(chrono::Days::new(extra))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewScreening {
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    pub start_date: NaiveDate,
    pub show_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screening_end_date() {
        let screening = Screening {
            id: ScreeningId::from(1),
            cinema_id: CinemaId::from(1),
            movie_id: MovieId::from(1),
            start_date: NaiveDate::from_ymd_opt(2024, 11, 28).unwrap(),
            show_days: 7,
        };

        assert_eq!(screening.end_date(), NaiveDate::from_ymd_opt(2024, 12, 4));
    }

    #[test]
    fn test_single_day_run_ends_on_start() {
        let start = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        assert_eq!(last_show_day(start, 1), Some(start));
    }

    #[test]
    fn test_end_date_out_of_range() {
        let start = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();

        assert_eq!(last_show_day(start, 1_000_000_000), None);
        assert_eq!(last_show_day(start, i64::MAX), None);
        assert_eq!(last_show_day(NaiveDate::MAX, 2), None);
        assert_eq!(last_show_day(start, 0), None);
        assert_eq!(last_show_day(start, i64::MIN), None);
    }

    #[test]
    fn test_product_serializes_price_as_minor_units() {
        let product = Product {
            id: ProductId::from(1),
            product_name: "Phone".into(),
            price: Money::from_major(12_000),
            quantity: 50,
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], 1_200_000);
        assert_eq!(json["id"], 1);
    }
}
