//! The literal sample batch.
//!
//! Parents are inserted before the children that reference them, and children
//! use the IDs the store actually generated. The whole batch is one
//! transaction. Loading is append-only: running it twice stores every row
//! twice, since keys are store-generated. Use
//! [`crate::schema::clear_tables`] first for a clean reseed.

use chrono::NaiveDate;
use rusqlite::Connection;
use sampledb_common::{ClientType, Error, Money, PaymentMethod, Result, Variant};
use serde::Serialize;

use crate::models::{NewCinema, NewClient, NewMovie, NewProduct, NewSale, NewScreening};
use crate::queries::{cinemas, clients, movies, products, sales, screenings};
use crate::sql_error;
use crate::tables::Table;

/// Rows inserted per table, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub variant: Variant,
    pub rows: Vec<(Table, usize)>,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.rows.iter().map(|(_, n)| n).sum()
    }
}

const CLIENTS: [NewClient<'static>; 2] = [
    NewClient {
        firm_name: "Client-1 LLC",
        client_type: ClientType::Legal,
        address: Some("1 Pershotravneva St."),
        phone: Some("111-222-3333"),
        contact_person: Some("Ivan Ivanov"),
        account_number: Some("UA1234567890"),
    },
    NewClient {
        firm_name: "Petrenko FOP",
        client_type: ClientType::Individual,
        address: Some("5 Tsentralna St."),
        phone: Some("444-555-6666"),
        contact_person: Some("Petro Petrenko"),
        account_number: Some("UA9876543210"),
    },
];

const PRODUCTS: [NewProduct<'static>; 3] = [
    NewProduct {
        product_name: "Phone",
        price: Money::from_major(12_000),
        quantity: 50,
    },
    NewProduct {
        product_name: "Laptop",
        price: Money::from_major(30_000),
        quantity: 20,
    },
    NewProduct {
        product_name: "Tablet",
        price: Money::from_major(15_000),
        quantity: 30,
    },
];

/// A sale referencing the client and product seeds by position.
struct SaleSeed {
    date: (i32, u32, u32),
    client: usize,
    product: usize,
    quantity_sold: i64,
    discount: f64,
    payment_method: PaymentMethod,
    delivery_needed: bool,
    delivery_cost: Money,
}

const SALES: [SaleSeed; 3] = [
    SaleSeed {
        date: (2024, 11, 15),
        client: 0,
        product: 0,
        quantity_sold: 2,
        discount: 5.0,
        payment_method: PaymentMethod::Cash,
        delivery_needed: true,
        delivery_cost: Money::from_major(150),
    },
    SaleSeed {
        date: (2024, 11, 16),
        client: 1,
        product: 1,
        quantity_sold: 1,
        discount: 10.0,
        payment_method: PaymentMethod::NonCash,
        delivery_needed: false,
        delivery_cost: Money::ZERO,
    },
    SaleSeed {
        date: (2024, 11, 17),
        client: 0,
        product: 2,
        quantity_sold: 1,
        discount: 15.0,
        payment_method: PaymentMethod::Cash,
        delivery_needed: true,
        delivery_cost: Money::from_major(100),
    },
];

const CINEMAS: [NewCinema<'static>; 3] = [
    NewCinema {
        name: "Kyiv",
        ticket_price: Money::from_major(150),
        seat_count: 300,
        address: Some("19 Velyka Vasylkivska St."),
        phone: Some("044-234-7381"),
    },
    NewCinema {
        name: "Zhovten",
        ticket_price: Money::from_major(120),
        seat_count: 180,
        address: Some("26 Kostiantynivska St."),
        phone: Some("044-428-5770"),
    },
    NewCinema {
        name: "Multiplex Lavina",
        ticket_price: Money::from_major(220),
        seat_count: 450,
        address: Some("6D Berkovetska St."),
        phone: Some("044-338-1010"),
    },
];

const MOVIES: [NewMovie<'static>; 3] = [
    NewMovie {
        title: "Shadows of Forgotten Ancestors",
        genre: "drama",
        duration_minutes: 97,
        rating: Some(8.0),
    },
    NewMovie {
        title: "Interstellar",
        genre: "sci-fi",
        duration_minutes: 169,
        rating: Some(8.7),
    },
    NewMovie {
        title: "Dovbush",
        genre: "historical",
        duration_minutes: 126,
        rating: Some(6.9),
    },
];

/// A screening referencing the cinema and movie seeds by position.
struct ScreeningSeed {
    cinema: usize,
    movie: usize,
    start: (i32, u32, u32),
    show_days: i64,
}

const SCREENINGS: [ScreeningSeed; 4] = [
    ScreeningSeed {
        cinema: 0,
        movie: 0,
        start: (2024, 11, 20),
        show_days: 7,
    },
    ScreeningSeed {
        cinema: 1,
        movie: 1,
        start: (2024, 11, 22),
        show_days: 14,
    },
    ScreeningSeed {
        cinema: 2,
        movie: 2,
        start: (2024, 11, 25),
        show_days: 10,
    },
    ScreeningSeed {
        cinema: 2,
        movie: 1,
        start: (2024, 12, 1),
        show_days: 5,
    },
];

fn date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::internal(format!("Invalid seed date {year}-{month}-{day}")))
}

/// Load the sample batch for `variant`.
pub fn load(conn: &Connection, variant: Variant) -> Result<SeedSummary> {
    match variant {
        Variant::Commerce => load_commerce(conn),
        Variant::Cinema => load_cinema(conn),
    }
}

/// Insert the commerce batch: clients, products, then sales.
pub fn load_commerce(conn: &Connection) -> Result<SeedSummary> {
    let tx = conn.unchecked_transaction().map_err(sql_error)?;

    let client_ids = CLIENTS
        .iter()
        .map(|c| clients::create_client(&tx, c).map(|c| c.id))
        .collect::<Result<Vec<_>>>()?;
    let product_ids = PRODUCTS
        .iter()
        .map(|p| products::create_product(&tx, p).map(|p| p.id))
        .collect::<Result<Vec<_>>>()?;

    for seed in &SALES {
        sales::create_sale(
            &tx,
            &NewSale {
                sale_date: date(seed.date)?,
                client_id: client_ids[seed.client],
                product_id: product_ids[seed.product],
                quantity_sold: seed.quantity_sold,
                discount: seed.discount,
                payment_method: seed.payment_method,
                delivery_needed: seed.delivery_needed,
                delivery_cost: seed.delivery_cost,
            },
        )?;
    }

    tx.commit().map_err(sql_error)?;

    let summary = SeedSummary {
        variant: Variant::Commerce,
        rows: vec![
            (Table::Clients, CLIENTS.len()),
            (Table::Products, PRODUCTS.len()),
            (Table::Sales, SALES.len()),
        ],
    };
    tracing::info!(variant = %summary.variant, rows = summary.total(), "Sample data inserted");
    Ok(summary)
}

/// Insert the cinema batch: cinemas, movies, then screenings.
pub fn load_cinema(conn: &Connection) -> Result<SeedSummary> {
    let tx = conn.unchecked_transaction().map_err(sql_error)?;

    let cinema_ids = CINEMAS
        .iter()
        .map(|c| cinemas::create_cinema(&tx, c).map(|c| c.id))
        .collect::<Result<Vec<_>>>()?;
    let movie_ids = MOVIES
        .iter()
        .map(|m| movies::create_movie(&tx, m).map(|m| m.id))
        .collect::<Result<Vec<_>>>()?;

    for seed in &SCREENINGS {
        screenings::create_screening(
            &tx,
            &NewScreening {
                cinema_id: cinema_ids[seed.cinema],
                movie_id: movie_ids[seed.movie],
                start_date: date(seed.start)?,
                show_days: seed.show_days,
            },
        )?;
    }

    tx.commit().map_err(sql_error)?;

    let summary = SeedSummary {
        variant: Variant::Cinema,
        rows: vec![
            (Table::Cinemas, CINEMAS.len()),
            (Table::Movies, MOVIES.len()),
            (Table::Screenings, SCREENINGS.len()),
        ],
    };
    tracing::info!(variant = %summary.variant, rows = summary.total(), "Sample data inserted");
    Ok(summary)
}
