//! Cinema database queries.

use rusqlite::{Connection, Row};
use sampledb_common::{CinemaId, Money, Result};

use crate::models::{Cinema, NewCinema};
use crate::sql_error;

const COLUMNS: &str = "cinema_id, name, ticket_price_minor, seat_count, address, phone";

fn map_cinema(row: &Row<'_>) -> rusqlite::Result<Cinema> {
    Ok(Cinema {
        id: CinemaId::from(row.get::<_, i64>(0)?),
        name: row.get(1)?,
        ticket_price: Money::from_minor(row.get(2)?),
        seat_count: row.get(3)?,
        address: row.get(4)?,
        phone: row.get(5)?,
    })
}

/// Create a new cinema.
pub fn create_cinema(conn: &Connection, new: &NewCinema<'_>) -> Result<Cinema> {
    conn.execute(
        "INSERT INTO cinemas (name, ticket_price_minor, seat_count, address, phone)
         VALUES (:name, :ticket_price_minor, :seat_count, :address, :phone)",
        rusqlite::named_params! {
            ":name": new.name,
            ":ticket_price_minor": new.ticket_price.minor(),
            ":seat_count": new.seat_count,
            ":address": new.address,
            ":phone": new.phone,
        },
    )
    .map_err(sql_error)?;

    Ok(Cinema {
        id: CinemaId::from(conn.last_insert_rowid()),
        name: new.name.to_string(),
        ticket_price: new.ticket_price,
        seat_count: new.seat_count,
        address: new.address.map(str::to_string),
        phone: new.phone.map(str::to_string),
    })
}

/// Get a cinema by ID.
pub fn get_cinema(conn: &Connection, id: CinemaId) -> Result<Option<Cinema>> {
    let result = conn.query_row(
        &format!("SELECT {COLUMNS} FROM cinemas WHERE cinema_id = :id"),
        rusqlite::named_params! { ":id": id.get() },
        map_cinema,
    );

    match result {
        Ok(cinema) => Ok(Some(cinema)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// List all cinemas ordered by name.
pub fn list_cinemas(conn: &Connection) -> Result<Vec<Cinema>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM cinemas ORDER BY name, cinema_id"))
        .map_err(sql_error)?;

    let cinemas = stmt
        .query_map([], map_cinema)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(cinemas)
}

/// Delete a cinema (cascades to its screenings).
pub fn delete_cinema(conn: &Connection, id: CinemaId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM cinemas WHERE cinema_id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(sql_error)?;

    Ok(rows_affected > 0)
}
