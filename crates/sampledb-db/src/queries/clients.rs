//! Client database queries.

use rusqlite::{Connection, Row};
use sampledb_common::{ClientId, Result};

use crate::models::{Client, NewClient};
use crate::{column_parse, sql_error};

const COLUMNS: &str =
    "client_id, firm_name, client_type, address, phone, contact_person, account_number";

fn map_client(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: ClientId::from(row.get::<_, i64>(0)?),
        firm_name: row.get(1)?,
        client_type: column_parse(row, 2)?,
        address: row.get(3)?,
        phone: row.get(4)?,
        contact_person: row.get(5)?,
        account_number: row.get(6)?,
    })
}

/// Create a new client.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `new` - Client fields; the ID is assigned by the store
///
/// # Returns
///
/// * `Ok(Client)` - The created client
/// * `Err(Error)` - If a database error occurs
pub fn create_client(conn: &Connection, new: &NewClient<'_>) -> Result<Client> {
    conn.execute(
        "INSERT INTO clients (firm_name, client_type, address, phone, contact_person, account_number)
         VALUES (:firm_name, :client_type, :address, :phone, :contact_person, :account_number)",
        rusqlite::named_params! {
            ":firm_name": new.firm_name,
            ":client_type": new.client_type.to_string(),
            ":address": new.address,
            ":phone": new.phone,
            ":contact_person": new.contact_person,
            ":account_number": new.account_number,
        },
    )
    .map_err(sql_error)?;

    Ok(Client {
        id: ClientId::from(conn.last_insert_rowid()),
        firm_name: new.firm_name.to_string(),
        client_type: new.client_type,
        address: new.address.map(str::to_string),
        phone: new.phone.map(str::to_string),
        contact_person: new.contact_person.map(str::to_string),
        account_number: new.account_number.map(str::to_string),
    })
}

/// Get a client by ID.
///
/// # Returns
///
/// * `Ok(Some(Client))` - The client if found
/// * `Ok(None)` - If the client does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_client(conn: &Connection, id: ClientId) -> Result<Option<Client>> {
    let result = conn.query_row(
        &format!("SELECT {COLUMNS} FROM clients WHERE client_id = :id"),
        rusqlite::named_params! { ":id": id.get() },
        map_client,
    );

    match result {
        Ok(client) => Ok(Some(client)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// Find the first client with the given firm name.
pub fn find_client_by_name(conn: &Connection, firm_name: &str) -> Result<Option<Client>> {
    let result = conn.query_row(
        &format!("SELECT {COLUMNS} FROM clients WHERE firm_name = :name ORDER BY client_id LIMIT 1"),
        rusqlite::named_params! { ":name": firm_name },
        map_client,
    );

    match result {
        Ok(client) => Ok(Some(client)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// List all clients ordered by ID.
pub fn list_clients(conn: &Connection) -> Result<Vec<Client>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM clients ORDER BY client_id"))
        .map_err(sql_error)?;

    let clients = stmt
        .query_map([], map_client)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(clients)
}

/// Delete a client (cascades to its sales).
///
/// # Returns
///
/// * `Ok(true)` - If the client was deleted
/// * `Ok(false)` - If the client did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_client(conn: &Connection, id: ClientId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM clients WHERE client_id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(sql_error)?;

    Ok(rows_affected > 0)
}
