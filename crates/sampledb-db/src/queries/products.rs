//! Product database queries.

use rusqlite::{Connection, Row};
use sampledb_common::{Money, ProductId, Result};

use crate::models::{NewProduct, Product};
use crate::sql_error;

fn map_product(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: ProductId::from(row.get::<_, i64>(0)?),
        product_name: row.get(1)?,
        price: Money::from_minor(row.get(2)?),
        quantity: row.get(3)?,
    })
}

/// Create a new product.
pub fn create_product(conn: &Connection, new: &NewProduct<'_>) -> Result<Product> {
    conn.execute(
        "INSERT INTO products (product_name, price_minor, quantity)
         VALUES (:product_name, :price_minor, :quantity)",
        rusqlite::named_params! {
            ":product_name": new.product_name,
            ":price_minor": new.price.minor(),
            ":quantity": new.quantity,
        },
    )
    .map_err(sql_error)?;

    Ok(Product {
        id: ProductId::from(conn.last_insert_rowid()),
        product_name: new.product_name.to_string(),
        price: new.price,
        quantity: new.quantity,
    })
}

/// Get a product by ID.
pub fn get_product(conn: &Connection, id: ProductId) -> Result<Option<Product>> {
    let result = conn.query_row(
        "SELECT product_id, product_name, price_minor, quantity
         FROM products WHERE product_id = :id",
        rusqlite::named_params! { ":id": id.get() },
        map_product,
    );

    match result {
        Ok(product) => Ok(Some(product)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// List all products ordered by ID.
pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    let mut stmt = conn
        .prepare("SELECT product_id, product_name, price_minor, quantity FROM products ORDER BY product_id")
        .map_err(sql_error)?;

    let products = stmt
        .query_map([], map_product)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(products)
}

/// Delete a product (cascades to its sales).
pub fn delete_product(conn: &Connection, id: ProductId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM products WHERE product_id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(sql_error)?;

    Ok(rows_affected > 0)
}
