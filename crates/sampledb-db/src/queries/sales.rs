//! Sale database queries.
//!
//! The store enforces the discount range and both foreign keys, so a bad sale
//! comes back as `Error::Constraint`.

use rusqlite::{Connection, Row};
use sampledb_common::{ClientId, Money, ProductId, Result, SaleId};

use crate::models::{NewSale, Sale};
use crate::{column_parse, sql_error};

const COLUMNS: &str = "sale_id, sale_date, client_id, product_id, quantity_sold, discount, \
                       payment_method, delivery_needed, delivery_cost_minor";

fn map_sale(row: &Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        id: SaleId::from(row.get::<_, i64>(0)?),
        sale_date: row.get(1)?,
        client_id: ClientId::from(row.get::<_, i64>(2)?),
        product_id: ProductId::from(row.get::<_, i64>(3)?),
        quantity_sold: row.get(4)?,
        discount: row.get(5)?,
        payment_method: column_parse(row, 6)?,
        delivery_needed: row.get(7)?,
        delivery_cost: Money::from_minor(row.get(8)?),
    })
}

/// Record a sale.
///
/// # Returns
///
/// * `Ok(Sale)` - The created sale
/// * `Err(Error::Constraint)` - Discount outside 3..=20 or unknown client/product
/// * `Err(Error)` - If another database error occurs
pub fn create_sale(conn: &Connection, new: &NewSale) -> Result<Sale> {
    conn.execute(
        "INSERT INTO sales (sale_date, client_id, product_id, quantity_sold, discount,
                            payment_method, delivery_needed, delivery_cost_minor)
         VALUES (:sale_date, :client_id, :product_id, :quantity_sold, :discount,
                 :payment_method, :delivery_needed, :delivery_cost_minor)",
        rusqlite::named_params! {
            ":sale_date": new.sale_date,
            ":client_id": new.client_id.get(),
            ":product_id": new.product_id.get(),
            ":quantity_sold": new.quantity_sold,
            ":discount": new.discount,
            ":payment_method": new.payment_method.to_string(),
            ":delivery_needed": new.delivery_needed,
            ":delivery_cost_minor": new.delivery_cost.minor(),
        },
    )
    .map_err(sql_error)?;

    Ok(Sale {
        id: SaleId::from(conn.last_insert_rowid()),
        sale_date: new.sale_date,
        client_id: new.client_id,
        product_id: new.product_id,
        quantity_sold: new.quantity_sold,
        discount: new.discount,
        payment_method: new.payment_method,
        delivery_needed: new.delivery_needed,
        delivery_cost: new.delivery_cost,
    })
}

/// Get a sale by ID.
pub fn get_sale(conn: &Connection, id: SaleId) -> Result<Option<Sale>> {
    let result = conn.query_row(
        &format!("SELECT {COLUMNS} FROM sales WHERE sale_id = :id"),
        rusqlite::named_params! { ":id": id.get() },
        map_sale,
    );

    match result {
        Ok(sale) => Ok(Some(sale)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(sql_error(e)),
    }
}

/// List all sales ordered by ID.
pub fn list_sales(conn: &Connection) -> Result<Vec<Sale>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {COLUMNS} FROM sales ORDER BY sale_id"))
        .map_err(sql_error)?;

    let sales = stmt
        .query_map([], map_sale)
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(sales)
}

/// List the sales of one client ordered by date.
pub fn list_sales_for_client(conn: &Connection, client_id: ClientId) -> Result<Vec<Sale>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM sales WHERE client_id = :client_id ORDER BY sale_date, sale_id"
        ))
        .map_err(sql_error)?;

    let sales = stmt
        .query_map(
            rusqlite::named_params! { ":client_id": client_id.get() },
            map_sale,
        )
        .map_err(sql_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(sql_error)?;

    Ok(sales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewClient, NewProduct};
    use crate::pool::init_memory_pool;
    use crate::queries::{clients, products};
    use crate::schema::create_tables;
    use chrono::NaiveDate;
    use sampledb_common::{ClientType, Error, PaymentMethod, Variant};

    fn setup(conn: &Connection) -> (ClientId, ProductId) {
        create_tables(conn, Variant::Commerce).unwrap();
        let client = clients::create_client(
            conn,
            &NewClient {
                firm_name: "Acme LLC",
                client_type: ClientType::Legal,
                address: None,
                phone: None,
                contact_person: None,
                account_number: None,
            },
        )
        .unwrap();
        let product = products::create_product(
            conn,
            &NewProduct {
                product_name: "Phone",
                price: Money::from_major(12_000),
                quantity: 50,
            },
        )
        .unwrap();
        (client.id, product.id)
    }

    fn sale(client_id: ClientId, product_id: ProductId, discount: f64) -> NewSale {
        NewSale {
            sale_date: NaiveDate::from_ymd_opt(2024, 11, 15).unwrap(),
            client_id,
            product_id,
            quantity_sold: 2,
            discount,
            payment_method: PaymentMethod::Cash,
            delivery_needed: true,
            delivery_cost: Money::from_major(150),
        }
    }

    #[test]
    fn test_create_and_get_sale() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (client_id, product_id) = setup(&conn);

        let created = create_sale(&conn, &sale(client_id, product_id, 5.0)).unwrap();
        let found = get_sale(&conn, created.id).unwrap().unwrap();

        assert_eq!(found, created);
        assert_eq!(found.sale_date.to_string(), "2024-11-15");
    }

    #[test]
    fn test_discount_bounds_inclusive() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (client_id, product_id) = setup(&conn);

        assert!(create_sale(&conn, &sale(client_id, product_id, 3.0)).is_ok());
        assert!(create_sale(&conn, &sale(client_id, product_id, 20.0)).is_ok());
    }

    #[test]
    fn test_discount_out_of_range_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (client_id, product_id) = setup(&conn);

        for discount in [25.0, 2.5, 0.0] {
            let err = create_sale(&conn, &sale(client_id, product_id, discount)).unwrap_err();
            assert!(matches!(err, Error::Constraint(_)), "discount {}", discount);
        }
        assert!(list_sales(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_client_rejected() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (_, product_id) = setup(&conn);

        let err = create_sale(&conn, &sale(ClientId::from(99), product_id, 5.0)).unwrap_err();
        assert!(matches!(err, Error::Constraint(_)));
    }

    #[test]
    fn test_deleting_client_cascades_to_sales() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (client_id, product_id) = setup(&conn);
        create_sale(&conn, &sale(client_id, product_id, 5.0)).unwrap();
        create_sale(&conn, &sale(client_id, product_id, 10.0)).unwrap();

        assert!(clients::delete_client(&conn, client_id).unwrap());

        assert!(list_sales(&conn).unwrap().is_empty());
        // The product is untouched
        assert!(products::get_product(&conn, product_id).unwrap().is_some());
    }

    #[test]
    fn test_deleting_product_cascades_to_sales() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let (client_id, product_id) = setup(&conn);
        create_sale(&conn, &sale(client_id, product_id, 5.0)).unwrap();

        assert!(products::delete_product(&conn, product_id).unwrap());

        assert!(list_sales_for_client(&conn, client_id).unwrap().is_empty());
    }
}
